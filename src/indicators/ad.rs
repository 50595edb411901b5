//! # Accumulation/Distribution Line (A/D)
//!
//! Running total of volume weighted by the close's position in the bar
//! range. A zero range contributes nothing.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct AdParams;

pub(crate) fn money_flow_volume(c: &Candle) -> f32 {
    let range = c.high - c.low;
    if range == 0.0 {
        return 0.0;
    }
    ((c.close - c.low) - (c.high - c.close)) / range * c.volume
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ad_batch(
    series: &[Vec<Candle>],
    params: &[AdParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, _prm: &AdParams, out| {
        let mut ad = 0.0f32;
        for (i, c) in bars.iter().enumerate() {
            ad += money_flow_volume(c);
            out[i] = IndicatorResult::formed(c.time, ad);
        }
    })
}
