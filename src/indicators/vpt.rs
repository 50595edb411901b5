//! # Volume Price Trend (VPT)
//!
//! Running total of volume scaled by the close's percentage change. A zero
//! previous close skips the bar.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct VptParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn vpt_batch(
    series: &[Vec<Candle>],
    params: &[VptParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, _prm: &VptParams, out| {
        let mut vpt = 0.0f32;
        for (i, c) in bars.iter().enumerate() {
            if i > 0 {
                let prev_close = bars[i - 1].close;
                if prev_close != 0.0 {
                    vpt += c.volume * (c.close - prev_close) / prev_close;
                }
            }
            out[i] = IndicatorResult::formed(c.time, vpt);
        }
    })
}
