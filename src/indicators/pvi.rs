//! # Positive Volume Index (PVI)
//!
//! Counterpart of NVI that only moves on bars where volume rose.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PviParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn pvi_batch(
    series: &[Vec<Candle>],
    params: &[PviParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, _prm: &PviParams, out| {
        let mut pvi = 1000.0f32;
        for (i, c) in bars.iter().enumerate() {
            if i > 0 {
                let prev = &bars[i - 1];
                if c.volume > prev.volume && prev.close != 0.0 {
                    pvi += pvi * (c.close - prev.close) / prev.close;
                }
            }
            out[i] = IndicatorResult::formed(c.time, pvi);
        }
    })
}
