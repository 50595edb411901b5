//! # Negative Volume Index (NVI)
//!
//! Cumulative index starting at 1000 that only moves on bars where volume
//! fell, tracking the close's percentage change. A zero previous close
//! leaves the index unchanged.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct NviParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn nvi_batch(
    series: &[Vec<Candle>],
    params: &[NviParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, _prm: &NviParams, out| {
        let mut nvi = 1000.0f32;
        for (i, c) in bars.iter().enumerate() {
            if i > 0 {
                let prev = &bars[i - 1];
                if c.volume < prev.volume && prev.close != 0.0 {
                    nvi += nvi * (c.close - prev.close) / prev.close;
                }
            }
            out[i] = IndicatorResult::formed(c.time, nvi);
        }
    })
}
