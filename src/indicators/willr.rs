//! # Williams %R
//!
//! Position of the close inside the high/low range of the last `length`
//! bars, scaled to [-100, 0]. A degenerate range resolves to -50.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WillRParams {
    pub length: usize,
}

impl Default for WillRParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn willr_batch(
    series: &[Vec<Candle>],
    params: &[WillRParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let window = &bars[i + 1 - length..=i];
        let highest = window.iter().fold(f32::NEG_INFINITY, |m, c| m.max(c.high));
        let lowest = window.iter().fold(f32::INFINITY, |m, c| m.min(c.low));
        let range = highest - lowest;
        let value = if range == 0.0 {
            -50.0
        } else {
            -100.0 * (highest - bars[i].close) / range
        };
        IndicatorResult::formed(time, value)
    })
}
