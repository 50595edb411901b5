//! # Ease of Movement (EMV)
//!
//! Midpoint move scaled by volume against the bar range. Zero volume or a
//! zero range contributes 0 for the bar; the output is an SMA of the raw
//! per-bar readings.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EmvParams {
    pub length: usize,
    pub scale: f32,
}

impl Default for EmvParams {
    fn default() -> Self {
        Self {
            length: 14,
            scale: 10_000.0,
        }
    }
}

fn raw_emv(bars: &[Candle], i: usize, scale: f32) -> f32 {
    let c = &bars[i];
    let prev = &bars[i - 1];
    let range = c.high - c.low;
    if c.volume == 0.0 || range == 0.0 {
        return 0.0;
    }
    let mid_move = (c.high + c.low) / 2.0 - (prev.high + prev.low) / 2.0;
    let box_ratio = (c.volume / scale) / range;
    mid_move / box_ratio
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn emv_batch(
    series: &[Vec<Candle>],
    params: &[EmvParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let sum: f32 = (i + 1 - length..=i).map(|j| raw_emv(bars, j, prm.scale)).sum();
        IndicatorResult::formed(time, sum / length as f32)
    })
}
