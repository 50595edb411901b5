//! # Triangular Moving Average (TRIMA)
//!
//! SMA of an SMA, expressed directly as one pass with triangular weights so
//! each bar stays independently computable.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrimaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for TrimaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn trima_batch(
    series: &[Vec<Candle>],
    params: &[TrimaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        // Triangular weights: 1, 2, ..., peak, ..., 2, 1 across the window.
        let half = length / 2;
        let mut num = 0.0f32;
        let mut wsum = 0.0f32;
        for k in 0..length {
            let from_old = k;
            let from_new = length - 1 - k;
            let weight = (from_old.min(from_new) + 1).min(half + 1) as f32;
            num += weight * extract_price(&bars[i + 1 - length + k], prm.price);
            wsum += weight;
        }
        IndicatorResult::formed(time, num / wsum)
    })
}
