//! # Weighted Moving Average (WMA)
//!
//! Linearly weighted mean: the newest bar in the window gets weight
//! `length`, the oldest weight 1.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WmaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for WmaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn wma_batch(
    series: &[Vec<Candle>],
    params: &[WmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        wma_at(bars, prm.length, prm.price, i)
    })
}

/// Windowed WMA of one bar; shared with HMA.
pub(crate) fn wma_at(bars: &[Candle], length: usize, price: PriceKind, i: usize) -> IndicatorResult {
    let length = length.max(1);
    let time = bars[i].time;
    if i + 1 < length {
        return IndicatorResult::empty(time);
    }
    let mut num = 0.0f32;
    let denom = (length * (length + 1)) as f32 / 2.0;
    for k in 0..length {
        let weight = (length - k) as f32;
        num += weight * extract_price(&bars[i - k], price);
    }
    IndicatorResult::formed(time, num / denom)
}
