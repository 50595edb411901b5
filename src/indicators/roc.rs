//! # Rate of Change (ROC)
//!
//! Percentage change against the price `length` bars back. A zero base
//! price yields an empty result rather than a division.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RocParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for RocParams {
    fn default() -> Self {
        Self {
            length: 12,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn roc_batch(
    series: &[Vec<Candle>],
    params: &[RocParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let base = extract_price(&bars[i - length], prm.price);
        if base == 0.0 {
            return IndicatorResult::empty(time);
        }
        let value = (extract_price(&bars[i], prm.price) - base) / base * 100.0;
        IndicatorResult::formed(time, value)
    })
}
