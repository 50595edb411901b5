//! # Rate of Change Percentage (ROCP)
//!
//! Fractional variant of ROC: `(price - base) / base` without the 100 scale.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RocpParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for RocpParams {
    fn default() -> Self {
        Self {
            length: 12,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn rocp_batch(
    series: &[Vec<Candle>],
    params: &[RocpParams],
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
        IndicatorResult::formed(time, (extract_price(&bars[i], prm.price) - base) / base)
    })
}
