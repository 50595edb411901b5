//! # Momentum
//!
//! Raw price difference against the bar `length` back.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MomentumParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            length: 10,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn momentum_batch(
    series: &[Vec<Candle>],
    params: &[MomentumParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let value =
            extract_price(&bars[i], prm.price) - extract_price(&bars[i - length], prm.price);
        IndicatorResult::formed(time, value)
    })
}
