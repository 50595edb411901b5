//! # Typical Price
//!
//! `(high + low + close) / 3` per bar.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TypPriceParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn typprice_batch(
    series: &[Vec<Candle>],
    params: &[TypPriceParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, _prm, i| {
        IndicatorResult::formed(bars[i].time, extract_price(&bars[i], PriceKind::Typical))
    })
}
