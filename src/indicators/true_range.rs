//! # True Range
//!
//! Greatest of the bar range and the two gaps against the previous close.
//! The first bar falls back to its own high minus low.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TrueRangeParams;

pub(crate) fn true_range_at(bars: &[Candle], i: usize) -> f32 {
    let c = &bars[i];
    if i == 0 {
        return c.high - c.low;
    }
    let prev_close = bars[i - 1].close;
    (c.high - c.low)
        .max((c.high - prev_close).abs())
        .max((c.low - prev_close).abs())
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn true_range_batch(
    series: &[Vec<Candle>],
    params: &[TrueRangeParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, _prm, i| {
        IndicatorResult::formed(bars[i].time, true_range_at(bars, i))
    })
}
