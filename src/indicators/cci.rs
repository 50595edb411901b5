//! # Commodity Channel Index (CCI)
//!
//! Deviation of the typical price from its SMA, scaled by 0.015 times the
//! mean absolute deviation. Zero deviation resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CciParams {
    pub length: usize,
}

impl Default for CciParams {
    fn default() -> Self {
        Self { length: 20 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn cci_batch(
    series: &[Vec<Candle>],
    params: &[CciParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let window = &bars[i + 1 - length..=i];
        let n = length as f32;
        let mean: f32 = window
            .iter()
            .map(|c| extract_price(c, PriceKind::Typical))
            .sum::<f32>()
            / n;
        let mad: f32 = window
            .iter()
            .map(|c| (extract_price(c, PriceKind::Typical) - mean).abs())
            .sum::<f32>()
            / n;
        let tp = extract_price(&bars[i], PriceKind::Typical);
        let value = if mad == 0.0 {
            0.0
        } else {
            (tp - mean) / (0.015 * mad)
        };
        IndicatorResult::formed(time, value)
    })
}
