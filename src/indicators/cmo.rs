//! # Chande Momentum Oscillator (CMO)
//!
//! `100 * (up - down) / (up + down)` over the deltas of the last `length`
//! bars. A window with no movement resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CmoParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for CmoParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn cmo_batch(
    series: &[Vec<Candle>],
    params: &[CmoParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let mut up = 0.0f32;
        let mut down = 0.0f32;
        for j in i + 1 - length..=i {
            let delta =
                extract_price(&bars[j], prm.price) - extract_price(&bars[j - 1], prm.price);
            if delta > 0.0 {
                up += delta;
            } else {
                down -= delta;
            }
        }
        let total = up + down;
        let value = if total == 0.0 {
            0.0
        } else {
            100.0 * (up - down) / total
        };
        IndicatorResult::formed(time, value)
    })
}
