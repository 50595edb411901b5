//! # Absolute Price Oscillator (APO)
//!
//! Raw difference of a fast and a slow EMA over the same price.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ApoParams {
    pub fast_length: usize,
    pub slow_length: usize,
    pub price: PriceKind,
}

impl Default for ApoParams {
    fn default() -> Self {
        Self {
            fast_length: 10,
            slow_length: 20,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn apo_batch(
    series: &[Vec<Candle>],
    params: &[ApoParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &ApoParams, out| {
        let mut fast = EmaState::new(prm.fast_length);
        let mut slow = EmaState::new(prm.slow_length);
        for (i, c) in bars.iter().enumerate() {
            let price = extract_price(c, prm.price);
            let f = fast.update(price);
            let s = slow.update(price);
            out[i] = if fast.is_formed() && slow.is_formed() {
                IndicatorResult::formed(c.time, f - s)
            } else {
                IndicatorResult::empty(c.time)
            };
        }
    })
}
