//! # Percentage Price Oscillator (PPO)
//!
//! `100 * (fast_ema - slow_ema) / slow_ema`. A zero slow EMA resolves to 0.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PpoParams {
    pub fast_length: usize,
    pub slow_length: usize,
    pub price: PriceKind,
}

impl Default for PpoParams {
    fn default() -> Self {
        Self {
            fast_length: 12,
            slow_length: 26,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ppo_batch(
    series: &[Vec<Candle>],
    params: &[PpoParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &PpoParams, out| {
        let mut fast = EmaState::new(prm.fast_length);
        let mut slow = EmaState::new(prm.slow_length);
        for (i, c) in bars.iter().enumerate() {
            let price = extract_price(c, prm.price);
            let f = fast.update(price);
            let s = slow.update(price);
            out[i] = if fast.is_formed() && slow.is_formed() {
                let value = if s == 0.0 { 0.0 } else { 100.0 * (f - s) / s };
                IndicatorResult::formed(c.time, value)
            } else {
                IndicatorResult::empty(c.time)
            };
        }
    })
}
