//! # Exponential Moving Average (EMA)
//!
//! Seeded recurrence: the first `length` bars accumulate a running sum, bar
//! `length - 1` emits the simple average as the seed, and later bars apply
//! `ema += (price - ema) * 2 / (length + 1)`.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EmaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self {
            length: 12,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ema_batch(
    series: &[Vec<Candle>],
    params: &[EmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, ema_kernel)
}

fn ema_kernel(bars: &[Candle], prm: &EmaParams, out: &mut [IndicatorResult]) {
    let mut ema = EmaState::new(prm.length);
    for (i, c) in bars.iter().enumerate() {
        let value = ema.update(extract_price(c, prm.price));
        out[i] = IndicatorResult {
            time: c.time,
            value,
            is_formed: ema.is_formed(),
        };
    }
}
