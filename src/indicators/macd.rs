//! # Moving Average Convergence Divergence (MACD)
//!
//! Fast EMA minus slow EMA, a signal EMA over that difference, and their
//! histogram. The signal line starts accumulating only once the slow EMA
//! has seeded.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast_length: usize,
    pub slow_length: usize,
    pub signal_length: usize,
    pub price: PriceKind,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_length: 12,
            slow_length: 26,
            signal_length: 9,
            price: PriceKind::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MacdResult {
    pub time: i64,
    pub macd: f32,
    pub signal: f32,
    pub histogram: f32,
    pub is_formed: bool,
}

impl Default for MacdResult {
    fn default() -> Self {
        Self {
            time: 0,
            macd: f32::NAN,
            signal: f32::NAN,
            histogram: f32::NAN,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn macd_batch(
    series: &[Vec<Candle>],
    params: &[MacdParams],
) -> Result<Vec<Vec<Vec<MacdResult>>>, BatchError> {
    scan_batch(series, params, macd_kernel)
}

fn macd_kernel(bars: &[Candle], prm: &MacdParams, out: &mut [MacdResult]) {
    let mut fast = EmaState::new(prm.fast_length);
    let mut slow = EmaState::new(prm.slow_length);
    let mut signal = EmaState::new(prm.signal_length);

    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        let f = fast.update(price);
        let s = slow.update(price);

        let mut r = MacdResult {
            time: c.time,
            ..MacdResult::default()
        };
        if fast.is_formed() && slow.is_formed() {
            let macd = f - s;
            r.macd = macd;
            let sig = signal.update(macd);
            if signal.is_formed() {
                r.signal = sig;
                r.histogram = macd - sig;
                r.is_formed = true;
            }
        }
        out[i] = r;
    }
}
