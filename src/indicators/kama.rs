//! # Kaufman Adaptive Moving Average (KAMA)
//!
//! Smoothing constant adapts to the efficiency ratio of the last `length`
//! bars. A zero-volatility window (flat prices) gives an efficiency ratio
//! of zero rather than dividing by zero.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KamaParams {
    pub length: usize,
    pub fast_length: usize,
    pub slow_length: usize,
    pub price: PriceKind,
}

impl Default for KamaParams {
    fn default() -> Self {
        Self {
            length: 10,
            fast_length: 2,
            slow_length: 30,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn kama_batch(
    series: &[Vec<Candle>],
    params: &[KamaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, kama_kernel)
}

fn kama_kernel(bars: &[Candle], prm: &KamaParams, out: &mut [IndicatorResult]) {
    let length = prm.length.max(1);
    let fast = 2.0 / (prm.fast_length.max(1) as f32 + 1.0);
    let slow = 2.0 / (prm.slow_length.max(1) as f32 + 1.0);

    let mut kama = f32::NAN;
    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        if i < length {
            // Seed with the last warm-up price.
            if i == length - 1 {
                kama = price;
                out[i] = IndicatorResult::formed(c.time, kama);
            } else {
                out[i] = IndicatorResult::empty(c.time);
            }
            continue;
        }

        let change = (price - extract_price(&bars[i - length], prm.price)).abs();
        let mut volatility = 0.0f32;
        for j in i + 1 - length..=i {
            volatility += (extract_price(&bars[j], prm.price)
                - extract_price(&bars[j - 1], prm.price))
            .abs();
        }
        let er = if volatility == 0.0 {
            0.0
        } else {
            change / volatility
        };
        let sc = (er * (fast - slow) + slow).powi(2);
        kama += sc * (price - kama);
        out[i] = IndicatorResult::formed(c.time, kama);
    }
}
