//! # Stochastic RSI
//!
//! Stochastic oscillator applied to an RSI stream instead of price. A flat
//! RSI window resolves to 0.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::RsiState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StochRsiParams {
    pub rsi_length: usize,
    pub stoch_length: usize,
    pub price: PriceKind,
}

impl Default for StochRsiParams {
    fn default() -> Self {
        Self {
            rsi_length: 14,
            stoch_length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn stoch_rsi_batch(
    series: &[Vec<Candle>],
    params: &[StochRsiParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, stoch_rsi_kernel)
}

fn stoch_rsi_kernel(bars: &[Candle], prm: &StochRsiParams, out: &mut [IndicatorResult]) {
    let stoch_length = prm.stoch_length.max(1);
    let mut rsi = RsiState::new(prm.rsi_length);
    let mut history = vec![f32::NAN; bars.len()];
    let mut formed_count = 0usize;

    for (i, c) in bars.iter().enumerate() {
        let value = rsi.update(extract_price(c, prm.price));
        let mut r = IndicatorResult::empty(c.time);
        if rsi.is_formed() {
            history[i] = value;
            formed_count += 1;
            if formed_count >= stoch_length {
                let window = &history[i + 1 - stoch_length..=i];
                let highest = window.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));
                let lowest = window.iter().fold(f32::INFINITY, |m, &v| m.min(v));
                let range = highest - lowest;
                let stoch = if range == 0.0 {
                    0.0
                } else {
                    (value - lowest) / range
                };
                r = IndicatorResult::formed(c.time, stoch);
            }
        }
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_zero_to_one() {
        let bars: Vec<Candle> = (0..80)
            .map(|i| {
                let c = 100.0 + 10.0 * ((i as f32) * 0.5).sin();
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &stoch_rsi_batch(&[bars], &[StochRsiParams::default()]).unwrap()[0][0];
        // RSI forms at 14, stochastic needs 14 RSI values: bar 27.
        assert!(!out[26].is_formed);
        assert!(out[27].is_formed);
        for r in out.iter().filter(|r| r.is_formed) {
            assert!((0.0..=1.0).contains(&r.value));
        }
    }
}
