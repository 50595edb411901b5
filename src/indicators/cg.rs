//! # Center of Gravity (CG)
//!
//! Ehlers' weighted balance point of the last `length` prices, negated.
//! A zero price sum resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CgParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for CgParams {
    fn default() -> Self {
        Self {
            length: 10,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn cg_batch(
    series: &[Vec<Candle>],
    params: &[CgParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let mut num = 0.0f32;
        let mut den = 0.0f32;
        // Most recent price gets weight 1, oldest gets weight length.
        for k in 0..length {
            let p = extract_price(&bars[i - k], prm.price);
            num += (k as f32 + 1.0) * p;
            den += p;
        }
        let value = if den == 0.0 { 0.0 } else { -num / den };
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_prices_balance_mid_window() {
        let bars: Vec<Candle> = (0..20)
            .map(|i| Candle::new(i as i64, 4.0, 4.0, 4.0, 4.0, 1.0))
            .collect();
        let out = &cg_batch(&[bars], &[CgParams::default()]).unwrap()[0][0];
        // Uniform weights: -(1+..+10)/10 = -5.5
        assert!((out[15].value + 5.5).abs() < 1e-5);
    }

    #[test]
    fn zero_prices_fall_back_to_zero() {
        let bars: Vec<Candle> = (0..20)
            .map(|i| Candle::new(i as i64, 0.0, 0.0, 0.0, 0.0, 1.0))
            .collect();
        let out = &cg_batch(&[bars], &[CgParams::default()]).unwrap()[0][0];
        assert_eq!(out[15].value, 0.0);
    }
}
