//! # Arnaud Legoux Moving Average (ALMA)
//!
//! Gaussian-weighted window with an offset-shifted peak.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AlmaParams {
    pub length: usize,
    /// Peak position in [0, 1]; 0.85 biases toward recent bars.
    pub offset: f32,
    /// Gaussian width divisor.
    pub sigma: f32,
    pub price: PriceKind,
}

impl Default for AlmaParams {
    fn default() -> Self {
        Self {
            length: 9,
            offset: 0.85,
            sigma: 6.0,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn alma_batch(
    series: &[Vec<Candle>],
    params: &[AlmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let sigma = if prm.sigma > 0.0 { prm.sigma } else { 6.0 };
        let m = prm.offset * (length as f32 - 1.0);
        let s = length as f32 / sigma;
        let s2 = 2.0 * s * s;

        let mut num = 0.0f32;
        let mut wsum = 0.0f32;
        for k in 0..length {
            let d = k as f32 - m;
            let w = (-d * d / s2).exp();
            num += w * extract_price(&bars[i + 1 - length + k], prm.price);
            wsum += w;
        }
        IndicatorResult::formed(time, num / wsum)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_window_range() {
        let closes: Vec<Candle> = (0..30)
            .map(|i| {
                let c = 100.0 + (i as f32 * 0.7).sin() * 5.0;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &alma_batch(&[closes.clone()], &[AlmaParams::default()]).unwrap()[0][0];
        for (i, r) in out.iter().enumerate().skip(8) {
            assert!(r.is_formed);
            let window = &closes[i + 1 - 9..=i];
            let lo = window.iter().map(|c| c.close).fold(f32::MAX, f32::min);
            let hi = window.iter().map(|c| c.close).fold(f32::MIN, f32::max);
            assert!(r.value >= lo && r.value <= hi);
        }
    }
}
