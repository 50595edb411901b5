//! # Vertical Horizontal Filter (VHF)
//!
//! Price range of the window over the sum of absolute bar-to-bar changes.
//! A zero change sum resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VhfParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for VhfParams {
    fn default() -> Self {
        Self {
            length: 28,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn vhf_batch(
    series: &[Vec<Candle>],
    params: &[VhfParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let mut highest = f32::NEG_INFINITY;
        let mut lowest = f32::INFINITY;
        let mut change_sum = 0.0f32;
        for j in i + 1 - length..=i {
            let p = extract_price(&bars[j], prm.price);
            highest = highest.max(p);
            lowest = lowest.min(p);
            change_sum += (p - extract_price(&bars[j - 1], prm.price)).abs();
        }
        let value = if change_sum == 0.0 {
            0.0
        } else {
            (highest - lowest) / change_sum
        };
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_trend_reads_near_one() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &vhf_batch(&[bars], &[VhfParams::default()]).unwrap()[0][0];
        assert!(!out[27].is_formed);
        assert!(out[28].is_formed);
        // Range 27 over 28 unit moves.
        assert!((out[30].value - 27.0 / 28.0).abs() < 1e-5);
    }

    #[test]
    fn flat_series_reads_zero() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64, 5.0, 5.0, 5.0, 5.0, 1.0))
            .collect();
        let out = &vhf_batch(&[bars], &[VhfParams::default()]).unwrap()[0][0];
        assert_eq!(out[30].value, 0.0);
    }
}
