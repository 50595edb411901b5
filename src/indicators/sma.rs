//! # Simple Moving Average (SMA)
//!
//! Arithmetic mean of the selected price over a sliding window. Windowed
//! shape: every bar is recomputed independently from its own lookback.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SmaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn sma_batch(
    series: &[Vec<Candle>],
    params: &[SmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, sma_kernel)
}

fn sma_kernel(bars: &[Candle], prm: &SmaParams, i: usize) -> IndicatorResult {
    let length = prm.length.max(1);
    let time = bars[i].time;
    if i + 1 < length {
        return IndicatorResult::empty(time);
    }
    let mut sum = 0.0f32;
    for j in i + 1 - length..=i {
        sum += extract_price(&bars[j], prm.price);
    }
    IndicatorResult::formed(time, sum / length as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::candle::Candle;

    fn closes(values: &[f32]) -> Vec<Candle> {
        values
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 1.0))
            .collect()
    }

    #[test]
    fn window_average() {
        let batch = vec![closes(&[2.0, 4.0, 6.0, 8.0])];
        let params = vec![SmaParams {
            length: 2,
            price: PriceKind::Close,
        }];
        let out = &sma_batch(&batch, &params).unwrap()[0][0];
        assert!(!out[0].is_formed);
        assert_eq!(out[1].value, 3.0);
        assert_eq!(out[2].value, 5.0);
        assert_eq!(out[3].value, 7.0);
    }

    #[test]
    fn zero_length_clamps_to_one() {
        let batch = vec![closes(&[5.0, 6.0])];
        let params = vec![SmaParams {
            length: 0,
            price: PriceKind::Close,
        }];
        let out = &sma_batch(&batch, &params).unwrap()[0][0];
        assert_eq!(out[0].value, 5.0);
        assert_eq!(out[1].value, 6.0);
        assert!(out[1].is_formed);
    }
}
