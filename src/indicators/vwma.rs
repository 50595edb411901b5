//! # Volume Weighted Moving Average (VWMA)

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VwmaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for VwmaParams {
    fn default() -> Self {
        Self {
            length: 20,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn vwma_batch(
    series: &[Vec<Candle>],
    params: &[VwmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let mut num = 0.0f32;
        let mut vol = 0.0f32;
        for j in i + 1 - length..=i {
            num += extract_price(&bars[j], prm.price) * bars[j].volume;
            vol += bars[j].volume;
        }
        // Zero traded volume over the whole window: fall back to the plain mean.
        let value = if vol == 0.0 {
            let mut sum = 0.0f32;
            for j in i + 1 - length..=i {
                sum += extract_price(&bars[j], prm.price);
            }
            sum / length as f32
        } else {
            num / vol
        };
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_weighting() {
        let bars = vec![
            Candle::new(0, 10.0, 10.0, 10.0, 10.0, 1.0),
            Candle::new(1, 20.0, 20.0, 20.0, 20.0, 3.0),
        ];
        let params = vec![VwmaParams {
            length: 2,
            price: PriceKind::Close,
        }];
        let out = &vwma_batch(&[bars], &params).unwrap()[0][0];
        assert_eq!(out[1].value, 17.5);
    }

    #[test]
    fn zero_volume_falls_back_to_mean() {
        let bars = vec![
            Candle::new(0, 10.0, 10.0, 10.0, 10.0, 0.0),
            Candle::new(1, 20.0, 20.0, 20.0, 20.0, 0.0),
        ];
        let params = vec![VwmaParams {
            length: 2,
            price: PriceKind::Close,
        }];
        let out = &vwma_batch(&[bars], &params).unwrap()[0][0];
        assert_eq!(out[1].value, 15.0);
    }
}
