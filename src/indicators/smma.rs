//! # Smoothed Moving Average (SMMA)
//!
//! Wilder's moving average: seeded with the simple average, then
//! `smma += (price - smma) / length`.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::WilderState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SmmaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for SmmaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn smma_batch(
    series: &[Vec<Candle>],
    params: &[SmmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &SmmaParams, out| {
        let mut rma = WilderState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let value = rma.update(extract_price(c, prm.price));
            out[i] = IndicatorResult {
                time: c.time,
                value,
                is_formed: rma.is_formed(),
            };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wilder_step() {
        let batch = vec![vec![
            Candle::new(0, 4.0, 4.0, 4.0, 4.0, 1.0),
            Candle::new(1, 8.0, 8.0, 8.0, 8.0, 1.0),
            Candle::new(2, 10.0, 10.0, 10.0, 10.0, 1.0),
        ]];
        let params = vec![SmmaParams {
            length: 2,
            price: PriceKind::Close,
        }];
        let out = &smma_batch(&batch, &params).unwrap()[0][0];
        assert_eq!(out[1].value, 6.0);
        assert_eq!(out[2].value, 8.0);
    }
}
