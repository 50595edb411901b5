//! # Triple Exponential Moving Average (TEMA)
//!
//! `3*e1 - 3*e2 + e3` over three cascaded EMA stages.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TemaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for TemaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn tema_batch(
    series: &[Vec<Candle>],
    params: &[TemaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &TemaParams, out| {
        let mut ema1 = EmaState::new(prm.length);
        let mut ema2 = EmaState::new(prm.length);
        let mut ema3 = EmaState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let e1 = ema1.update(extract_price(c, prm.price));
            let mut value = f32::NAN;
            if ema1.is_formed() {
                let e2 = ema2.update(e1);
                if ema2.is_formed() {
                    let e3 = ema3.update(e2);
                    if ema3.is_formed() {
                        value = 3.0 * e1 - 3.0 * e2 + e3;
                    }
                }
            }
            out[i] = IndicatorResult {
                time: c.time,
                value,
                is_formed: ema3.is_formed(),
            };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_spans_three_stages() {
        let closes: Vec<Candle> = (0..12)
            .map(|i| {
                let c = 5.0 + i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let params = vec![TemaParams {
            length: 3,
            price: PriceKind::Close,
        }];
        let out = &tema_batch(&[closes], &params).unwrap()[0][0];
        assert!(!out[5].is_formed);
        assert!(out[6].is_formed);
        assert!(out[6].value.is_finite());
    }
}
