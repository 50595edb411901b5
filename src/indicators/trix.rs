//! # TRIX
//!
//! One-bar rate of change of a triple-smoothed EMA, in percent. Each EMA
//! stage seeds on the previous stage's output, so warm-up compounds.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrixParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for TrixParams {
    fn default() -> Self {
        Self {
            length: 15,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn trix_batch(
    series: &[Vec<Candle>],
    params: &[TrixParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, trix_kernel)
}

fn trix_kernel(bars: &[Candle], prm: &TrixParams, out: &mut [IndicatorResult]) {
    let mut ema1 = EmaState::new(prm.length);
    let mut ema2 = EmaState::new(prm.length);
    let mut ema3 = EmaState::new(prm.length);
    let mut prev_triple = f32::NAN;

    for (i, c) in bars.iter().enumerate() {
        let v1 = ema1.update(extract_price(c, prm.price));
        let mut r = IndicatorResult::empty(c.time);
        if ema1.is_formed() {
            let v2 = ema2.update(v1);
            if ema2.is_formed() {
                let v3 = ema3.update(v2);
                if ema3.is_formed() {
                    if !prev_triple.is_nan() && prev_triple != 0.0 {
                        r = IndicatorResult::formed(c.time, 100.0 * (v3 - prev_triple) / prev_triple);
                    }
                    prev_triple = v3;
                }
            }
        }
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_warmup_then_one_bar_delay() {
        let bars: Vec<Candle> = (0..60)
            .map(|i| {
                let c = 100.0 + i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let prm = TrixParams {
            length: 5,
            price: PriceKind::Close,
        };
        let out = &trix_batch(&[bars], &[prm]).unwrap()[0][0];
        // Stages seed at 4, 8, 12; ROC needs one more triple value.
        assert!(!out[12].is_formed);
        assert!(out[13].is_formed);
        assert!(out[30].value > 0.0);
    }
}
