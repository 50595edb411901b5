//! # Zero-Lag Exponential Moving Average (ZLEMA)
//!
//! EMA over a de-lagged input: `2*price - price[lag]` with
//! `lag = (length - 1) / 2`.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ZlemaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for ZlemaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn zlema_batch(
    series: &[Vec<Candle>],
    params: &[ZlemaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &ZlemaParams, out| {
        let length = prm.length.max(1);
        let lag = (length - 1) / 2;
        let mut ema = EmaState::new(length);
        for (i, c) in bars.iter().enumerate() {
            let price = extract_price(c, prm.price);
            let lagged = extract_price(&bars[i.saturating_sub(lag)], prm.price);
            let value = ema.update(2.0 * price - lagged);
            out[i] = IndicatorResult {
                time: c.time,
                value,
                is_formed: ema.is_formed(),
            };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_trend_with_less_lag_than_ema() {
        let closes: Vec<Candle> = (0..30)
            .map(|i| {
                let c = i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let params = vec![ZlemaParams {
            length: 5,
            price: PriceKind::Close,
        }];
        let out = &zlema_batch(&[closes.clone()], &params).unwrap()[0][0];
        let last = out.last().unwrap();
        assert!(last.is_formed);
        // On a straight ramp the de-lagged input cancels EMA lag almost exactly.
        assert!((last.value - closes.last().unwrap().close).abs() < 0.5);
    }
}
