//! # Bollinger Band Width
//!
//! `(upper - lower) / middle`. A zero middle band resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::indicators::bollinger::bollinger_at;
use crate::utilities::candle::{Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BollingerWidthParams {
    pub length: usize,
    pub deviation: f32,
    pub price: PriceKind,
}

impl Default for BollingerWidthParams {
    fn default() -> Self {
        Self {
            length: 20,
            deviation: 2.0,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn bollinger_width_batch(
    series: &[Vec<Candle>],
    params: &[BollingerWidthParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match bollinger_at(bars, prm.length.max(1), prm.deviation, prm.price, i) {
            Some((middle, upper, lower)) => {
                let value = if middle == 0.0 {
                    0.0
                } else {
                    (upper - lower) / middle
                };
                IndicatorResult::formed(time, value)
            }
            None => IndicatorResult::empty(time),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_tracks_volatility() {
        let calm: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 100.0 + 0.1 * ((i as f32) * 0.5).sin();
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let wild: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 100.0 + 10.0 * ((i as f32) * 0.5).sin();
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = bollinger_width_batch(&[calm, wild], &[BollingerWidthParams::default()]).unwrap();
        assert!(out[1][0][35].value > out[0][0][35].value);
    }
}
