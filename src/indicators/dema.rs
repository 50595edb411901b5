//! # Double Exponential Moving Average (DEMA)
//!
//! `2 * ema(price) - ema(ema(price))`. Two cascaded smoothing stages with
//! independent warm-up; the output is formed once the second stage is.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DemaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for DemaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn dema_batch(
    series: &[Vec<Candle>],
    params: &[DemaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &DemaParams, out| {
        let mut ema1 = EmaState::new(prm.length);
        let mut ema2 = EmaState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let e1 = ema1.update(extract_price(c, prm.price));
            let mut value = f32::NAN;
            if ema1.is_formed() {
                let e2 = ema2.update(e1);
                if ema2.is_formed() {
                    value = 2.0 * e1 - e2;
                }
            }
            out[i] = IndicatorResult {
                time: c.time,
                value,
                is_formed: ema2.is_formed(),
            };
        }
    })
}
