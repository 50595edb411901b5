//! # Keltner Channels
//!
//! EMA middle line with bands offset by a multiple of the ATR.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::true_range::true_range_at;
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::{EmaState, WilderState};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KeltnerParams {
    pub length: usize,
    pub atr_length: usize,
    pub multiplier: f32,
    pub price: PriceKind,
}

impl Default for KeltnerParams {
    fn default() -> Self {
        Self {
            length: 20,
            atr_length: 10,
            multiplier: 2.0,
            price: PriceKind::Typical,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KeltnerResult {
    pub time: i64,
    pub upper: f32,
    pub middle: f32,
    pub lower: f32,
    pub is_formed: bool,
}

impl Default for KeltnerResult {
    fn default() -> Self {
        Self {
            time: 0,
            upper: f32::NAN,
            middle: f32::NAN,
            lower: f32::NAN,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn keltner_batch(
    series: &[Vec<Candle>],
    params: &[KeltnerParams],
) -> Result<Vec<Vec<Vec<KeltnerResult>>>, BatchError> {
    scan_batch(series, params, keltner_kernel)
}

fn keltner_kernel(bars: &[Candle], prm: &KeltnerParams, out: &mut [KeltnerResult]) {
    let mut ema = EmaState::new(prm.length);
    let mut atr = WilderState::new(prm.atr_length);

    for (i, c) in bars.iter().enumerate() {
        let middle = ema.update(extract_price(c, prm.price));
        let range = atr.update(true_range_at(bars, i));

        out[i] = if ema.is_formed() && atr.is_formed() {
            let band = prm.multiplier * range;
            KeltnerResult {
                time: c.time,
                upper: middle + band,
                middle,
                lower: middle - band,
                is_formed: true,
            }
        } else {
            KeltnerResult {
                time: c.time,
                ..KeltnerResult::default()
            }
        };
    }
}
