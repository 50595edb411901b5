//! # Fisher Transform
//!
//! Normalizes the median price into (-1, 1) against the rolling high/low
//! range, smooths it, then applies the Fisher transform with its own
//! one-bar recursive smoothing. The normalized input is clamped to
//! +/-0.999 before the log.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FisherParams {
    pub length: usize,
}

impl Default for FisherParams {
    fn default() -> Self {
        Self { length: 9 }
    }
}

/// Fisher value plus the one-bar-lagged trigger line.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FisherResult {
    pub time: i64,
    pub fisher: f32,
    pub trigger: f32,
    pub is_formed: bool,
}

impl Default for FisherResult {
    fn default() -> Self {
        Self {
            time: 0,
            fisher: f32::NAN,
            trigger: f32::NAN,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn fisher_batch(
    series: &[Vec<Candle>],
    params: &[FisherParams],
) -> Result<Vec<Vec<Vec<FisherResult>>>, BatchError> {
    scan_batch(series, params, fisher_kernel)
}

fn fisher_kernel(bars: &[Candle], prm: &FisherParams, out: &mut [FisherResult]) {
    let length = prm.length.max(1);
    let mut norm = 0.0f32;
    let mut fisher = 0.0f32;
    let mut prev_fisher = f32::NAN;

    for (i, c) in bars.iter().enumerate() {
        let mut r = FisherResult {
            time: c.time,
            ..FisherResult::default()
        };
        if i + 1 >= length {
            let window = &bars[i + 1 - length..=i];
            let highest = window
                .iter()
                .fold(f32::NEG_INFINITY, |m, c| m.max(extract_price(c, PriceKind::Median)));
            let lowest = window
                .iter()
                .fold(f32::INFINITY, |m, c| m.min(extract_price(c, PriceKind::Median)));
            let range = highest - lowest;
            let price = extract_price(c, PriceKind::Median);
            let raw = if range == 0.0 {
                0.0
            } else {
                2.0 * (price - lowest) / range - 1.0
            };
            norm = 0.33 * raw + 0.67 * norm;
            let clamped = norm.clamp(-0.999, 0.999);
            fisher = 0.5 * ((1.0 + clamped) / (1.0 - clamped)).ln() + 0.5 * fisher;

            r.fisher = fisher;
            r.trigger = prev_fisher;
            r.is_formed = !prev_fisher.is_nan();
            prev_fisher = fisher;
        }
        out[i] = r;
    }
}
