//! # Chaikin Volatility (CVI)
//!
//! Percentage rate of change of an EMA of the high/low spread. A zero EMA
//! `length` bars back resolves to 0.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CviParams {
    pub ema_length: usize,
    pub roc_length: usize,
}

impl Default for CviParams {
    fn default() -> Self {
        Self {
            ema_length: 10,
            roc_length: 10,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn cvi_batch(
    series: &[Vec<Candle>],
    params: &[CviParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, cvi_kernel)
}

fn cvi_kernel(bars: &[Candle], prm: &CviParams, out: &mut [IndicatorResult]) {
    let roc_length = prm.roc_length.max(1);
    let mut ema = EmaState::new(prm.ema_length);
    let mut history = vec![f32::NAN; bars.len()];

    for (i, c) in bars.iter().enumerate() {
        let value = ema.update(c.high - c.low);
        if ema.is_formed() {
            history[i] = value;
        }

        out[i] = if i >= roc_length && !history[i - roc_length].is_nan() {
            let base = history[i - roc_length];
            let v = if base == 0.0 {
                0.0
            } else {
                100.0 * (value - base) / base
            };
            IndicatorResult::formed(c.time, v)
        } else {
            IndicatorResult::empty(c.time)
        };
    }
}
