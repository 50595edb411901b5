//! # Directional Movement Index (DX)
//!
//! `100 * |+DI - -DI| / (+DI + -DI)`. A zero DI sum resolves to 0.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::di::DiState;
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DxParams {
    pub length: usize,
}

impl Default for DxParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

pub(crate) fn dx_from_di(plus_di: f32, minus_di: f32) -> f32 {
    let sum = plus_di + minus_di;
    if sum == 0.0 {
        0.0
    } else {
        100.0 * (plus_di - minus_di).abs() / sum
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn dx_batch(
    series: &[Vec<Candle>],
    params: &[DxParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &DxParams, out| {
        let mut state = DiState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            out[i] = match state.update(bars, i) {
                Some((plus, minus)) => IndicatorResult::formed(c.time, dx_from_di(plus, minus)),
                None => IndicatorResult::empty(c.time),
            };
        }
    })
}
