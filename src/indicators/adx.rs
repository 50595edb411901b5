//! # Average Directional Index (ADX)
//!
//! Wilder smoothing applied to the DX stream, on top of the smoothed
//! directional indicator plumbing.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::di::DiState;
use crate::indicators::dx::dx_from_di;
use crate::utilities::candle::Candle;
use crate::utilities::math::WilderState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AdxParams {
    pub length: usize,
}

impl Default for AdxParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn adx_batch(
    series: &[Vec<Candle>],
    params: &[AdxParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &AdxParams, out| {
        let mut state = DiState::new(prm.length);
        let mut adx = WilderState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let mut r = IndicatorResult::empty(c.time);
            if let Some((plus, minus)) = state.update(bars, i) {
                let value = adx.update(dx_from_di(plus, minus));
                if adx.is_formed() {
                    r = IndicatorResult::formed(c.time, value);
                }
            }
            out[i] = r;
        }
    })
}
