//! # Elder Force Index (EFI)
//!
//! EMA of the close-to-close change times volume.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EfiParams {
    pub length: usize,
}

impl Default for EfiParams {
    fn default() -> Self {
        Self { length: 13 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn efi_batch(
    series: &[Vec<Candle>],
    params: &[EfiParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &EfiParams, out| {
        let mut ema = EmaState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let mut r = IndicatorResult::empty(c.time);
            if i > 0 {
                let force = (c.close - bars[i - 1].close) * c.volume;
                let value = ema.update(force);
                if ema.is_formed() {
                    r = IndicatorResult::formed(c.time, value);
                }
            }
            out[i] = r;
        }
    })
}
