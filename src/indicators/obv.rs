//! # On-Balance Volume (OBV)
//!
//! Running volume total signed by the close-to-close direction.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ObvParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn obv_batch(
    series: &[Vec<Candle>],
    params: &[ObvParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, _prm: &ObvParams, out| {
        let mut obv = 0.0f32;
        for (i, c) in bars.iter().enumerate() {
            if i > 0 {
                let prev_close = bars[i - 1].close;
                if c.close > prev_close {
                    obv += c.volume;
                } else if c.close < prev_close {
                    obv -= c.volume;
                }
            }
            out[i] = IndicatorResult::formed(c.time, obv);
        }
    })
}
