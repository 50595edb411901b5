//! # Average True Range (ATR)

use crate::batch::{scan_batch, BatchError};
use crate::indicators::true_range::true_range_at;
use crate::utilities::candle::Candle;
use crate::utilities::math::WilderState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AtrParams {
    pub length: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn atr_batch(
    series: &[Vec<Candle>],
    params: &[AtrParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &AtrParams, out| {
        let mut rma = WilderState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let value = rma.update(true_range_at(bars, i));
            out[i] = if rma.is_formed() {
                IndicatorResult::formed(c.time, value)
            } else {
                IndicatorResult::empty(c.time)
            };
        }
    })
}
