//! # Chaikin Money Flow (CMF)
//!
//! Sum of money flow volume over the window divided by the volume total.
//! Zero total volume resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::indicators::ad::money_flow_volume;
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CmfParams {
    pub length: usize,
}

impl Default for CmfParams {
    fn default() -> Self {
        Self { length: 20 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn cmf_batch(
    series: &[Vec<Candle>],
    params: &[CmfParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let window = &bars[i + 1 - length..=i];
        let flow: f32 = window.iter().map(money_flow_volume).sum();
        let volume: f32 = window.iter().map(|c| c.volume).sum();
        let value = if volume == 0.0 { 0.0 } else { flow / volume };
        IndicatorResult::formed(time, value)
    })
}
