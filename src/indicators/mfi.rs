//! # Money Flow Index (MFI)
//!
//! Volume-weighted RSI of the typical price. Zero negative flow resolves
//! to 100; zero total flow resolves to 50.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MfiParams {
    pub length: usize,
}

impl Default for MfiParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn mfi_batch(
    series: &[Vec<Candle>],
    params: &[MfiParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let mut positive = 0.0f32;
        let mut negative = 0.0f32;
        for j in i + 1 - length..=i {
            let tp = extract_price(&bars[j], PriceKind::Typical);
            let prev_tp = extract_price(&bars[j - 1], PriceKind::Typical);
            let flow = tp * bars[j].volume;
            if tp > prev_tp {
                positive += flow;
            } else if tp < prev_tp {
                negative += flow;
            }
        }
        let value = if negative == 0.0 && positive == 0.0 {
            50.0
        } else if negative == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + positive / negative)
        };
        IndicatorResult::formed(time, value)
    })
}
