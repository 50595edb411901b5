//! # Aroon Oscillator
//!
//! Aroon up minus Aroon down, in [-100, 100].

use crate::batch::{windowed_batch, BatchError};
use crate::indicators::aroon::aroon_at;
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AroonOscParams {
    pub length: usize,
}

impl Default for AroonOscParams {
    fn default() -> Self {
        Self { length: 25 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn aroon_osc_batch(
    series: &[Vec<Candle>],
    params: &[AroonOscParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match aroon_at(bars, prm.length.max(1), i) {
            Some((up, down)) => IndicatorResult::formed(time, up - down),
            None => IndicatorResult::empty(time),
        }
    })
}
