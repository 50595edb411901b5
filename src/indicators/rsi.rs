//! # Relative Strength Index (RSI)

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::RsiState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RsiParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn rsi_batch(
    series: &[Vec<Candle>],
    params: &[RsiParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &RsiParams, out| {
        let mut rsi = RsiState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let value = rsi.update(extract_price(c, prm.price));
            out[i] = if rsi.is_formed() {
                IndicatorResult::formed(c.time, value)
            } else {
                IndicatorResult::empty(c.time)
            };
        }
    })
}
