//! # Klinger Volume Oscillator (KVO)
//!
//! Fast minus slow EMA of signed volume force, where the sign follows the
//! typical-price trend direction.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KvoParams {
    pub fast_length: usize,
    pub slow_length: usize,
}

impl Default for KvoParams {
    fn default() -> Self {
        Self {
            fast_length: 34,
            slow_length: 55,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn kvo_batch(
    series: &[Vec<Candle>],
    params: &[KvoParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, kvo_kernel)
}

fn kvo_kernel(bars: &[Candle], prm: &KvoParams, out: &mut [IndicatorResult]) {
    let mut fast = EmaState::new(prm.fast_length);
    let mut slow = EmaState::new(prm.slow_length);

    for (i, c) in bars.iter().enumerate() {
        let mut r = IndicatorResult::empty(c.time);
        if i > 0 {
            let tp = extract_price(c, PriceKind::Typical);
            let prev_tp = extract_price(&bars[i - 1], PriceKind::Typical);
            let force = if tp > prev_tp { c.volume } else { -c.volume };
            let f = fast.update(force);
            let s = slow.update(force);
            if fast.is_formed() && slow.is_formed() {
                r = IndicatorResult::formed(c.time, f - s);
            }
        }
        out[i] = r;
    }
}
