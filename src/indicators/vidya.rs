//! # Variable Index Dynamic Average (VIDYA)
//!
//! EMA whose alpha is scaled by the absolute Chande Momentum Oscillator of
//! the last `length` bars.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VidyaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for VidyaParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn vidya_batch(
    series: &[Vec<Candle>],
    params: &[VidyaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, vidya_kernel)
}

fn vidya_kernel(bars: &[Candle], prm: &VidyaParams, out: &mut [IndicatorResult]) {
    let length = prm.length.max(1);
    let alpha = 2.0 / (length as f32 + 1.0);

    let mut vidya = 0.0f32;
    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        if i < length {
            vidya = price;
            out[i] = IndicatorResult::empty(c.time);
            continue;
        }

        let mut up = 0.0f32;
        let mut down = 0.0f32;
        for j in i + 1 - length..=i {
            let delta =
                extract_price(&bars[j], prm.price) - extract_price(&bars[j - 1], prm.price);
            if delta > 0.0 {
                up += delta;
            } else {
                down -= delta;
            }
        }
        let total = up + down;
        let cmo = if total == 0.0 {
            0.0
        } else {
            ((up - down) / total).abs()
        };

        vidya = price * alpha * cmo + vidya * (1.0 - alpha * cmo);

        // A computed zero is reported as empty/not-yet-valid here. Worth
        // confirming against the canonical definition before relying on
        // bar-exact warm-up edges.
        if vidya == 0.0 {
            out[i] = IndicatorResult::empty(c.time);
        } else {
            out[i] = IndicatorResult::formed(c.time, vidya);
        }
    }
}
