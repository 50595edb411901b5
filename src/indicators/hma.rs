//! # Hull Moving Average (HMA)
//!
//! `wma(2*wma(n/2) - wma(n), sqrt(n))`. Scan shape with a scratch buffer of
//! de-lagged WMA values, the same shape as the output, that the final WMA
//! window reads back.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::wma::wma_at;
use crate::utilities::candle::{Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HmaParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for HmaParams {
    fn default() -> Self {
        Self {
            length: 16,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn hma_batch(
    series: &[Vec<Candle>],
    params: &[HmaParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, hma_kernel)
}

fn hma_kernel(bars: &[Candle], prm: &HmaParams, out: &mut [IndicatorResult]) {
    let length = prm.length.max(1);
    let half = (length / 2).max(1);
    let sqrt_len = ((length as f32).sqrt().round() as usize).max(1);

    let mut raw = vec![f32::NAN; bars.len()];
    for (i, c) in bars.iter().enumerate() {
        let full = wma_at(bars, length, prm.price, i);
        let short = wma_at(bars, half, prm.price, i);
        if full.is_formed {
            raw[i] = 2.0 * short.value - full.value;
        }

        // Final smoothing needs sqrt_len raw values ending at i.
        let mut value = f32::NAN;
        let mut formed = false;
        if i + 1 >= length + sqrt_len - 1 {
            let denom = (sqrt_len * (sqrt_len + 1)) as f32 / 2.0;
            let mut num = 0.0f32;
            for k in 0..sqrt_len {
                num += (sqrt_len - k) as f32 * raw[i - k];
            }
            value = num / denom;
            formed = true;
        }
        out[i] = IndicatorResult {
            time: c.time,
            value,
            is_formed: formed,
        };
    }
}
