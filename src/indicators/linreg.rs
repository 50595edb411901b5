//! # Moving Linear Regression
//!
//! Endpoint of the least-squares line fitted over the window ending at the
//! current bar. Sums are recomputed per bar; bars are independent.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LinRegParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for LinRegParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Least-squares slope and intercept over the window ending at `i`, with x
/// running 0..length. Shared with the slope variant.
pub(crate) fn fit_at(
    bars: &[Candle],
    length: usize,
    price: PriceKind,
    i: usize,
) -> Option<(f32, f32)> {
    let length = length.max(1);
    if i + 1 < length {
        return None;
    }
    let n = length as f32;
    let mut sum_y = 0.0f32;
    let mut sum_xy = 0.0f32;
    for k in 0..length {
        let y = extract_price(&bars[i + 1 - length + k], price);
        sum_y += y;
        sum_xy += k as f32 * y;
    }
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_x2 = (n - 1.0) * n * (2.0 * n - 1.0) / 6.0;
    let denom = n * sum_x2 - sum_x * sum_x;
    // Window of one bar: horizontal line through it.
    if denom == 0.0 {
        return Some((0.0, sum_y / n));
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn linreg_batch(
    series: &[Vec<Candle>],
    params: &[LinRegParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match fit_at(bars, prm.length, prm.price, i) {
            Some((slope, intercept)) => {
                let n = prm.length.max(1) as f32;
                IndicatorResult::formed(time, intercept + slope * (n - 1.0))
            }
            None => IndicatorResult::empty(time),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_on_linear_data() {
        let closes: Vec<Candle> = (0..20)
            .map(|i| {
                let c = 3.0 + 2.0 * i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &linreg_batch(&[closes.clone()], &[LinRegParams::default()]).unwrap()[0][0];
        for (i, r) in out.iter().enumerate().skip(13) {
            assert!((r.value - closes[i].close).abs() < 1e-3);
        }
    }
}
