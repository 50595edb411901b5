//! # True Strength Index (TSI)
//!
//! Double-smoothed price momentum over double-smoothed absolute momentum,
//! scaled to [-100, 100]. Zero smoothed absolute momentum resolves to 0.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TsiParams {
    pub long_length: usize,
    pub short_length: usize,
    pub price: PriceKind,
}

impl Default for TsiParams {
    fn default() -> Self {
        Self {
            long_length: 25,
            short_length: 13,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn tsi_batch(
    series: &[Vec<Candle>],
    params: &[TsiParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, tsi_kernel)
}

fn tsi_kernel(bars: &[Candle], prm: &TsiParams, out: &mut [IndicatorResult]) {
    let mut mom_long = EmaState::new(prm.long_length);
    let mut mom_short = EmaState::new(prm.short_length);
    let mut abs_long = EmaState::new(prm.long_length);
    let mut abs_short = EmaState::new(prm.short_length);
    let mut prev = f32::NAN;

    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        let mut r = IndicatorResult::empty(c.time);
        if !prev.is_nan() {
            let delta = price - prev;
            let ml = mom_long.update(delta);
            let al = abs_long.update(delta.abs());
            if mom_long.is_formed() {
                let ms = mom_short.update(ml);
                let as_ = abs_short.update(al);
                if mom_short.is_formed() {
                    let value = if as_ == 0.0 { 0.0 } else { 100.0 * ms / as_ };
                    r = IndicatorResult::formed(c.time, value);
                }
            }
        }
        prev = price;
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_closes(closes: &[f32]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 1.0))
            .collect()
    }

    #[test]
    fn steady_rise_saturates_at_100() {
        let bars = from_closes(&(0..80).map(|i| i as f32).collect::<Vec<_>>());
        let out = &tsi_batch(&[bars], &[TsiParams::default()]).unwrap()[0][0];
        let last = out.last().unwrap();
        assert!(last.is_formed);
        assert!((last.value - 100.0).abs() < 1e-3);
    }

    #[test]
    fn flat_input_is_zero() {
        let bars = from_closes(&[10.0; 80]);
        let out = &tsi_batch(&[bars], &[TsiParams::default()]).unwrap()[0][0];
        let last = out.last().unwrap();
        assert!(last.is_formed);
        assert_eq!(last.value, 0.0);
    }
}
