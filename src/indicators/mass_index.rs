//! # Mass Index
//!
//! Sum over `sum_length` bars of the ratio between a single and a double
//! EMA of the high/low spread. A zero double EMA skips the bar's ratio.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MassIndexParams {
    pub ema_length: usize,
    pub sum_length: usize,
}

impl Default for MassIndexParams {
    fn default() -> Self {
        Self {
            ema_length: 9,
            sum_length: 25,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn mass_index_batch(
    series: &[Vec<Candle>],
    params: &[MassIndexParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, mass_index_kernel)
}

fn mass_index_kernel(bars: &[Candle], prm: &MassIndexParams, out: &mut [IndicatorResult]) {
    let sum_length = prm.sum_length.max(1);
    let mut single = EmaState::new(prm.ema_length);
    let mut double = EmaState::new(prm.ema_length);
    let mut ratios = vec![f32::NAN; bars.len()];
    let mut ratio_count = 0usize;

    for (i, c) in bars.iter().enumerate() {
        let s = single.update(c.high - c.low);
        let mut r = IndicatorResult::empty(c.time);
        if single.is_formed() {
            let d = double.update(s);
            if double.is_formed() && d != 0.0 {
                ratios[i] = s / d;
                ratio_count += 1;
                if ratio_count >= sum_length {
                    let value: f32 = ratios[i + 1 - sum_length..=i].iter().sum();
                    if !value.is_nan() {
                        r = IndicatorResult::formed(c.time, value);
                    }
                }
            }
        }
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_spread_sums_to_window_length() {
        let bars: Vec<Candle> = (0..80)
            .map(|i| Candle::new(i as i64, 10.0, 12.0, 9.0, 10.0, 1.0))
            .collect();
        let out = &mass_index_batch(&[bars], &[MassIndexParams::default()]).unwrap()[0][0];
        // Single EMA at 8, double at 16, 25 ratios later: bar 40.
        assert!(!out[39].is_formed);
        assert!(out[40].is_formed);
        assert!((out[60].value - 25.0).abs() < 1e-3);
    }
}
