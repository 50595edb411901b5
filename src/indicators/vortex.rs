//! # Vortex Indicator (+VI / -VI)
//!
//! Window sums of cross-bar movement against the true range sum. A zero
//! true range sum resolves both lines to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::indicators::true_range::true_range_at;
use crate::utilities::candle::Candle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VortexParams {
    pub length: usize,
}

impl Default for VortexParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VortexResult {
    pub time: i64,
    pub plus_vi: f32,
    pub minus_vi: f32,
    pub is_formed: bool,
}

impl Default for VortexResult {
    fn default() -> Self {
        Self {
            time: 0,
            plus_vi: f32::NAN,
            minus_vi: f32::NAN,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn vortex_batch(
    series: &[Vec<Candle>],
    params: &[VortexParams],
) -> Result<Vec<Vec<Vec<VortexResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return VortexResult {
                time,
                ..VortexResult::default()
            };
        }
        let mut vm_plus = 0.0f32;
        let mut vm_minus = 0.0f32;
        let mut tr_sum = 0.0f32;
        for j in i + 1 - length..=i {
            vm_plus += (bars[j].high - bars[j - 1].low).abs();
            vm_minus += (bars[j].low - bars[j - 1].high).abs();
            tr_sum += true_range_at(bars, j);
        }
        let (plus_vi, minus_vi) = if tr_sum == 0.0 {
            (0.0, 0.0)
        } else {
            (vm_plus / tr_sum, vm_minus / tr_sum)
        };
        VortexResult {
            time,
            plus_vi,
            minus_vi,
            is_formed: true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptrend_puts_plus_above_minus() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect();
        let out = &vortex_batch(&[bars], &[VortexParams::default()]).unwrap()[0][0];
        assert!(!out[13].is_formed);
        assert!(out[14].is_formed);
        let r = out[30];
        assert!(r.plus_vi > r.minus_vi);
    }

    #[test]
    fn degenerate_candles_read_zero() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64, 5.0, 5.0, 5.0, 5.0, 1.0))
            .collect();
        let out = &vortex_batch(&[bars], &[VortexParams::default()]).unwrap()[0][0];
        assert_eq!(out[20].plus_vi, 0.0);
        assert_eq!(out[20].minus_vi, 0.0);
    }
}
