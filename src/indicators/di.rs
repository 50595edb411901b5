//! # Directional Indicators (+DI / -DI)
//!
//! Wilder-smoothed directional movement as a percentage of the smoothed
//! true range. Zero smoothed range resolves both lines to 0.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::true_range::true_range_at;
use crate::utilities::candle::Candle;
use crate::utilities::math::WilderState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DiParams {
    pub length: usize,
}

impl Default for DiParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DiResult {
    pub time: i64,
    pub plus_di: f32,
    pub minus_di: f32,
    pub is_formed: bool,
}

impl Default for DiResult {
    fn default() -> Self {
        Self {
            time: 0,
            plus_di: f32::NAN,
            minus_di: f32::NAN,
            is_formed: false,
        }
    }
}

/// Smoothed +DI/-DI streams shared with the DX and ADX kernels. The first
/// bar has no directional movement and only primes the smoothers.
pub(crate) struct DiState {
    plus_dm: WilderState,
    minus_dm: WilderState,
    tr: WilderState,
}

impl DiState {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            plus_dm: WilderState::new(length),
            minus_dm: WilderState::new(length),
            tr: WilderState::new(length),
        }
    }

    /// Returns `(plus_di, minus_di)` once formed.
    pub(crate) fn update(&mut self, bars: &[Candle], i: usize) -> Option<(f32, f32)> {
        if i == 0 {
            return None;
        }
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;
        let plus = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        let p = self.plus_dm.update(plus);
        let m = self.minus_dm.update(minus);
        let tr = self.tr.update(true_range_at(bars, i));

        if !self.tr.is_formed() {
            return None;
        }
        if tr == 0.0 {
            return Some((0.0, 0.0));
        }
        Some((100.0 * p / tr, 100.0 * m / tr))
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn di_batch(
    series: &[Vec<Candle>],
    params: &[DiParams],
) -> Result<Vec<Vec<Vec<DiResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &DiParams, out| {
        let mut state = DiState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            out[i] = match state.update(bars, i) {
                Some((plus_di, minus_di)) => DiResult {
                    time: c.time,
                    plus_di,
                    minus_di,
                    is_formed: true,
                },
                None => DiResult {
                    time: c.time,
                    ..DiResult::default()
                },
            };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn uptrend(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c, c + 1.0, c - 0.5, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn uptrend_favours_plus_di() {
        let out = &di_batch(&[uptrend(40)], &[DiParams::default()]).unwrap()[0][0];
        assert!(!out[13].is_formed);
        assert!(out[14].is_formed);
        let r = out[30];
        assert!(r.plus_di > r.minus_di);
        assert_eq!(r.minus_di, 0.0);
    }
}
