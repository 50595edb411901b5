//! # Ultimate Oscillator
//!
//! Weighted blend of buying-pressure over true-range ratios on three
//! nested windows (7/14/28 by default, weights 4/2/1). A zero true-range
//! sum in any window resolves the whole bar to 50.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UltimateParams {
    pub short_length: usize,
    pub mid_length: usize,
    pub long_length: usize,
}

impl Default for UltimateParams {
    fn default() -> Self {
        Self {
            short_length: 7,
            mid_length: 14,
            long_length: 28,
        }
    }
}

fn bp_tr_ratio(bars: &[Candle], length: usize, i: usize) -> Option<f32> {
    let mut bp_sum = 0.0f32;
    let mut tr_sum = 0.0f32;
    for j in i + 1 - length..=i {
        let c = &bars[j];
        let prev_close = bars[j - 1].close;
        let true_low = c.low.min(prev_close);
        let true_high = c.high.max(prev_close);
        bp_sum += c.close - true_low;
        tr_sum += true_high - true_low;
    }
    if tr_sum == 0.0 {
        None
    } else {
        Some(bp_sum / tr_sum)
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ultimate_batch(
    series: &[Vec<Candle>],
    params: &[UltimateParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let short = prm.short_length.max(1);
        let mid = prm.mid_length.max(1);
        let long = prm.long_length.max(1);
        let time = bars[i].time;
        // Previous close is needed for the oldest bar of the longest window.
        if i < short.max(mid).max(long) {
            return IndicatorResult::empty(time);
        }
        let value = match (
            bp_tr_ratio(bars, short, i),
            bp_tr_ratio(bars, mid, i),
            bp_tr_ratio(bars, long, i),
        ) {
            (Some(a), Some(b), Some(c)) => 100.0 * (4.0 * a + 2.0 * b + c) / 7.0,
            _ => 50.0,
        };
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_at_true_high_reads_100() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c - 1.0, c, c - 1.0, c, 1.0)
            })
            .collect();
        let out = &ultimate_batch(&[bars], &[UltimateParams::default()]).unwrap()[0][0];
        assert!(!out[27].is_formed);
        assert!(out[28].is_formed);
        assert!((out[35].value - 100.0).abs() < 1e-3);
    }

    #[test]
    fn flat_candles_fall_back_to_50() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64, 5.0, 5.0, 5.0, 5.0, 1.0))
            .collect();
        let out = &ultimate_batch(&[bars], &[UltimateParams::default()]).unwrap()[0][0];
        assert_eq!(out[30].value, 50.0);
    }
}
