//! # Volume Oscillator (VOSC)
//!
//! Percentage spread between a fast and a slow SMA of volume. A zero slow
//! average resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VoscParams {
    pub fast_length: usize,
    pub slow_length: usize,
}

impl Default for VoscParams {
    fn default() -> Self {
        Self {
            fast_length: 5,
            slow_length: 10,
        }
    }
}

fn volume_sma(bars: &[Candle], length: usize, i: usize) -> f32 {
    bars[i + 1 - length..=i].iter().map(|c| c.volume).sum::<f32>() / length as f32
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn vosc_batch(
    series: &[Vec<Candle>],
    params: &[VoscParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let fast = prm.fast_length.max(1);
        let slow = prm.slow_length.max(1);
        let time = bars[i].time;
        if i + 1 < fast.max(slow) {
            return IndicatorResult::empty(time);
        }
        let f = volume_sma(bars, fast, i);
        let s = volume_sma(bars, slow, i);
        let value = if s == 0.0 { 0.0 } else { 100.0 * (f - s) / s };
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_volume_reads_positive() {
        let bars: Vec<Candle> = (0..20)
            .map(|i| Candle::new(i as i64, 10.0, 10.0, 10.0, 10.0, 100.0 + 10.0 * i as f32))
            .collect();
        let out = &vosc_batch(&[bars], &[VoscParams::default()]).unwrap()[0][0];
        assert!(!out[8].is_formed);
        assert!(out[9].is_formed);
        assert!(out[15].value > 0.0);
    }

    #[test]
    fn zero_volume_falls_back_to_zero() {
        let bars: Vec<Candle> = (0..20)
            .map(|i| Candle::new(i as i64, 10.0, 10.0, 10.0, 10.0, 0.0))
            .collect();
        let out = &vosc_batch(&[bars], &[VoscParams::default()]).unwrap()[0][0];
        assert_eq!(out[15].value, 0.0);
    }
}
