//! # Chaikin A/D Oscillator
//!
//! Fast EMA minus slow EMA of the accumulation/distribution line.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::ad::money_flow_volume;
use crate::utilities::candle::Candle;
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AdOscParams {
    pub fast_length: usize,
    pub slow_length: usize,
}

impl Default for AdOscParams {
    fn default() -> Self {
        Self {
            fast_length: 3,
            slow_length: 10,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn adosc_batch(
    series: &[Vec<Candle>],
    params: &[AdOscParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &AdOscParams, out| {
        let mut fast = EmaState::new(prm.fast_length);
        let mut slow = EmaState::new(prm.slow_length);
        let mut ad = 0.0f32;
        for (i, c) in bars.iter().enumerate() {
            ad += money_flow_volume(c);
            let f = fast.update(ad);
            let s = slow.update(ad);
            out[i] = if fast.is_formed() && slow.is_formed() {
                IndicatorResult::formed(c.time, f - s)
            } else {
                IndicatorResult::empty(c.time)
            };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_accumulation_reads_positive() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| {
                let c = 10.0 + i as f32;
                // Close pinned at the high: pure accumulation.
                Candle::new(i as i64, c - 1.0, c, c - 1.0, c, 100.0)
            })
            .collect();
        let out = &adosc_batch(&[bars], &[AdOscParams::default()]).unwrap()[0][0];
        assert!(!out[8].is_formed);
        assert!(out[9].is_formed);
        assert!(out[20].value > 0.0);
    }
}
