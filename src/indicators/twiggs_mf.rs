//! # Twiggs Money Flow
//!
//! Money flow built on true-range extremes instead of the raw bar range,
//! with Wilder smoothing applied to both the flow and the volume before the
//! ratio is taken.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::math::WilderState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TwiggsMfParams {
    pub length: usize,
}

impl Default for TwiggsMfParams {
    fn default() -> Self {
        Self { length: 21 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn twiggs_mf_batch(
    series: &[Vec<Candle>],
    params: &[TwiggsMfParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, twiggs_mf_kernel)
}

fn twiggs_mf_kernel(bars: &[Candle], prm: &TwiggsMfParams, out: &mut [IndicatorResult]) {
    let mut flow = WilderState::new(prm.length);
    let mut volume = WilderState::new(prm.length);

    for (i, c) in bars.iter().enumerate() {
        let mut r = IndicatorResult::empty(c.time);
        if i > 0 {
            let prev_close = bars[i - 1].close;
            let true_low = c.low.min(prev_close);
            let true_high = c.high.max(prev_close);
            let range = true_high - true_low;
            let ad = if range == 0.0 {
                0.0
            } else {
                ((c.close - true_low) - (true_high - c.close)) / range * c.volume
            };
            let f = flow.update(ad);
            let v = volume.update(c.volume);
            if flow.is_formed() && volume.is_formed() && v != 0.0 {
                let value = f / v;
                // A computed zero is reported as empty/not-yet-valid here.
                // Worth confirming against the canonical definition before
                // relying on bar-exact warm-up edges.
                if value != 0.0 {
                    r = IndicatorResult::formed(c.time, value);
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
    fn accumulation_reads_positive() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c - 1.0, c, c - 1.0, c, 100.0)
            })
            .collect();
        let out = &twiggs_mf_batch(&[bars], &[TwiggsMfParams::default()]).unwrap()[0][0];
        assert!(!out[20].is_formed);
        assert!(out[21].is_formed);
        assert!(out[30].value > 0.0 && out[30].value <= 1.0);
    }

    #[test]
    fn exact_zero_flow_reported_as_empty() {
        // Closes pinned mid-range make every bar's flow zero.
        let bars: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64, 10.0, 11.0, 9.0, 10.0, 100.0))
            .collect();
        let out = &twiggs_mf_batch(&[bars], &[TwiggsMfParams::default()]).unwrap()[0][0];
        assert!(out.iter().all(|r| !r.is_formed));
    }
}
