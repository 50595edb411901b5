//! # Parabolic SAR
//!
//! Trailing stop-and-reverse state machine. The acceleration factor grows
//! by `step` on every new extreme up to `max_step` and resets on reversal.
//! The SAR is clamped by the prior two bars' extremes before comparison.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PsarParams {
    pub step: f32,
    pub max_step: f32,
}

impl Default for PsarParams {
    fn default() -> Self {
        Self {
            step: 0.02,
            max_step: 0.2,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn psar_batch(
    series: &[Vec<Candle>],
    params: &[PsarParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, psar_kernel)
}

fn psar_kernel(bars: &[Candle], prm: &PsarParams, out: &mut [IndicatorResult]) {
    if bars.is_empty() {
        return;
    }
    out[0] = IndicatorResult::empty(bars[0].time);
    if bars.len() == 1 {
        return;
    }

    // Seed direction from the second bar's close.
    let mut long = bars[1].close >= bars[0].close;
    let mut sar = if long { bars[0].low } else { bars[0].high };
    let mut extreme = if long { bars[0].high } else { bars[0].low };
    let mut af = prm.step;

    for i in 1..bars.len() {
        let c = &bars[i];

        sar += af * (extreme - sar);
        if long {
            sar = sar.min(bars[i - 1].low);
            if i >= 2 {
                sar = sar.min(bars[i - 2].low);
            }
            if c.low < sar {
                // Reverse to short at the prior extreme.
                long = false;
                sar = extreme;
                extreme = c.low;
                af = prm.step;
            } else if c.high > extreme {
                extreme = c.high;
                af = (af + prm.step).min(prm.max_step);
            }
        } else {
            sar = sar.max(bars[i - 1].high);
            if i >= 2 {
                sar = sar.max(bars[i - 2].high);
            }
            if c.high > sar {
                long = true;
                sar = extreme;
                extreme = c.high;
                af = prm.step;
            } else if c.low < extreme {
                extreme = c.low;
                af = (af + prm.step).min(prm.max_step);
            }
        }

        out[i] = IndicatorResult::formed(c.time, sar);
    }
}
