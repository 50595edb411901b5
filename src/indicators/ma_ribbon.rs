//! # Moving Average Ribbon
//!
//! A chain of SMAs evaluated in sequence: the first averages candle prices,
//! each later line averages the previous line's output, skipping bars where
//! that line had not produced a value yet. Window lengths are spread evenly
//! between `short_period` and `long_period`.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

pub const MAX_RIBBON_COUNT: usize = 32;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MaRibbonParams {
    pub short_period: usize,
    pub long_period: usize,
    pub ribbon_count: usize,
    pub price: PriceKind,
}

impl Default for MaRibbonParams {
    fn default() -> Self {
        Self {
            short_period: 10,
            long_period: 100,
            ribbon_count: 10,
            price: PriceKind::Close,
        }
    }
}

/// One bar of ribbon output. Only the first `count` slots are meaningful.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MaRibbonResult {
    pub time: i64,
    pub averages: [f32; MAX_RIBBON_COUNT],
    pub count: usize,
    pub is_formed: bool,
}

impl Default for MaRibbonResult {
    fn default() -> Self {
        Self {
            time: 0,
            averages: [f32::NAN; MAX_RIBBON_COUNT],
            count: 0,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ma_ribbon_batch(
    series: &[Vec<Candle>],
    params: &[MaRibbonParams],
) -> Result<Vec<Vec<Vec<MaRibbonResult>>>, BatchError> {
    scan_batch(series, params, ma_ribbon_kernel)
}

fn ma_ribbon_kernel(bars: &[Candle], prm: &MaRibbonParams, out: &mut [MaRibbonResult]) {
    let count = prm.ribbon_count.min(MAX_RIBBON_COUNT);
    let step = if count > 1 {
        (prm.long_period as isize - prm.short_period as isize) / (count as isize - 1)
    } else {
        0
    };

    for (i, c) in bars.iter().enumerate() {
        out[i] = MaRibbonResult {
            time: c.time,
            count,
            ..MaRibbonResult::default()
        };
    }

    // Previous line's per-bar output, NaN where it had no value.
    let mut scratch = vec![f32::NAN; bars.len()];

    for ribbon_idx in 0..count {
        let sma_length =
            ((prm.short_period as isize + ribbon_idx as isize * step).max(1)) as usize;
        let mut valid_count = 0usize;

        for i in 0..bars.len() {
            if ribbon_idx == 0 {
                valid_count += 1;
            } else {
                if scratch[i].is_nan() {
                    continue;
                }
                valid_count += 1;
            }

            if valid_count >= sma_length {
                let sum: f32 = if ribbon_idx == 0 {
                    (0..sma_length)
                        .map(|j| extract_price(&bars[i - j], prm.price))
                        .sum()
                } else {
                    // Last sma_length valid entries of the previous line,
                    // walking backwards past its warm-up gaps.
                    let mut acc = 0.0;
                    let mut found = 0;
                    for j in (0..=i).rev() {
                        if !scratch[j].is_nan() {
                            acc += scratch[j];
                            found += 1;
                            if found == sma_length {
                                break;
                            }
                        }
                    }
                    acc
                };
                out[i].averages[ribbon_idx] = sum / sma_length as f32;
            }
        }

        for i in 0..bars.len() {
            scratch[i] = out[i].averages[ribbon_idx];
        }
    }

    // Formed lags the bar where every line first has a value by one.
    let mut prev_formed = false;
    for r in out.iter_mut() {
        let all_formed = r.averages[..count].iter().all(|v| !v.is_nan());
        r.is_formed = prev_formed;
        prev_formed = all_formed;
    }
}
