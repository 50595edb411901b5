//! # Know Sure Thing (KST)
//!
//! Weighted sum of four SMA-smoothed ROC streams plus a signal SMA over the
//! KST line itself. ROC lookbacks clamp to bar 0 while history is short, and
//! a zero base price poisons the bar to NaN.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KstParams {
    pub roc1_length: usize,
    pub roc2_length: usize,
    pub roc3_length: usize,
    pub roc4_length: usize,
    pub sma1_length: usize,
    pub sma2_length: usize,
    pub sma3_length: usize,
    pub sma4_length: usize,
    pub signal_length: usize,
    pub price: PriceKind,
}

impl Default for KstParams {
    fn default() -> Self {
        Self {
            roc1_length: 10,
            roc2_length: 15,
            roc3_length: 20,
            roc4_length: 30,
            sma1_length: 10,
            sma2_length: 10,
            sma3_length: 10,
            sma4_length: 15,
            signal_length: 9,
            price: PriceKind::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KstResult {
    pub time: i64,
    pub kst: f32,
    pub signal: f32,
    pub is_formed: bool,
}

impl Default for KstResult {
    fn default() -> Self {
        Self {
            time: 0,
            kst: f32::NAN,
            signal: f32::NAN,
            is_formed: false,
        }
    }
}

fn roc_at(bars: &[Candle], i: usize, roc_length: usize, price: PriceKind) -> f32 {
    let current = extract_price(&bars[i], price);
    let prev_idx = i.saturating_sub(roc_length);
    let previous = extract_price(&bars[prev_idx], price);
    if previous == 0.0 {
        return f32::NAN;
    }
    (current - previous) / previous * 100.0
}

fn sma_of_roc(
    bars: &[Candle],
    i: usize,
    roc_length: usize,
    sma_length: usize,
    price: PriceKind,
) -> f32 {
    let mut sum = 0.0f32;
    let mut has_value = false;
    for j in 0..sma_length {
        let Some(roc_idx) = i.checked_sub(j) else {
            continue;
        };
        let roc = roc_at(bars, roc_idx, roc_length, price);
        if roc.is_nan() {
            return f32::NAN;
        }
        sum += roc;
        has_value = true;
    }
    if has_value {
        sum / sma_length as f32
    } else {
        f32::NAN
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn kst_batch(
    series: &[Vec<Candle>],
    params: &[KstParams],
) -> Result<Vec<Vec<Vec<KstResult>>>, BatchError> {
    scan_batch(series, params, kst_kernel)
}

fn kst_kernel(bars: &[Candle], prm: &KstParams, out: &mut [KstResult]) {
    let roc_lens = [
        prm.roc1_length.max(1),
        prm.roc2_length.max(1),
        prm.roc3_length.max(1),
        prm.roc4_length.max(1),
    ];
    let sma_lens = [
        prm.sma1_length.max(1),
        prm.sma2_length.max(1),
        prm.sma3_length.max(1),
        prm.sma4_length.max(1),
    ];
    let signal_len = prm.signal_length.max(1);

    let kst_start = roc_lens[3] + sma_lens[3] - 1;
    let formed_index = kst_start + signal_len - 1;

    for (i, c) in bars.iter().enumerate() {
        let mut r = KstResult {
            time: c.time,
            ..KstResult::default()
        };
        if i < kst_start {
            out[i] = r;
            continue;
        }

        let mut smas = [0.0f32; 4];
        let mut poisoned = false;
        for k in 0..4 {
            smas[k] = sma_of_roc(bars, i, roc_lens[k], sma_lens[k], prm.price);
            if smas[k].is_nan() {
                poisoned = true;
                break;
            }
        }
        if poisoned {
            out[i] = r;
            continue;
        }

        let kst = smas[0] + 2.0 * smas[1] + 3.0 * smas[2] + 4.0 * smas[3];
        r.kst = kst;

        // Signal SMA over prior KST outputs already written to this row,
        // dividing by the full signal length even over a partial warm-up.
        let mut sum = 0.0f32;
        let mut has_value = false;
        let mut signal = f32::NAN;
        for j in 0..signal_len {
            let idx = i - j;
            if idx < kst_start {
                continue;
            }
            let value = if idx == i { kst } else { out[idx].kst };
            if value.is_nan() {
                sum = f32::NAN;
                break;
            }
            sum += value;
            has_value = true;
        }
        if has_value && !sum.is_nan() {
            signal = sum / signal_len as f32;
        }
        r.signal = signal;
        r.is_formed = !signal.is_nan() && i >= formed_index;
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 100.0 + i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn forms_after_slowest_chain_plus_signal() {
        let out = &kst_batch(&[ramp(120)], &[KstParams::default()]).unwrap()[0][0];
        // roc4 30 + sma4 15 - 1 = 44, + signal 9 - 1 = 52.
        assert!(out[43].kst.is_nan());
        assert!(!out[44].kst.is_nan());
        assert!(!out[51].is_formed);
        assert!(out[52].is_formed);
    }

    #[test]
    fn uptrend_keeps_kst_above_signal_warmup_aside() {
        let out = &kst_batch(&[ramp(120)], &[KstParams::default()]).unwrap()[0][0];
        let r = out[100];
        assert!(r.kst > 0.0);
        assert!(r.signal > 0.0);
    }

    #[test]
    fn signal_divides_by_full_length_during_partial_window() {
        let out = &kst_batch(&[ramp(120)], &[KstParams::default()]).unwrap()[0][0];
        // First KST bar: signal is kst / signal_length.
        let first = out.iter().position(|r| !r.kst.is_nan()).unwrap();
        assert!((out[first].signal - out[first].kst / 9.0).abs() < 1e-4);
    }
}
