//! # Stochastic Oscillator
//!
//! Raw %K from the close's position in the rolling high/low range, then an
//! SMA-smoothed %K and a %D SMA over that. A degenerate range resolves
//! to 50.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StochasticParams {
    pub k_length: usize,
    pub k_smooth: usize,
    pub d_length: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_length: 14,
            k_smooth: 3,
            d_length: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StochasticResult {
    pub time: i64,
    pub k: f32,
    pub d: f32,
    pub is_formed: bool,
}

impl Default for StochasticResult {
    fn default() -> Self {
        Self {
            time: 0,
            k: f32::NAN,
            d: f32::NAN,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn stochastic_batch(
    series: &[Vec<Candle>],
    params: &[StochasticParams],
) -> Result<Vec<Vec<Vec<StochasticResult>>>, BatchError> {
    scan_batch(series, params, stochastic_kernel)
}

fn raw_k(bars: &[Candle], length: usize, i: usize) -> f32 {
    if i + 1 < length {
        return f32::NAN;
    }
    let window = &bars[i + 1 - length..=i];
    let highest = window.iter().fold(f32::NEG_INFINITY, |m, c| m.max(c.high));
    let lowest = window.iter().fold(f32::INFINITY, |m, c| m.min(c.low));
    let range = highest - lowest;
    if range == 0.0 {
        50.0
    } else {
        100.0 * (bars[i].close - lowest) / range
    }
}

fn stochastic_kernel(bars: &[Candle], prm: &StochasticParams, out: &mut [StochasticResult]) {
    let k_length = prm.k_length.max(1);
    let k_smooth = prm.k_smooth.max(1);
    let d_length = prm.d_length.max(1);

    let mut raw = vec![f32::NAN; bars.len()];
    let mut smooth_k = vec![f32::NAN; bars.len()];

    for (i, c) in bars.iter().enumerate() {
        raw[i] = raw_k(bars, k_length, i);

        let mut r = StochasticResult {
            time: c.time,
            ..StochasticResult::default()
        };

        if i + 1 >= k_length + k_smooth - 1 {
            let k: f32 = raw[i + 1 - k_smooth..=i].iter().sum::<f32>() / k_smooth as f32;
            smooth_k[i] = k;
            r.k = k;
            if i + 1 >= k_length + k_smooth + d_length - 2 {
                let d: f32 =
                    smooth_k[i + 1 - d_length..=i].iter().sum::<f32>() / d_length as f32;
                r.d = d;
                r.is_formed = true;
            }
        }
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = i as f32;
                Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn warmup_stacks_all_three_windows() {
        let out = &stochastic_batch(&[ramp(40)], &[StochasticParams::default()]).unwrap()[0][0];
        // k at 14+3-1=16 bars, d two bars later.
        assert!(out[14].k.is_nan());
        assert!(!out[15].k.is_nan());
        assert!(!out[17].is_formed);
        assert!(out[18].is_formed);
    }

    #[test]
    fn flat_range_reads_50() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64, 5.0, 5.0, 5.0, 5.0, 1.0))
            .collect();
        let out = &stochastic_batch(&[bars], &[StochasticParams::default()]).unwrap()[0][0];
        let r = out[30];
        assert_eq!(r.k, 50.0);
        assert_eq!(r.d, 50.0);
    }

    #[test]
    fn d_is_smoother_than_k() {
        let bars: Vec<Candle> = (0..60)
            .map(|i| {
                let c = 50.0 + 20.0 * ((i as f32) * 0.7).sin();
                Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect();
        let out = &stochastic_batch(&[bars], &[StochasticParams::default()]).unwrap()[0][0];
        let var = |f: fn(&StochasticResult) -> f32| {
            let vals: Vec<f32> = out[20..].iter().map(f).collect();
            let mean = vals.iter().sum::<f32>() / vals.len() as f32;
            vals.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / vals.len() as f32
        };
        assert!(var(|r| r.d) <= var(|r| r.k));
    }
}
