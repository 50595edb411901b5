//! # Constance Brown Composite Index
//!
//! Momentum of a Wilder RSI plus an SMA of a short RSI, with fast and slow
//! SMA overlays on the composite line. Both RSIs seed their previous price
//! from the first bar, so bar `i` consumes exactly `i` deltas.

use std::collections::VecDeque;

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConstanceBrownParams {
    pub rsi_length: usize,
    pub roc_length: usize,
    pub short_rsi_length: usize,
    pub momentum_length: usize,
    pub fast_sma_length: usize,
    pub slow_sma_length: usize,
    pub price: PriceKind,
}

impl Default for ConstanceBrownParams {
    fn default() -> Self {
        Self {
            rsi_length: 14,
            roc_length: 9,
            short_rsi_length: 3,
            momentum_length: 3,
            fast_sma_length: 13,
            slow_sma_length: 33,
            price: PriceKind::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConstanceBrownResult {
    pub time: i64,
    pub composite: f32,
    pub fast: f32,
    pub slow: f32,
    pub is_formed: bool,
}

impl Default for ConstanceBrownResult {
    fn default() -> Self {
        Self {
            time: 0,
            composite: f32::NAN,
            fast: f32::NAN,
            slow: f32::NAN,
            is_formed: false,
        }
    }
}

/// Wilder RSI whose previous price is primed with the series' first bar.
struct SeededRsi {
    length: usize,
    gain_sum: f32,
    loss_sum: f32,
    avg_gain: f32,
    avg_loss: f32,
}

impl SeededRsi {
    fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        }
    }

    /// `i` is the bar index; the caller supplies the delta from bar `i - 1`.
    fn update(&mut self, i: usize, delta: f32) -> f32 {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        let len = self.length as f32;

        if i <= self.length {
            self.gain_sum += gain;
            self.loss_sum += loss;
            if i == self.length {
                self.avg_gain = self.gain_sum / len;
                self.avg_loss = self.loss_sum / len;
            }
        } else {
            self.avg_gain = (self.avg_gain * (len - 1.0) + gain) / len;
            self.avg_loss = (self.avg_loss * (len - 1.0) + loss) / len;
        }

        if i < self.length {
            f32::NAN
        } else if self.avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
        }
    }
}

/// Rolling SMA over an optional input stream; NaN inputs are not offered.
struct RollingSma {
    length: usize,
    window: VecDeque<f32>,
    sum: f32,
}

impl RollingSma {
    fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            length,
            window: VecDeque::with_capacity(length),
            sum: 0.0,
        }
    }

    fn update(&mut self, x: f32) -> f32 {
        if self.window.len() == self.length {
            self.sum -= self.window.pop_front().unwrap_or(0.0);
        }
        self.window.push_back(x);
        self.sum += x;
        if self.window.len() >= self.length {
            self.sum / self.length as f32
        } else {
            f32::NAN
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn constance_brown_batch(
    series: &[Vec<Candle>],
    params: &[ConstanceBrownParams],
) -> Result<Vec<Vec<Vec<ConstanceBrownResult>>>, BatchError> {
    scan_batch(series, params, constance_brown_kernel)
}

fn constance_brown_kernel(
    bars: &[Candle],
    prm: &ConstanceBrownParams,
    out: &mut [ConstanceBrownResult],
) {
    let roc_len = prm.roc_length.max(1);

    let mut rsi = SeededRsi::new(prm.rsi_length);
    let mut short_rsi = SeededRsi::new(prm.short_rsi_length);

    // ROC ring over the RSI stream: the first difference appears only once
    // roc_len values have been buffered.
    let mut roc_window: VecDeque<f32> = VecDeque::with_capacity(roc_len);

    let mut momentum = RollingSma::new(prm.momentum_length);
    let mut fast_sma = RollingSma::new(prm.fast_sma_length);
    let mut slow_sma = RollingSma::new(prm.slow_sma_length);

    let mut prev_price = extract_price(&bars[0], prm.price);

    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        let mut r = ConstanceBrownResult {
            time: c.time,
            ..ConstanceBrownResult::default()
        };

        let (rsi_value, short_value) = if i > 0 {
            let delta = price - prev_price;
            (rsi.update(i, delta), short_rsi.update(i, delta))
        } else {
            (f32::NAN, f32::NAN)
        };
        prev_price = price;

        let mut rsi_roc = f32::NAN;
        if !rsi_value.is_nan() {
            if roc_window.len() < roc_len {
                roc_window.push_back(rsi_value);
            } else {
                let old = roc_window.pop_front().unwrap_or(rsi_value);
                rsi_roc = rsi_value - old;
                roc_window.push_back(rsi_value);
            }
        }

        let rsi_mom = if short_value.is_nan() {
            f32::NAN
        } else {
            momentum.update(short_value)
        };

        if !rsi_roc.is_nan() && !rsi_mom.is_nan() {
            let composite = rsi_roc + rsi_mom;
            r.composite = composite;
            r.fast = fast_sma.update(composite);
            r.slow = slow_sma.update(composite);
        }

        r.is_formed = !r.fast.is_nan() && !r.slow.is_nan();
        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 100.0 + 6.0 * ((i as f32) * 0.35).sin();
                Candle::new(i as i64, c, c + 0.5, c - 0.5, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn composite_needs_roc_buffer_plus_one() {
        let out =
            &constance_brown_batch(&[wave(150)], &[ConstanceBrownParams::default()]).unwrap()[0][0];
        // RSI first at bar 14, ROC buffers 9 values, difference at bar 23.
        assert!(out[22].composite.is_nan());
        assert!(!out[23].composite.is_nan());
    }

    #[test]
    fn formed_waits_for_slow_overlay() {
        let out =
            &constance_brown_batch(&[wave(150)], &[ConstanceBrownParams::default()]).unwrap()[0][0];
        let first_composite = out.iter().position(|r| !r.composite.is_nan()).unwrap();
        let first_formed = out.iter().position(|r| r.is_formed).unwrap();
        // Slow SMA needs 33 composite values.
        assert_eq!(first_formed - first_composite, 32);
        assert!(!out[first_formed].fast.is_nan());
    }

    #[test]
    fn flat_series_composite_is_100() {
        let bars: Vec<Candle> = (0..120)
            .map(|i| Candle::new(i as i64, 10.0, 10.0, 10.0, 10.0, 1.0))
            .collect();
        let out =
            &constance_brown_batch(&[bars], &[ConstanceBrownParams::default()]).unwrap()[0][0];
        let r = out.last().unwrap();
        // Both RSIs read 100 on no losses; ROC of a constant RSI is 0.
        assert!((r.composite - 100.0).abs() < 1e-4);
    }
}
