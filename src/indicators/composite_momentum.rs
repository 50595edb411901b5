//! # Composite Momentum
//!
//! Averages four normalized momentum readings into one line: short and long
//! ROC fractions, a recentred RSI, and a relative MACD of two price EMAs.
//! An SMA over the line itself smooths the output, reading its own prior
//! values back from the output row with a rolling sum.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CompositeMomentumParams {
    pub short_roc_length: usize,
    pub long_roc_length: usize,
    pub rsi_length: usize,
    pub ema_fast_length: usize,
    pub ema_slow_length: usize,
    pub sma_length: usize,
    pub price: PriceKind,
}

impl Default for CompositeMomentumParams {
    fn default() -> Self {
        Self {
            short_roc_length: 10,
            long_roc_length: 20,
            rsi_length: 14,
            ema_fast_length: 12,
            ema_slow_length: 26,
            sma_length: 10,
            price: PriceKind::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CompositeMomentumResult {
    pub time: i64,
    pub composite_line: f32,
    pub sma: f32,
    pub is_formed: bool,
}

impl Default for CompositeMomentumResult {
    fn default() -> Self {
        Self {
            time: 0,
            composite_line: f32::NAN,
            sma: f32::NAN,
            is_formed: false,
        }
    }
}

fn roc_at(bars: &[Candle], i: usize, length: usize, price: PriceKind) -> f32 {
    if i < length {
        return f32::NAN;
    }
    let base = extract_price(&bars[i - length], price);
    if base == 0.0 {
        return f32::NAN;
    }
    (extract_price(&bars[i], price) - base) / base * 100.0
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn composite_momentum_batch(
    series: &[Vec<Candle>],
    params: &[CompositeMomentumParams],
) -> Result<Vec<Vec<Vec<CompositeMomentumResult>>>, BatchError> {
    scan_batch(series, params, composite_momentum_kernel)
}

struct PartialEma {
    length: usize,
    prev: f32,
    sum: f32,
    count: usize,
}

impl PartialEma {
    fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            prev: 0.0,
            sum: 0.0,
            count: 0,
        }
    }

    /// Emits partial averages before the window fills; a one-bar window just
    /// tracks the input.
    fn update(&mut self, x: f32) -> f32 {
        if self.length <= 1 {
            self.prev = x;
            self.count = 1;
            return x;
        }
        if self.count < self.length {
            self.sum += x;
            self.count += 1;
            let value = self.sum / self.length as f32;
            if self.count == self.length {
                self.prev = value;
            }
            value
        } else {
            let multiplier = 2.0 / (self.length as f32 + 1.0);
            self.prev += (x - self.prev) * multiplier;
            self.prev
        }
    }

    fn is_formed(&self) -> bool {
        self.count >= self.length
    }
}

fn composite_momentum_kernel(
    bars: &[Candle],
    prm: &CompositeMomentumParams,
    out: &mut [CompositeMomentumResult],
) {
    let short_len = prm.short_roc_length.max(1);
    let long_len = prm.long_roc_length.max(1);
    let rsi_len = prm.rsi_length.max(1);
    let sma_len = prm.sma_length.max(1);

    let mut prev_price = 0.0f32;
    let mut has_prev_price = false;

    let mut gain_sum = 0.0f32;
    let mut loss_sum = 0.0f32;
    let mut avg_gain = 0.0f32;
    let mut avg_loss = 0.0f32;
    let mut rsi_samples = 0usize;
    let mut rsi_ready = false;

    let mut ema_fast = PartialEma::new(prm.ema_fast_length);
    let mut ema_slow = PartialEma::new(prm.ema_slow_length);

    let mut sma_sum = 0.0f32;
    let mut sma_count = 0usize;

    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);

        let short_roc = roc_at(bars, i, short_len, prm.price);
        let long_roc = roc_at(bars, i, long_len, prm.price);

        // RSI that reports partial averages during warm-up and resolves an
        // exact 1.0 relative strength to 0.
        let mut rsi_value = f32::NAN;
        if has_prev_price {
            let delta = price - prev_price;
            let gain = if delta > 0.0 { delta } else { 0.0 };
            let loss = if delta < 0.0 { -delta } else { 0.0 };
            let len = rsi_len as f32;

            if !rsi_ready {
                gain_sum += gain;
                loss_sum += loss;
                rsi_samples += 1;
                if rsi_samples >= rsi_len {
                    avg_gain = gain_sum / len;
                    avg_loss = loss_sum / len;
                    rsi_ready = true;
                }
            } else {
                avg_gain = (avg_gain * (len - 1.0) + gain) / len;
                avg_loss = (avg_loss * (len - 1.0) + loss) / len;
            }

            let cur_gain = if rsi_ready { avg_gain } else { gain_sum / len };
            let cur_loss = if rsi_ready { avg_loss } else { loss_sum / len };
            rsi_value = if cur_loss == 0.0 {
                100.0
            } else {
                let rs = cur_gain / cur_loss;
                if rs == 1.0 {
                    0.0
                } else {
                    100.0 - 100.0 / (1.0 + rs)
                }
            };
        }
        prev_price = price;
        has_prev_price = true;

        let ema_fast_value = ema_fast.update(price);
        let ema_slow_value = ema_slow.update(price);

        let mut r = CompositeMomentumResult {
            time: c.time,
            ..CompositeMomentumResult::default()
        };

        let components_ready = i >= short_len
            && i >= long_len
            && rsi_ready
            && ema_fast.is_formed()
            && ema_slow.is_formed()
            && !short_roc.is_nan()
            && !long_roc.is_nan()
            && !rsi_value.is_nan();

        if components_ready {
            let normalized_short = short_roc / 100.0;
            let normalized_long = long_roc / 100.0;
            let normalized_rsi = (rsi_value - 50.0) / 50.0;
            let macd_line = if ema_slow_value.abs() > f32::EPSILON {
                (ema_fast_value - ema_slow_value) / ema_slow_value
            } else {
                0.0
            };

            let composite_line =
                (normalized_short + normalized_long + normalized_rsi + macd_line) / 4.0 * 100.0;
            r.composite_line = composite_line;

            sma_sum += composite_line;
            sma_count += 1;
            if sma_count > sma_len {
                let prev = out[i - sma_len].composite_line;
                if !prev.is_nan() {
                    sma_sum -= prev;
                }
                sma_count = sma_len;
            }
            r.sma = sma_sum / sma_len as f32;
            r.is_formed = sma_count >= sma_len;
        }

        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 100.0 + 8.0 * ((i as f32) * 0.2).sin();
                Candle::new(i as i64, c, c + 0.5, c - 0.5, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn forms_after_sma_window_of_composite_values() {
        let out = &composite_momentum_batch(&[wave(120)], &[CompositeMomentumParams::default()])
            .unwrap()[0][0];
        let first_line = out.iter().position(|r| !r.composite_line.is_nan()).unwrap();
        let first_formed = out.iter().position(|r| r.is_formed).unwrap();
        assert_eq!(first_formed - first_line, 9);
    }

    #[test]
    fn sma_averages_own_line() {
        let out = &composite_momentum_batch(&[wave(120)], &[CompositeMomentumParams::default()])
            .unwrap()[0][0];
        let i = out.iter().position(|r| r.is_formed).unwrap() + 20;
        let mean: f32 = (i - 9..=i).map(|j| out[j].composite_line).sum::<f32>() / 10.0;
        assert!((out[i].sma - mean).abs() < 1e-3);
    }

    #[test]
    fn flat_series_centres_near_zero() {
        let bars: Vec<Candle> = (0..120)
            .map(|i| Candle::new(i as i64, 50.0, 50.0, 50.0, 50.0, 1.0))
            .collect();
        let out = &composite_momentum_batch(&[bars], &[CompositeMomentumParams::default()])
            .unwrap()[0][0];
        let r = out.last().unwrap();
        assert!(r.is_formed);
        // ROCs are 0, MACD is 0, flat RSI saturates at 100 so the composite
        // settles at 25.
        assert!((r.composite_line - 25.0).abs() < 1e-3);
    }
}
