//! # Connors RSI
//!
//! Mean of three components: a price RSI, an RSI of the up/down streak
//! counter, and an RSI of a momentum-style ROC that clamps its lookback to
//! bar 0 while history is short. The composite formed flag lags the bar
//! where every component first formed by one.
//!
//! The component RSI here resolves an exact 1.0 relative strength to 0
//! instead of 50, which the aggregation order of the source chain produces.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConnorsRsiParams {
    pub rsi_length: usize,
    pub streak_rsi_length: usize,
    pub roc_rsi_length: usize,
    pub price: PriceKind,
}

impl Default for ConnorsRsiParams {
    fn default() -> Self {
        Self {
            rsi_length: 3,
            streak_rsi_length: 2,
            roc_rsi_length: 100,
            price: PriceKind::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConnorsRsiResult {
    pub time: i64,
    pub rsi: f32,
    pub up_down_rsi: f32,
    pub roc_rsi: f32,
    pub crsi: f32,
    pub is_formed: bool,
}

impl Default for ConnorsRsiResult {
    fn default() -> Self {
        Self {
            time: 0,
            rsi: f32::NAN,
            up_down_rsi: f32::NAN,
            roc_rsi: f32::NAN,
            crsi: f32::NAN,
            is_formed: false,
        }
    }
}

#[derive(Clone, Copy, Default)]
struct ComponentRsi {
    prev: f32,
    has_prev: bool,
    avg_gain: f32,
    avg_loss: f32,
    warmup: usize,
    formed: bool,
}

impl ComponentRsi {
    fn update(&mut self, value: f32, length: usize) -> f32 {
        let length = length.max(1);
        if !self.has_prev {
            self.prev = value;
            self.has_prev = true;
            return f32::NAN;
        }
        let delta = value - self.prev;
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        self.prev = value;

        let len = length as f32;
        if !self.formed {
            self.avg_gain += gain;
            self.avg_loss += loss;
            self.warmup += 1;
            if self.warmup >= length {
                self.avg_gain /= len;
                self.avg_loss /= len;
                self.formed = true;
            }
        } else {
            self.avg_gain = (self.avg_gain * (len - 1.0) + gain) / len;
            self.avg_loss = (self.avg_loss * (len - 1.0) + loss) / len;
        }

        if !self.formed {
            return f32::NAN;
        }
        if self.avg_loss == 0.0 {
            return 100.0;
        }
        let rs = self.avg_gain / self.avg_loss;
        if rs == 1.0 {
            return 0.0;
        }
        100.0 - 100.0 / (1.0 + rs)
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn connors_rsi_batch(
    series: &[Vec<Candle>],
    params: &[ConnorsRsiParams],
) -> Result<Vec<Vec<Vec<ConnorsRsiResult>>>, BatchError> {
    scan_batch(series, params, connors_rsi_kernel)
}

fn connors_rsi_kernel(bars: &[Candle], prm: &ConnorsRsiParams, out: &mut [ConnorsRsiResult]) {
    let rsi_len = prm.rsi_length.max(1);
    let streak_len = prm.streak_rsi_length.max(1);
    let roc_rsi_len = prm.roc_rsi_length.max(1);
    let roc_length = roc_rsi_len;

    let mut price_rsi = ComponentRsi::default();
    let mut streak_rsi = ComponentRsi::default();
    let mut roc_rsi = ComponentRsi::default();

    let mut has_prev_streak = false;
    let mut prev_streak = 1.0f32;
    let mut prev_price_for_streak = 0.0f32;

    let mut was_formed = false;

    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        let mut r = ConnorsRsiResult {
            time: c.time,
            ..ConnorsRsiResult::default()
        };

        // Streak counter: consecutive up closes count up, down closes count
        // down, an unchanged close resets to 0.
        let streak = if has_prev_streak {
            if price > prev_price_for_streak {
                if prev_streak > 0.0 {
                    prev_streak + 1.0
                } else {
                    1.0
                }
            } else if price < prev_price_for_streak {
                if prev_streak < 0.0 {
                    prev_streak - 1.0
                } else {
                    -1.0
                }
            } else {
                0.0
            }
        } else {
            1.0
        };

        let rsi_value = price_rsi.update(price, rsi_len);
        let updown_value = streak_rsi.update(streak, streak_len);

        // Momentum-style ROC: lookback clamps to bar 0 until enough history.
        let past_idx = i.saturating_sub(roc_length);
        let past_price = extract_price(&bars[past_idx], prm.price);
        let roc_value = if past_price != 0.0 {
            (price - past_price) / past_price * 100.0
        } else {
            f32::NAN
        };
        let roc_rsi_value = if roc_value.is_nan() {
            f32::NAN
        } else {
            roc_rsi.update(roc_value, roc_rsi_len)
        };

        if !rsi_value.is_nan() {
            r.rsi = rsi_value;
        }
        if !updown_value.is_nan() {
            r.up_down_rsi = updown_value;
        }
        if !roc_rsi_value.is_nan() {
            r.roc_rsi = roc_rsi_value;
        }

        r.is_formed = was_formed;
        if !was_formed
            && price_rsi.formed
            && streak_rsi.formed
            && roc_rsi.formed
            && i >= roc_length
            && !roc_value.is_nan()
        {
            was_formed = true;
        }

        if !r.rsi.is_nan() && !r.up_down_rsi.is_nan() && !r.roc_rsi.is_nan() {
            r.crsi = (r.rsi + r.up_down_rsi + r.roc_rsi) / 3.0;
        }

        out[i] = r;

        has_prev_streak = true;
        prev_streak = streak;
        prev_price_for_streak = price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_closes(closes: &[f32]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 1.0))
            .collect()
    }

    fn small_params() -> ConnorsRsiParams {
        ConnorsRsiParams {
            rsi_length: 3,
            streak_rsi_length: 2,
            roc_rsi_length: 5,
            price: PriceKind::Close,
        }
    }

    #[test]
    fn composite_is_mean_of_components() {
        let closes: Vec<f32> = (0..40).map(|i| 100.0 + ((i as f32) * 0.8).sin()).collect();
        let out = &connors_rsi_batch(&[from_closes(&closes)], &[small_params()]).unwrap()[0][0];
        let r = out.iter().find(|r| !r.crsi.is_nan()).unwrap();
        let mean = (r.rsi + r.up_down_rsi + r.roc_rsi) / 3.0;
        assert!((r.crsi - mean).abs() < 1e-5);
    }

    #[test]
    fn formed_lags_component_readiness_by_one_bar() {
        let closes: Vec<f32> = (0..40).map(|i| 100.0 + ((i as f32) * 0.8).sin()).collect();
        let out = &connors_rsi_batch(&[from_closes(&closes)], &[small_params()]).unwrap()[0][0];
        let first_formed = out.iter().position(|r| r.is_formed).unwrap();
        assert!(!out[first_formed - 1].crsi.is_nan());
    }

    #[test]
    fn monotonic_rise_pins_price_rsi() {
        let closes: Vec<f32> = (1..40).map(|i| i as f32).collect();
        let out = &connors_rsi_batch(&[from_closes(&closes)], &[small_params()]).unwrap()[0][0];
        let last = out.last().unwrap();
        assert_eq!(last.rsi, 100.0);
        assert_eq!(last.up_down_rsi, 100.0);
    }
}
