//! # Schaff Trend Cycle (STC)
//!
//! MACD histogram pushed through two stochastic normalizations and a final
//! EMA. The first normalization uses the raw price range of the last
//! `length` bars; the second ranges over the surviving normalized values,
//! carrying the previous stochastic forward across degenerate windows.
//!
//! The inner EMAs emit partial averages from bar 0, dividing by the full
//! window length before it fills.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SchaffTrendCycleParams {
    pub length: usize,
    pub macd_short_length: usize,
    pub macd_long_length: usize,
    pub macd_signal_length: usize,
    pub stochastic_length: usize,
    pub price: PriceKind,
}

impl Default for SchaffTrendCycleParams {
    fn default() -> Self {
        Self {
            length: 10,
            macd_short_length: 23,
            macd_long_length: 50,
            macd_signal_length: 9,
            stochastic_length: 10,
            price: PriceKind::Close,
        }
    }
}

/// EMA that divides partial sums by the full window length from bar 0.
#[derive(Clone, Copy)]
struct EagerEma {
    length: usize,
    multiplier: f32,
    sum: f32,
    count: usize,
    value: f32,
}

impl EagerEma {
    fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            length,
            multiplier: 2.0 / (length as f32 + 1.0),
            sum: 0.0,
            count: 0,
            value: 0.0,
        }
    }

    fn update(&mut self, x: f32) -> f32 {
        self.count += 1;
        if self.count <= self.length {
            self.sum += x;
            self.value = self.sum / self.length as f32;
        } else {
            self.value += (x - self.value) * self.multiplier;
        }
        self.value
    }

    fn is_formed(&self) -> bool {
        self.count >= self.length
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn schaff_trend_cycle_batch(
    series: &[Vec<Candle>],
    params: &[SchaffTrendCycleParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, stc_kernel)
}

fn stc_kernel(bars: &[Candle], prm: &SchaffTrendCycleParams, out: &mut [IndicatorResult]) {
    let length = prm.length.max(1);
    let macd_long_length = prm.macd_long_length.max(1);
    let stochastic_length = prm.stochastic_length.max(1);

    let mut short_ema = EagerEma::new(prm.macd_short_length);
    let mut long_ema = EagerEma::new(macd_long_length);
    let mut signal_ema = EagerEma::new(prm.macd_signal_length);
    let mut final_ema = EagerEma::new(length);

    let mut norm_history = vec![f32::NAN; bars.len()];
    let mut stoch_valid_count = 0usize;
    let mut prev_stoch = 0.0f32;

    for (i, c) in bars.iter().enumerate() {
        out[i] = IndicatorResult::empty(c.time);

        let price = extract_price(c, prm.price);
        let macd = short_ema.update(price) - long_ema.update(price);

        // The signal chain only starts once the long EMA window has filled.
        if i + 1 >= macd_long_length {
            signal_ema.update(macd);
        }
        if !signal_ema.is_formed() {
            continue;
        }
        let macd_hist = macd - signal_ema.value;

        let start = (i + 1).saturating_sub(length);
        let mut price_min = price;
        let mut price_max = price;
        for b in &bars[start..=i] {
            let pr = extract_price(b, prm.price);
            price_min = price_min.min(pr);
            price_max = price_max.max(pr);
        }

        let denom = price_max - price_min;
        let norm = if denom == 0.0 {
            f32::NAN
        } else {
            let n = (macd_hist - price_min) / denom;
            norm_history[i] = n;
            n
        };

        let stoch = if norm.is_nan() {
            prev_stoch
        } else {
            // Range over the last stochastic_length surviving norms.
            let mut min_norm = f32::NAN;
            let mut max_norm = f32::NAN;
            let mut considered = 0usize;
            for j in (0..=i).rev() {
                let v = norm_history[j];
                if v.is_nan() {
                    continue;
                }
                if min_norm.is_nan() {
                    min_norm = v;
                    max_norm = v;
                } else {
                    min_norm = min_norm.min(v);
                    max_norm = max_norm.max(v);
                }
                considered += 1;
                if considered == stochastic_length {
                    break;
                }
            }
            if min_norm.is_nan() {
                prev_stoch
            } else {
                stoch_valid_count += 1;
                let stoch_den = max_norm - min_norm;
                if stoch_den == 0.0 {
                    0.0
                } else {
                    100.0 * (norm - min_norm) / stoch_den
                }
            }
        };
        prev_stoch = stoch;

        if stoch_valid_count < stochastic_length {
            continue;
        }

        let value = final_ema.update(stoch);
        out[i] = IndicatorResult {
            time: c.time,
            value,
            is_formed: final_ema.is_formed(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 100.0 + 5.0 * ((i as f32) * 0.25).sin();
                Candle::new(i as i64, c, c + 0.5, c - 0.5, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn values_precede_formed_flag() {
        let out =
            &schaff_trend_cycle_batch(&[wave(200)], &[SchaffTrendCycleParams::default()]).unwrap()
                [0][0];
        let first_value = out.iter().position(|r| !r.value.is_nan()).unwrap();
        let first_formed = out.iter().position(|r| r.is_formed).unwrap();
        assert!(first_value < first_formed);
        // Final EMA needs `length` stochastic values.
        assert_eq!(first_formed - first_value, 9);
    }

    #[test]
    fn output_stays_in_cycle_range() {
        let out =
            &schaff_trend_cycle_batch(&[wave(300)], &[SchaffTrendCycleParams::default()]).unwrap()
                [0][0];
        for r in out.iter().filter(|r| r.is_formed) {
            assert!(r.value > -1.0 && r.value < 101.0);
        }
    }
}
