//! # SuperTrend
//!
//! ATR bands around the median price with ratcheting: the active band only
//! tightens while the trend holds, and the line flips between bands when
//! the close crosses it.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::true_range::true_range_at;
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::WilderState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SuperTrendParams {
    pub length: usize,
    pub multiplier: f32,
}

impl Default for SuperTrendParams {
    fn default() -> Self {
        Self {
            length: 10,
            multiplier: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SuperTrendResult {
    pub time: i64,
    pub value: f32,
    /// True while the line rides below price.
    pub is_uptrend: bool,
    pub is_formed: bool,
}

impl Default for SuperTrendResult {
    fn default() -> Self {
        Self {
            time: 0,
            value: f32::NAN,
            is_uptrend: false,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn supertrend_batch(
    series: &[Vec<Candle>],
    params: &[SuperTrendParams],
) -> Result<Vec<Vec<Vec<SuperTrendResult>>>, BatchError> {
    scan_batch(series, params, supertrend_kernel)
}

fn supertrend_kernel(bars: &[Candle], prm: &SuperTrendParams, out: &mut [SuperTrendResult]) {
    let mut atr = WilderState::new(prm.length);
    let mut upper = f32::NAN;
    let mut lower = f32::NAN;
    let mut uptrend = true;
    let mut seeded = false;

    for (i, c) in bars.iter().enumerate() {
        let range = atr.update(true_range_at(bars, i));
        let mut r = SuperTrendResult {
            time: c.time,
            ..SuperTrendResult::default()
        };

        if atr.is_formed() {
            let mid = extract_price(c, PriceKind::Median);
            let band = prm.multiplier * range;
            let basic_upper = mid + band;
            let basic_lower = mid - band;

            if !seeded {
                upper = basic_upper;
                lower = basic_lower;
                uptrend = true;
                seeded = true;
            } else {
                let prev_close = bars[i - 1].close;
                // Ratchet: bands only tighten while price stays inside.
                upper = if basic_upper < upper || prev_close > upper {
                    basic_upper
                } else {
                    upper
                };
                lower = if basic_lower > lower || prev_close < lower {
                    basic_lower
                } else {
                    lower
                };

                uptrend = if uptrend {
                    c.close >= lower
                } else {
                    c.close > upper
                };
            }

            r.value = if uptrend { lower } else { upper };
            r.is_uptrend = uptrend;
            r.is_formed = true;
        }

        out[i] = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(n: usize, slope: f32) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 100.0 + slope * i as f32;
                Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn uptrend_rides_the_lower_band() {
        let bars = trend(50, 1.0);
        let out = &supertrend_batch(&[bars.clone()], &[SuperTrendParams::default()]).unwrap()[0][0];
        assert!(!out[8].is_formed);
        assert!(out[9].is_formed);
        for i in 12..50 {
            assert!(out[i].is_uptrend);
            assert!(out[i].value < bars[i].close);
        }
    }

    #[test]
    fn crash_flips_the_trend() {
        let mut bars = trend(30, 1.0);
        for i in 30..45 {
            let c = 120.0 - 5.0 * (i as f32 - 30.0);
            bars.push(Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0));
        }
        let out = &supertrend_batch(&[bars.clone()], &[SuperTrendParams::default()]).unwrap()[0][0];
        assert!(out[29].is_uptrend);
        let r = out.last().unwrap();
        assert!(!r.is_uptrend);
        assert!(r.value > bars.last().unwrap().close);
    }
}
