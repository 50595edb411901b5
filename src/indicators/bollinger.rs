//! # Bollinger Bands
//!
//! SMA middle band with upper and lower bands a configurable number of
//! standard deviations away.

use crate::batch::{windowed_batch, BatchError};
use crate::indicators::stddev::stddev_at;
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BollingerParams {
    pub length: usize,
    pub deviation: f32,
    pub price: PriceKind,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            length: 20,
            deviation: 2.0,
            price: PriceKind::Close,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BollingerResult {
    pub time: i64,
    pub middle: f32,
    pub upper: f32,
    pub lower: f32,
    pub is_formed: bool,
}

impl Default for BollingerResult {
    fn default() -> Self {
        Self {
            time: 0,
            middle: f32::NAN,
            upper: f32::NAN,
            lower: f32::NAN,
            is_formed: false,
        }
    }
}

pub(crate) fn bollinger_at(
    bars: &[Candle],
    length: usize,
    deviation: f32,
    price: PriceKind,
    i: usize,
) -> Option<(f32, f32, f32)> {
    let sd = stddev_at(bars, length, price, i)?;
    let mean: f32 = bars[i + 1 - length..=i]
        .iter()
        .map(|c| extract_price(c, price))
        .sum::<f32>()
        / length as f32;
    Some((mean, mean + deviation * sd, mean - deviation * sd))
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn bollinger_batch(
    series: &[Vec<Candle>],
    params: &[BollingerParams],
) -> Result<Vec<Vec<Vec<BollingerResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match bollinger_at(bars, prm.length.max(1), prm.deviation, prm.price, i) {
            Some((middle, upper, lower)) => BollingerResult {
                time,
                middle,
                upper,
                lower,
                is_formed: true,
            },
            None => BollingerResult {
                time,
                ..BollingerResult::default()
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_collapse_on_constant_input() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| Candle::new(i as i64, 10.0, 10.0, 10.0, 10.0, 1.0))
            .collect();
        let out = &bollinger_batch(&[bars], &[BollingerParams::default()]).unwrap()[0][0];
        let r = out[25];
        assert_eq!(r.middle, 10.0);
        assert_eq!(r.upper, 10.0);
        assert_eq!(r.lower, 10.0);
    }

    #[test]
    fn bands_are_symmetric_around_middle() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 50.0 + 3.0 * ((i as f32) * 0.5).sin();
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &bollinger_batch(&[bars], &[BollingerParams::default()]).unwrap()[0][0];
        let r = out[30];
        assert!(((r.upper - r.middle) - (r.middle - r.lower)).abs() < 1e-4);
        assert!(r.upper > r.lower);
    }
}
