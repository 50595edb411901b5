//! # Donchian Channels
//!
//! Highest high and lowest low over the window, with their midpoint.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DonchianParams {
    pub length: usize,
}

impl Default for DonchianParams {
    fn default() -> Self {
        Self { length: 20 }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DonchianResult {
    pub time: i64,
    pub upper: f32,
    pub middle: f32,
    pub lower: f32,
    pub is_formed: bool,
}

impl Default for DonchianResult {
    fn default() -> Self {
        Self {
            time: 0,
            upper: f32::NAN,
            middle: f32::NAN,
            lower: f32::NAN,
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn donchian_batch(
    series: &[Vec<Candle>],
    params: &[DonchianParams],
) -> Result<Vec<Vec<Vec<DonchianResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return DonchianResult {
                time,
                ..DonchianResult::default()
            };
        }
        let window = &bars[i + 1 - length..=i];
        let upper = window.iter().fold(f32::NEG_INFINITY, |m, c| m.max(c.high));
        let lower = window.iter().fold(f32::INFINITY, |m, c| m.min(c.low));
        DonchianResult {
            time,
            upper,
            middle: (upper + lower) / 2.0,
            lower,
            is_formed: true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_over_short_window() {
        let highs = [5.0, 7.0, 6.0, 9.0];
        let lows = [1.0, 2.0, 3.0, 2.0];
        let bars: Vec<Candle> = highs
            .iter()
            .zip(lows.iter())
            .enumerate()
            .map(|(i, (&h, &l))| Candle::new(i as i64, l, h, l, h, 1.0))
            .collect();
        let prm = DonchianParams { length: 2 };
        let out = &donchian_batch(&[bars], &[prm]).unwrap()[0][0];
        assert!(!out[0].is_formed);
        assert_eq!(out[3].upper, 9.0);
        assert_eq!(out[3].lower, 2.0);
        assert_eq!(out[3].middle, 5.5);
    }
}
