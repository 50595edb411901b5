//! # DeMarker
//!
//! Ratio of averaged upward high extensions to the sum of upward and
//! downward extensions over `length` bars. A zero total resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DeMarkerParams {
    pub length: usize,
}

impl Default for DeMarkerParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn demarker_batch(
    series: &[Vec<Candle>],
    params: &[DeMarkerParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i < length {
            return IndicatorResult::empty(time);
        }
        let mut de_max = 0.0f32;
        let mut de_min = 0.0f32;
        for j in i + 1 - length..=i {
            let up = bars[j].high - bars[j - 1].high;
            if up > 0.0 {
                de_max += up;
            }
            let down = bars[j - 1].low - bars[j].low;
            if down > 0.0 {
                de_min += down;
            }
        }
        let total = de_max + de_min;
        let value = if total == 0.0 { 0.0 } else { de_max / total };
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_uptrend_reads_one() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| {
                let c = i as f32;
                Candle::new(i as i64, c, c + 1.0, c, c, 1.0)
            })
            .collect();
        let out = &demarker_batch(&[bars], &[DeMarkerParams::default()]).unwrap()[0][0];
        assert!(!out[13].is_formed);
        assert!(out[14].is_formed);
        assert_eq!(out[20].value, 1.0);
    }

    #[test]
    fn flat_market_falls_back_to_zero() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| Candle::new(i as i64, 5.0, 6.0, 4.0, 5.0, 1.0))
            .collect();
        let out = &demarker_batch(&[bars], &[DeMarkerParams::default()]).unwrap()[0][0];
        assert_eq!(out[20].value, 0.0);
    }
}
