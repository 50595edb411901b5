//! # Balance of Power (BOP)
//!
//! `(close - open) / (high - low)` per bar. A zero range resolves to 0.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct BopParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn bop_batch(
    series: &[Vec<Candle>],
    params: &[BopParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, _prm, i| {
        let c = &bars[i];
        let range = c.high - c.low;
        let value = if range == 0.0 {
            0.0
        } else {
            (c.close - c.open) / range
        };
        IndicatorResult::formed(c.time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_body_candle_reads_one() {
        let bars = vec![Candle::new(0, 1.0, 2.0, 1.0, 2.0, 1.0)];
        let out = &bop_batch(&[bars], &[BopParams]).unwrap()[0][0];
        assert_eq!(out[0].value, 1.0);
        assert!(out[0].is_formed);
    }

    #[test]
    fn doji_with_zero_range_reads_zero() {
        let bars = vec![Candle::new(0, 3.0, 3.0, 3.0, 3.0, 1.0)];
        let out = &bop_batch(&[bars], &[BopParams]).unwrap()[0][0];
        assert_eq!(out[0].value, 0.0);
    }
}
