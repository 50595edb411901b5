//! # Normalized Average True Range (NATR)
//!
//! ATR as a percentage of the close. A zero close resolves to 0.

use crate::batch::{scan_batch, BatchError};
use crate::indicators::true_range::true_range_at;
use crate::utilities::candle::Candle;
use crate::utilities::math::WilderState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct NatrParams {
    pub length: usize,
}

impl Default for NatrParams {
    fn default() -> Self {
        Self { length: 14 }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn natr_batch(
    series: &[Vec<Candle>],
    params: &[NatrParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &NatrParams, out| {
        let mut rma = WilderState::new(prm.length);
        for (i, c) in bars.iter().enumerate() {
            let atr = rma.update(true_range_at(bars, i));
            out[i] = if rma.is_formed() {
                let value = if c.close == 0.0 {
                    0.0
                } else {
                    100.0 * atr / c.close
                };
                IndicatorResult::formed(c.time, value)
            } else {
                IndicatorResult::empty(c.time)
            };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_close() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| Candle::new(i as i64, 100.0, 102.0, 98.0, 100.0, 1.0))
            .collect();
        let out = &natr_batch(&[bars], &[NatrParams::default()]).unwrap()[0][0];
        assert!((out[20].value - 4.0).abs() < 1e-5);
    }
}
