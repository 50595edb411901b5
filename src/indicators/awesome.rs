//! # Awesome Oscillator
//!
//! SMA(5) minus SMA(34) of the median price.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AwesomeParams {
    pub short_length: usize,
    pub long_length: usize,
}

impl Default for AwesomeParams {
    fn default() -> Self {
        Self {
            short_length: 5,
            long_length: 34,
        }
    }
}

fn median_sma(bars: &[Candle], length: usize, i: usize) -> f32 {
    bars[i + 1 - length..=i]
        .iter()
        .map(|c| extract_price(c, PriceKind::Median))
        .sum::<f32>()
        / length as f32
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn awesome_batch(
    series: &[Vec<Candle>],
    params: &[AwesomeParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let short = prm.short_length.max(1);
        let long = prm.long_length.max(1);
        let time = bars[i].time;
        if i + 1 < short.max(long) {
            return IndicatorResult::empty(time);
        }
        let value = median_sma(bars, short, i) - median_sma(bars, long, i);
        IndicatorResult::formed(time, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_in_uptrend() {
        let bars: Vec<Candle> = (0..50)
            .map(|i| {
                let c = i as f32;
                Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect();
        let out = &awesome_batch(&[bars], &[AwesomeParams::default()]).unwrap()[0][0];
        assert!(!out[32].is_formed);
        assert!(out[33].is_formed);
        // Ramp of slope 1: SMA(5) leads SMA(34) by (34-5)/2.
        assert!((out[49].value - 14.5).abs() < 1e-4);
    }
}
