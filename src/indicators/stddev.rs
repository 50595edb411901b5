//! # Rolling Standard Deviation
//!
//! Population standard deviation of the price window ending at the bar.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StdDevParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for StdDevParams {
    fn default() -> Self {
        Self {
            length: 20,
            price: PriceKind::Close,
        }
    }
}

pub(crate) fn stddev_at(bars: &[Candle], length: usize, price: PriceKind, i: usize) -> Option<f32> {
    if i + 1 < length {
        return None;
    }
    let n = length as f32;
    let window = &bars[i + 1 - length..=i];
    let mean: f32 = window.iter().map(|c| extract_price(c, price)).sum::<f32>() / n;
    let var: f32 = window
        .iter()
        .map(|c| {
            let d = extract_price(c, price) - mean;
            d * d
        })
        .sum::<f32>()
        / n;
    Some(var.sqrt())
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn stddev_batch(
    series: &[Vec<Candle>],
    params: &[StdDevParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match stddev_at(bars, prm.length.max(1), prm.price, i) {
            Some(v) => IndicatorResult::formed(time, v),
            None => IndicatorResult::empty(time),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_input_is_zero() {
        let bars: Vec<Candle> = (0..25)
            .map(|i| Candle::new(i as i64, 5.0, 5.0, 5.0, 5.0, 1.0))
            .collect();
        let out = &stddev_batch(&[bars], &[StdDevParams::default()]).unwrap()[0][0];
        assert!(!out[18].is_formed);
        assert!(out[19].is_formed);
        assert_eq!(out[20].value, 0.0);
    }

    #[test]
    fn alternating_values_have_known_deviation() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| {
                let c = if i % 2 == 0 { 9.0 } else { 11.0 };
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &stddev_batch(&[bars], &[StdDevParams::default()]).unwrap()[0][0];
        assert!((out[25].value - 1.0).abs() < 1e-5);
    }
}
