//! # Detrended Price Oscillator (DPO)
//!
//! Price minus the SMA displaced back by `length / 2 + 1` bars.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DpoParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for DpoParams {
    fn default() -> Self {
        Self {
            length: 20,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn dpo_batch(
    series: &[Vec<Candle>],
    params: &[DpoParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let shift = length / 2 + 1;
        let time = bars[i].time;
        // The SMA window ends `shift` bars back.
        if i < length + shift - 1 {
            return IndicatorResult::empty(time);
        }
        let end = i - shift;
        let sma: f32 = bars[end + 1 - length..=end]
            .iter()
            .map(|c| extract_price(c, prm.price))
            .sum::<f32>()
            / length as f32;
        IndicatorResult::formed(time, extract_price(&bars[i], prm.price) - sma)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_gives_constant_offset() {
        let bars: Vec<Candle> = (0..60)
            .map(|i| {
                let c = i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &dpo_batch(&[bars], &[DpoParams::default()]).unwrap()[0][0];
        // length 20, shift 11: first formed at bar 30.
        assert!(!out[29].is_formed);
        assert!(out[30].is_formed);
        // price(i) - mean(i-30..=i-11) = 11 + 9.5
        assert!((out[40].value - 20.5).abs() < 1e-4);
    }
}
