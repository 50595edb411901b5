//! # Ulcer Index
//!
//! Root mean square of percentage drawdowns from the running maximum inside
//! the window. A zero running maximum skips the bar's drawdown.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UlcerIndexParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for UlcerIndexParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ulcer_index_batch(
    series: &[Vec<Candle>],
    params: &[UlcerIndexParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let length = prm.length.max(1);
        let time = bars[i].time;
        if i + 1 < length {
            return IndicatorResult::empty(time);
        }
        let mut peak = f32::NEG_INFINITY;
        let mut sq_sum = 0.0f32;
        for c in &bars[i + 1 - length..=i] {
            let p = extract_price(c, prm.price);
            peak = peak.max(p);
            if peak != 0.0 {
                let dd = 100.0 * (p - peak) / peak;
                sq_sum += dd * dd;
            }
        }
        IndicatorResult::formed(time, (sq_sum / length as f32).sqrt())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_series_has_zero_drawdown() {
        let bars: Vec<Candle> = (0..30)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &ulcer_index_batch(&[bars], &[UlcerIndexParams::default()]).unwrap()[0][0];
        assert!(!out[12].is_formed);
        assert!(out[13].is_formed);
        assert_eq!(out[20].value, 0.0);
    }

    #[test]
    fn drawdown_raises_the_index() {
        let mut closes: Vec<f32> = vec![100.0; 20];
        closes.extend([90.0, 85.0, 80.0]);
        let bars: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 1.0))
            .collect();
        let out = &ulcer_index_batch(&[bars], &[UlcerIndexParams::default()]).unwrap()[0][0];
        assert!(out[22].value > 5.0);
    }
}
