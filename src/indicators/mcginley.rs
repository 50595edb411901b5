//! # McGinley Dynamic
//!
//! Self-adjusting average: `md += (price - md) / (length * (price/md)^4)`.
//! A zero tracking value falls back to the plain EMA step to avoid a zero
//! denominator in the ratio.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct McGinleyParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for McGinleyParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn mcginley_batch(
    series: &[Vec<Candle>],
    params: &[McGinleyParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, |bars, prm: &McGinleyParams, out| {
        let length = prm.length.max(1) as f32;
        let mut md = f32::NAN;
        for (i, c) in bars.iter().enumerate() {
            let price = extract_price(c, prm.price);
            if i == 0 {
                md = price;
            } else {
                let denom = if md == 0.0 {
                    length
                } else {
                    let ratio = price / md;
                    length * ratio * ratio * ratio * ratio
                };
                md += (price - md) / denom.max(1e-10);
            }
            out[i] = IndicatorResult::formed(c.time, md);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_from_first_price() {
        let bars = vec![
            Candle::new(0, 10.0, 10.0, 10.0, 10.0, 1.0),
            Candle::new(1, 12.0, 12.0, 12.0, 12.0, 1.0),
        ];
        let out = &mcginley_batch(&[bars], &[McGinleyParams::default()]).unwrap()[0][0];
        assert_eq!(out[0].value, 10.0);
        assert!(out[1].value > 10.0 && out[1].value < 12.0);
    }
}
