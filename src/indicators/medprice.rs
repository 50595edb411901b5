//! # Median Price
//!
//! `(high + low) / 2` per bar.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct MedPriceParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn medprice_batch(
    series: &[Vec<Candle>],
    params: &[MedPriceParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, _prm, i| {
        IndicatorResult::formed(bars[i].time, extract_price(&bars[i], PriceKind::Median))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_of_high_and_low() {
        let bars = vec![Candle::new(0, 1.0, 8.0, 2.0, 3.0, 1.0)];
        let out = &medprice_batch(&[bars], &[MedPriceParams]).unwrap()[0][0];
        assert_eq!(out[0].value, 5.0);
    }
}
