//! # Weighted Close Price
//!
//! `(high + low + 2 * close) / 4` per bar.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct WclPriceParams;

/// Evaluate every parameter set against every series in one dispatch.
pub fn wclprice_batch(
    series: &[Vec<Candle>],
    params: &[WclPriceParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, _prm, i| {
        IndicatorResult::formed(bars[i].time, extract_price(&bars[i], PriceKind::Weighted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_counts_twice() {
        let bars = vec![Candle::new(0, 1.0, 6.0, 2.0, 4.0, 1.0)];
        let out = &wclprice_batch(&[bars], &[WclPriceParams]).unwrap()[0][0];
        assert_eq!(out[0].value, 4.0);
    }
}
