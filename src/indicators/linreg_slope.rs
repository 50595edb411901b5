//! # Linear Regression Slope

use crate::batch::{windowed_batch, BatchError};
use crate::indicators::linreg::fit_at;
use crate::utilities::candle::{Candle, PriceKind};
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LinRegSlopeParams {
    pub length: usize,
    pub price: PriceKind,
}

impl Default for LinRegSlopeParams {
    fn default() -> Self {
        Self {
            length: 14,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn linreg_slope_batch(
    series: &[Vec<Candle>],
    params: &[LinRegSlopeParams],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match fit_at(bars, prm.length, prm.price, i) {
            Some((slope, _)) => IndicatorResult::formed(time, slope),
            None => IndicatorResult::empty(time),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_of_ramp() {
        let closes: Vec<Candle> = (0..20)
            .map(|i| {
                let c = 2.0 * i as f32;
                Candle::new(i as i64, c, c, c, c, 1.0)
            })
            .collect();
        let out = &linreg_slope_batch(&[closes], &[LinRegSlopeParams::default()]).unwrap()[0][0];
        assert!((out[19].value - 2.0).abs() < 1e-4);
    }
}
