//! # Tillson T3
//!
//! Six cascaded EMA stages blended with volume-factor coefficients.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use crate::utilities::IndicatorResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct T3Params {
    pub length: usize,
    /// Volume factor, conventionally 0.7.
    pub v_factor: f32,
    pub price: PriceKind,
}

impl Default for T3Params {
    fn default() -> Self {
        Self {
            length: 5,
            v_factor: 0.7,
            price: PriceKind::Close,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn t3_batch(
    series: &[Vec<Candle>],
    params: &[T3Params],
) -> Result<Vec<Vec<Vec<IndicatorResult>>>, BatchError> {
    scan_batch(series, params, t3_kernel)
}

fn t3_kernel(bars: &[Candle], prm: &T3Params, out: &mut [IndicatorResult]) {
    let v = prm.v_factor;
    let v2 = v * v;
    let v3 = v2 * v;
    let c1 = -v3;
    let c2 = 3.0 * v2 + 3.0 * v3;
    let c3 = -6.0 * v2 - 3.0 * v - 3.0 * v3;
    let c4 = 1.0 + 3.0 * v + v3 + 3.0 * v2;

    let mut stages = [EmaState::new(prm.length); 6];
    for (i, c) in bars.iter().enumerate() {
        let mut x = extract_price(c, prm.price);
        let mut formed = true;
        let mut values = [f32::NAN; 6];
        for (k, stage) in stages.iter_mut().enumerate() {
            if !formed {
                break;
            }
            x = stage.update(x);
            formed = stage.is_formed();
            values[k] = x;
        }
        let value = if formed {
            c1 * values[5] + c2 * values[4] + c3 * values[3] + c4 * values[2]
        } else {
            f32::NAN
        };
        out[i] = IndicatorResult {
            time: c.time,
            value,
            is_formed: formed,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_input_converges_to_input() {
        let closes: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64, 7.0, 7.0, 7.0, 7.0, 1.0))
            .collect();
        let out = &t3_batch(&[closes], &[T3Params::default()]).unwrap()[0][0];
        let last = out.last().unwrap();
        assert!(last.is_formed);
        assert!((last.value - 7.0).abs() < 1e-4);
    }
}
