//! # Guppy Multiple Moving Average (GMMA)
//!
//! Twelve EMAs over the same input, grouped into a short-term band
//! (3..15) and a long-term band (30..60). Each line seeds independently;
//! the bundle is formed one bar after the slowest line's window fills.

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::{extract_price, Candle, PriceKind};
use crate::utilities::math::EmaState;
use serde::{Deserialize, Serialize};

pub const GMMA_LINES: usize = 12;

const DEFAULT_LENGTHS: [usize; GMMA_LINES] = [3, 5, 8, 10, 12, 15, 30, 35, 40, 45, 50, 60];

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GmmaParams {
    pub lengths: [usize; GMMA_LINES],
    pub price: PriceKind,
}

impl Default for GmmaParams {
    fn default() -> Self {
        Self {
            lengths: DEFAULT_LENGTHS,
            price: PriceKind::Close,
        }
    }
}

/// One bar of GMMA output. Lines that have not seeded yet hold NaN.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GmmaResult {
    pub time: i64,
    pub averages: [f32; GMMA_LINES],
    pub is_formed: bool,
}

impl Default for GmmaResult {
    fn default() -> Self {
        Self {
            time: 0,
            averages: [f32::NAN; GMMA_LINES],
            is_formed: false,
        }
    }
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn gmma_batch(
    series: &[Vec<Candle>],
    params: &[GmmaParams],
) -> Result<Vec<Vec<Vec<GmmaResult>>>, BatchError> {
    scan_batch(series, params, gmma_kernel)
}

fn gmma_kernel(bars: &[Candle], prm: &GmmaParams, out: &mut [GmmaResult]) {
    let mut emas: Vec<EmaState> = prm.lengths.iter().map(|&l| EmaState::new(l)).collect();
    let max_len = emas.iter().map(EmaState::length).max().unwrap_or(1);

    for (i, c) in bars.iter().enumerate() {
        let price = extract_price(c, prm.price);
        let mut averages = [f32::NAN; GMMA_LINES];
        for (avg, ema) in averages.iter_mut().zip(emas.iter_mut()) {
            ema.update(price);
            if ema.is_formed() {
                *avg = ema.value();
            }
        }
        out[i] = GmmaResult {
            time: c.time,
            averages,
            // One bar later than the slowest seed, matching the composite
            // aggregation order.
            is_formed: i >= max_len,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_series(n: usize, price: f32) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle::new(i as i64, price, price, price, price, 1.0))
            .collect()
    }

    #[test]
    fn lines_seed_independently() {
        let out = &gmma_batch(&[constant_series(80, 5.0)], &[GmmaParams::default()]).unwrap()[0][0];
        // Fastest line (3) has a value at bar 2, slowest (60) does not.
        assert!(!out[2].averages[0].is_nan());
        assert!(out[2].averages[11].is_nan());
        assert!(!out[59].averages[11].is_nan());
    }

    #[test]
    fn formed_one_bar_after_slowest() {
        let out = &gmma_batch(&[constant_series(80, 5.0)], &[GmmaParams::default()]).unwrap()[0][0];
        assert!(!out[59].is_formed);
        assert!(out[60].is_formed);
    }

    #[test]
    fn constant_input_pins_every_line() {
        let out = &gmma_batch(&[constant_series(80, 7.5)], &[GmmaParams::default()]).unwrap()[0][0];
        for avg in out[70].averages {
            assert!((avg - 7.5).abs() < 1e-5);
        }
    }
}
