//! # Aroon
//!
//! Bars since the window's extreme high and low, rescaled to [0, 100].
//! The window spans `length + 1` bars including the current one.

use crate::batch::{windowed_batch, BatchError};
use crate::utilities::candle::Candle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AroonParams {
    pub length: usize,
}

impl Default for AroonParams {
    fn default() -> Self {
        Self { length: 25 }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AroonResult {
    pub time: i64,
    pub up: f32,
    pub down: f32,
    pub is_formed: bool,
}

impl Default for AroonResult {
    fn default() -> Self {
        Self {
            time: 0,
            up: f32::NAN,
            down: f32::NAN,
            is_formed: false,
        }
    }
}

pub(crate) fn aroon_at(bars: &[Candle], length: usize, i: usize) -> Option<(f32, f32)> {
    if i < length {
        return None;
    }
    let mut high_idx = i - length;
    let mut low_idx = i - length;
    for j in i - length..=i {
        if bars[j].high >= bars[high_idx].high {
            high_idx = j;
        }
        if bars[j].low <= bars[low_idx].low {
            low_idx = j;
        }
    }
    let n = length as f32;
    let up = 100.0 * (n - (i - high_idx) as f32) / n;
    let down = 100.0 * (n - (i - low_idx) as f32) / n;
    Some((up, down))
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn aroon_batch(
    series: &[Vec<Candle>],
    params: &[AroonParams],
) -> Result<Vec<Vec<Vec<AroonResult>>>, BatchError> {
    windowed_batch(series, params, |bars, prm, i| {
        let time = bars[i].time;
        match aroon_at(bars, prm.length.max(1), i) {
            Some((up, down)) => AroonResult {
                time,
                up,
                down,
                is_formed: true,
            },
            None => AroonResult {
                time,
                ..AroonResult::default()
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_high_pins_up_at_100() {
        let bars: Vec<Candle> = (0..40)
            .map(|i| {
                let c = 10.0 + i as f32;
                Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect();
        let out = &aroon_batch(&[bars], &[AroonParams::default()]).unwrap()[0][0];
        assert!(!out[24].is_formed);
        assert!(out[25].is_formed);
        let r = out[30];
        assert_eq!(r.up, 100.0);
        // Lowest low sits at the window's far end.
        assert_eq!(r.down, 0.0);
    }
}
