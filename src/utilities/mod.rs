pub mod candle;
pub mod data_loader;
pub mod math;

use serde::{Deserialize, Serialize};

/// Per-bar output shared by every single-value indicator.
///
/// `value` stays NaN and `is_formed` stays false until the indicator has
/// accumulated enough history; both are always written, so a result buffer
/// never has gaps. Composite indicators define their own records with the
/// same time/formed discipline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    /// Timestamp in ticks, copied from the source candle.
    pub time: i64,
    pub value: f32,
    pub is_formed: bool,
}

impl Default for IndicatorResult {
    fn default() -> Self {
        Self {
            time: 0,
            value: f32::NAN,
            is_formed: false,
        }
    }
}

impl IndicatorResult {
    #[inline]
    pub fn empty(time: i64) -> Self {
        Self {
            time,
            value: f32::NAN,
            is_formed: false,
        }
    }

    #[inline]
    pub fn formed(time: i64, value: f32) -> Self {
        Self {
            time,
            value,
            is_formed: true,
        }
    }
}
