//! Candle record and price-field selection.

use serde::{Deserialize, Serialize};

/// One OHLCV bar. Plain data, owned by the caller and read-only to every
/// kernel; `time` is in ticks and is copied verbatim into results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub volume: f32,
}

impl Candle {
    pub fn new(time: i64, open: f32, high: f32, low: f32, close: f32, volume: f32) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Which price a kernel reads from a candle.
///
/// The calculated variants match the usual composite prices: `Median` = HL2,
/// `Typical` = HLC3, `Weighted` = HLCC4, `Average` = OHLC4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceKind {
    Open,
    High,
    Low,
    #[default]
    Close,
    Volume,
    Median,
    Typical,
    Weighted,
    Average,
}

/// Pure price selection; every kernel body goes through this.
#[inline(always)]
pub fn extract_price(candle: &Candle, kind: PriceKind) -> f32 {
    match kind {
        PriceKind::Open => candle.open,
        PriceKind::High => candle.high,
        PriceKind::Low => candle.low,
        PriceKind::Close => candle.close,
        PriceKind::Volume => candle.volume,
        PriceKind::Median => (candle.high + candle.low) / 2.0,
        PriceKind::Typical => (candle.high + candle.low + candle.close) / 3.0,
        PriceKind::Weighted => (candle.high + candle.low + 2.0 * candle.close) / 4.0,
        PriceKind::Average => (candle.open + candle.high + candle.low + candle.close) / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculated_prices() {
        let c = Candle::new(1, 2.0, 10.0, 6.0, 8.0, 100.0);
        assert_eq!(extract_price(&c, PriceKind::Median), 8.0);
        assert_eq!(extract_price(&c, PriceKind::Typical), 8.0);
        assert_eq!(extract_price(&c, PriceKind::Weighted), 8.0);
        assert_eq!(extract_price(&c, PriceKind::Average), 6.5);
        assert_eq!(extract_price(&c, PriceKind::Volume), 100.0);
    }
}
