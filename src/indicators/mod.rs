//! Indicator catalog.
//!
//! Each module pairs a parameter record, a result record and a kernel body,
//! and exposes one `*_batch` entry point over the grid engine in
//! [`crate::batch`]. Edge-case policy is uniform: window lengths clamp to a
//! minimum of 1, zero denominators resolve to a documented fallback, and
//! bars with insufficient history emit NaN with the formed flag down.

// Moving averages
pub mod alma;
pub mod dema;
pub mod ema;
pub mod gmma;
pub mod hma;
pub mod ichimoku;
pub mod kama;
pub mod linreg;
pub mod linreg_slope;
pub mod ma_ribbon;
pub mod mcginley;
pub mod sma;
pub mod smma;
pub mod t3;
pub mod tema;
pub mod trima;
pub mod vidya;
pub mod vwma;
pub mod wma;
pub mod zlema;

// Oscillators
pub mod apo;
pub mod awesome;
pub mod bop;
pub mod cci;
pub mod cg;
pub mod cmo;
pub mod composite_momentum;
pub mod connors_rsi;
pub mod constance_brown;
pub mod demarker;
pub mod dpo;
pub mod fisher;
pub mod kst;
pub mod macd;
pub mod momentum;
pub mod ppo;
pub mod roc;
pub mod rocp;
pub mod rsi;
pub mod schaff_trend_cycle;
pub mod stoch_rsi;
pub mod stochastic;
pub mod trix;
pub mod tsi;
pub mod ultimate;
pub mod willr;

// Volatility
pub mod atr;
pub mod bollinger;
pub mod bollinger_width;
pub mod cvi;
pub mod donchian;
pub mod keltner;
pub mod mass_index;
pub mod natr;
pub mod stddev;
pub mod true_range;
pub mod ulcer_index;

// Volume
pub mod ad;
pub mod adosc;
pub mod cmf;
pub mod efi;
pub mod emv;
pub mod kvo;
pub mod mfi;
pub mod nvi;
pub mod obv;
pub mod pvi;
pub mod twiggs_mf;
pub mod vosc;
pub mod vpt;

// Trend / direction
pub mod adx;
pub mod aroon;
pub mod aroon_osc;
pub mod di;
pub mod dx;
pub mod psar;
pub mod supertrend;
pub mod vhf;
pub mod vortex;

// Price transforms
pub mod avgprice;
pub mod medprice;
pub mod typprice;
pub mod wclprice;
