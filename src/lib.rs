//! Batched technical-analysis indicators.
//!
//! Every indicator in this crate evaluates a batch of candle series crossed
//! with a batch of parameter sets in a single dispatch. Inputs are flattened
//! into contiguous buffers with per-series offset/length tables, kernels run
//! once per (parameter, series[, bar]) grid cell over the flat buffers, and
//! the flat output is split back into `[series][parameter][bar]` nesting.
//!
//! The grid contract lives in [`batch`]; each module under [`indicators`]
//! contributes only its parameter record, result record and kernel body.

pub mod batch;
pub mod indicators;
pub mod utilities;

pub use batch::{flatten_candles, scan_batch, unflatten, windowed_batch, BatchError, SeriesLayout};
pub use utilities::candle::{extract_price, Candle, PriceKind};
pub use utilities::IndicatorResult;
