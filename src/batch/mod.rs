//! Batched flatten/dispatch/unflatten engine.
//!
//! A dispatch takes a ragged batch of candle series and a batch of parameter
//! sets, flattens the candles into one contiguous buffer with per-series
//! offset/length tables, runs a kernel body once per grid cell, and splits
//! the flat `total_bars * param_count` output back into
//! `[series][parameter][bar]` nesting.
//!
//! Two grid shapes exist:
//! - [`scan_batch`]: one cell per (parameter, series); the kernel body owns
//!   a sequential loop over that series' bars and may carry recurrence state.
//! - [`windowed_batch`]: one cell per (parameter, series, bar); the kernel
//!   body computes a bar directly from its bounded lookback window.

mod dispatch;
mod layout;

pub use dispatch::{scan_batch, windowed_batch};
pub use layout::{flatten_candles, unflatten, SeriesLayout};

use thiserror::Error;

/// Caller contract violations, reported before any grid work starts.
///
/// Per-cell numeric edge cases (zero-length series, non-positive windows,
/// zero denominators, short history) are never errors; kernels resolve them
/// locally with clamps, fallback values or the NaN/not-formed sentinel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("candle series batch is empty")]
    EmptySeriesBatch,
    #[error("parameter batch is empty")]
    EmptyParamBatch,
}
