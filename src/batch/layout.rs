//! Series flattening and result unflattening.

use crate::batch::BatchError;
use crate::utilities::candle::Candle;

/// Offset/length tables describing where each series lands in a flat buffer.
///
/// Invariants: `offsets[0] == 0`, `offsets[i + 1] == offsets[i] + lengths[i]`
/// and `lengths.iter().sum() == total_bars`. An empty series is valid and
/// occupies zero slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesLayout {
    offsets: Vec<usize>,
    lengths: Vec<usize>,
    total_bars: usize,
}

impl SeriesLayout {
    /// Build the tables for a batch. Fails only on an empty outer batch.
    pub fn of(series: &[Vec<Candle>]) -> Result<Self, BatchError> {
        if series.is_empty() {
            return Err(BatchError::EmptySeriesBatch);
        }

        let mut offsets = Vec::with_capacity(series.len());
        let mut lengths = Vec::with_capacity(series.len());
        let mut total_bars = 0usize;
        for s in series {
            offsets.push(total_bars);
            lengths.push(s.len());
            total_bars += s.len();
        }

        Ok(Self {
            offsets,
            lengths,
            total_bars,
        })
    }

    #[inline]
    pub fn series_count(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn total_bars(&self) -> usize {
        self.total_bars
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Flat-buffer slot of one (parameter, series, bar) cell.
    #[inline]
    pub fn slot(&self, param_idx: usize, series_idx: usize, bar_idx: usize) -> usize {
        param_idx * self.total_bars + self.offsets[series_idx] + bar_idx
    }
}

/// Concatenate a ragged series batch into one contiguous buffer, preserving
/// series order and bar order exactly.
pub fn flatten_candles(series: &[Vec<Candle>]) -> Result<(Vec<Candle>, SeriesLayout), BatchError> {
    let layout = SeriesLayout::of(series)?;
    let mut flat = Vec::with_capacity(layout.total_bars());
    for s in series {
        flat.extend_from_slice(s);
    }
    Ok((flat, layout))
}

/// Split a flat per-(parameter, series) result buffer back into
/// `[series][parameter][bar]` nesting; the exact inverse of flattening.
pub fn unflatten<R: Copy>(flat: &[R], layout: &SeriesLayout, param_count: usize) -> Vec<Vec<Vec<R>>> {
    debug_assert_eq!(flat.len(), layout.total_bars() * param_count);

    let mut result = Vec::with_capacity(layout.series_count());
    for s in 0..layout.series_count() {
        let len = layout.lengths()[s];
        let offset = layout.offsets()[s];
        let mut per_param = Vec::with_capacity(param_count);
        for p in 0..param_count {
            let start = p * layout.total_bars() + offset;
            per_param.push(flat[start..start + len].to_vec());
        }
        result.push(per_param);
    }
    result
}
