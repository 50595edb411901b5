//! Grid dispatch over (parameter, series[, bar]) cells.

use crate::batch::layout::{flatten_candles, unflatten, SeriesLayout};
use crate::batch::BatchError;
use crate::utilities::candle::Candle;
use log::debug;
use rayon::prelude::*;

/// Split one parameter's output row into disjoint per-series slices.
///
/// The row is `total_bars` long; series boundaries come from the layout, so
/// every (parameter, series) cell owns a non-overlapping write range and the
/// grid needs no locks or atomics.
fn series_views<'a, R>(
    mut row: &'a mut [R],
    layout: &SeriesLayout,
) -> Vec<(usize, &'a mut [R])> {
    let mut views = Vec::with_capacity(layout.series_count());
    for (s, &len) in layout.lengths().iter().enumerate() {
        let (head, tail) = row.split_at_mut(len);
        views.push((s, head));
        row = tail;
    }
    views
}

/// 2-axis dispatch: one grid cell per (parameter, series).
///
/// The kernel body receives the series' candles and the cell's output slice
/// and scans bars in time order, carrying whatever recurrence state it needs
/// in locals. It must write every slot, including warm-up bars. Zero-length
/// series are skipped. The call blocks until the whole grid has run.
pub fn scan_batch<P, R, K>(
    series: &[Vec<Candle>],
    params: &[P],
    kernel: K,
) -> Result<Vec<Vec<Vec<R>>>, BatchError>
where
    P: Sync,
    R: Copy + Default + Send + Sync,
    K: Fn(&[Candle], &P, &mut [R]) + Sync,
{
    let (flat, layout) = prepare(series, params)?;
    debug!(
        "scan grid: {} params x {} series ({} bars)",
        params.len(),
        layout.series_count(),
        layout.total_bars()
    );

    let mut flat_out = vec![R::default(); layout.total_bars() * params.len()];
    flat_out
        .par_chunks_mut(layout.total_bars().max(1))
        .zip(params.par_iter())
        .for_each(|(row, prm)| {
            series_views(row, &layout)
                .into_par_iter()
                .for_each(|(s, out)| {
                    if out.is_empty() {
                        return;
                    }
                    let offset = layout.offsets()[s];
                    kernel(&flat[offset..offset + out.len()], prm, out);
                });
        });

    Ok(unflatten(&flat_out, &layout, params.len()))
}

/// 3-axis dispatch: one grid cell per (parameter, series, bar).
///
/// The kernel body computes bar `i` directly from a bounded window of the
/// series' candles with no cross-bar mutable state, so bars run in any order
/// and fully in parallel. The call blocks until the whole grid has run.
pub fn windowed_batch<P, R, K>(
    series: &[Vec<Candle>],
    params: &[P],
    kernel: K,
) -> Result<Vec<Vec<Vec<R>>>, BatchError>
where
    P: Sync,
    R: Copy + Default + Send + Sync,
    K: Fn(&[Candle], &P, usize) -> R + Sync,
{
    let (flat, layout) = prepare(series, params)?;
    debug!(
        "windowed grid: {} params x {} series x {} bars",
        params.len(),
        layout.series_count(),
        layout.total_bars()
    );

    let mut flat_out = vec![R::default(); layout.total_bars() * params.len()];
    flat_out
        .par_chunks_mut(layout.total_bars().max(1))
        .zip(params.par_iter())
        .for_each(|(row, prm)| {
            series_views(row, &layout)
                .into_par_iter()
                .for_each(|(s, out)| {
                    if out.is_empty() {
                        return;
                    }
                    let offset = layout.offsets()[s];
                    let bars = &flat[offset..offset + out.len()];
                    out.par_iter_mut()
                        .enumerate()
                        .for_each(|(i, slot)| *slot = kernel(bars, prm, i));
                });
        });

    Ok(unflatten(&flat_out, &layout, params.len()))
}

fn prepare(
    series: &[Vec<Candle>],
    params: &[impl Sized],
) -> Result<(Vec<Candle>, SeriesLayout), BatchError> {
    if params.is_empty() {
        // Checked before flattening so neither empty input does any work.
        if series.is_empty() {
            return Err(BatchError::EmptySeriesBatch);
        }
        return Err(BatchError::EmptyParamBatch);
    }
    flatten_candles(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::IndicatorResult;

    fn series_of(closes: &[f32]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 1.0))
            .collect()
    }

    /// Kernel writing param-tagged values so addressing mistakes show up.
    fn tag_kernel(bars: &[Candle], tag: &f32, out: &mut [IndicatorResult]) {
        for (i, c) in bars.iter().enumerate() {
            out[i] = IndicatorResult::formed(c.time, c.close * 10.0 + tag);
        }
    }

    #[test]
    fn scan_shape_matches_input() {
        let batch = vec![
            series_of(&[1.0, 2.0, 3.0]),
            series_of(&[]),
            series_of(&[4.0, 5.0]),
        ];
        let params = vec![1.0f32, 2.0];
        let result = scan_batch(&batch, &params, tag_kernel).unwrap();

        assert_eq!(result.len(), 3);
        for (s, per_param) in result.iter().enumerate() {
            assert_eq!(per_param.len(), 2);
            for (p, bars) in per_param.iter().enumerate() {
                assert_eq!(bars.len(), batch[s].len());
                for (i, r) in bars.iter().enumerate() {
                    assert_eq!(r.value, batch[s][i].close * 10.0 + params[p]);
                }
            }
        }
        assert!(result[1][0].is_empty());
    }

    #[test]
    fn windowed_matches_scan_addressing() {
        let batch = vec![series_of(&[1.0, 2.0]), series_of(&[3.0])];
        let params = vec![7.0f32];
        let windowed = windowed_batch(&batch, &params, |bars, tag, i| {
            IndicatorResult::formed(bars[i].time, bars[i].close * 10.0 + tag)
        })
        .unwrap();
        let scanned = scan_batch(&batch, &params, tag_kernel).unwrap();
        assert_eq!(windowed, scanned);
    }

    #[test]
    fn empty_batches_fail_fast() {
        let batch = vec![series_of(&[1.0])];
        let no_params: Vec<f32> = Vec::new();
        assert_eq!(
            scan_batch::<_, IndicatorResult, _>(&batch, &no_params, tag_kernel).unwrap_err(),
            BatchError::EmptyParamBatch
        );
        assert_eq!(
            scan_batch::<_, IndicatorResult, _>(&[], &[1.0f32], tag_kernel).unwrap_err(),
            BatchError::EmptySeriesBatch
        );
    }

    #[test]
    fn idempotent_across_calls() {
        let batch = vec![series_of(&[1.0, 2.0, 3.0, 4.0])];
        let params = vec![1.0f32, 2.0, 3.0];
        let a = scan_batch(&batch, &params, tag_kernel).unwrap();
        let b = scan_batch(&batch, &params, tag_kernel).unwrap();
        assert_eq!(a, b);
    }
}
