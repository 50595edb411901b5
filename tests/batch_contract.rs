//! Cross-indicator contract tests for the batch dispatch layer: output
//! geometry, flatten/unflatten addressing, degenerate inputs, and the
//! warm-up conventions every kernel follows.

use batchta::indicators::ema::{ema_batch, EmaParams};
use batchta::indicators::rsi::{rsi_batch, RsiParams};
use batchta::indicators::sma::{sma_batch, SmaParams};
use batchta::utilities::data_loader::read_candles_from_csv;
use batchta::{flatten_candles, unflatten, BatchError, Candle, PriceKind};
use proptest::prelude::*;

fn candles(closes: &[f32]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(i as i64, c, c + 1.0, c - 1.0, c, 100.0))
        .collect()
}

#[test]
fn output_shape_matches_input_grid() {
    let series = vec![
        candles(&[1.0; 10]),
        candles(&[2.0; 3]),
        Vec::new(),
        candles(&[3.0; 7]),
    ];
    let params = vec![
        SmaParams {
            length: 3,
            price: PriceKind::Close,
        },
        SmaParams {
            length: 5,
            price: PriceKind::Close,
        },
    ];
    let out = sma_batch(&series, &params).unwrap();

    assert_eq!(out.len(), series.len());
    for (s, per_series) in out.iter().enumerate() {
        assert_eq!(per_series.len(), params.len());
        for per_param in per_series {
            assert_eq!(per_param.len(), series[s].len());
        }
    }
    // Empty inner series stays empty for every parameter set.
    assert!(out[2].iter().all(|row| row.is_empty()));
}

#[test]
fn empty_series_batch_is_rejected_before_work() {
    let err = sma_batch(&[], &[SmaParams::default()]).unwrap_err();
    assert_eq!(err, BatchError::EmptySeriesBatch);
}

#[test]
fn empty_param_batch_is_rejected_before_work() {
    let err = sma_batch(&[candles(&[1.0, 2.0])], &[]).unwrap_err();
    assert_eq!(err, BatchError::EmptyParamBatch);
}

#[test]
fn both_empty_reports_the_series_batch_first() {
    let err = sma_batch(&[], &[]).unwrap_err();
    assert_eq!(err, BatchError::EmptySeriesBatch);
}

#[test]
fn per_series_results_are_independent_of_batch_composition() {
    let a = candles(&(0..60).map(|i| 100.0 + (i as f32 * 0.3).sin()).collect::<Vec<_>>());
    let b = candles(&(0..25).map(|i| 50.0 + i as f32).collect::<Vec<_>>());
    let params = [EmaParams {
        length: 9,
        price: PriceKind::Close,
    }];

    let alone = ema_batch(&[a.clone()], &params).unwrap();
    let together = ema_batch(&[b, a], &params).unwrap();

    for (lhs, rhs) in alone[0][0].iter().zip(together[1][0].iter()) {
        assert_eq!(lhs.time, rhs.time);
        assert_eq!(lhs.is_formed, rhs.is_formed);
        assert!(lhs.value == rhs.value || (lhs.value.is_nan() && rhs.value.is_nan()));
    }
}

#[test]
fn repeated_dispatch_is_deterministic() {
    let series = vec![
        candles(&(0..80).map(|i| 100.0 + (i as f32 * 0.2).cos()).collect::<Vec<_>>()),
        candles(&(0..40).map(|i| 10.0 + i as f32).collect::<Vec<_>>()),
    ];
    let params = [RsiParams::default(), RsiParams {
        length: 7,
        price: PriceKind::Close,
    }];

    let first = rsi_batch(&series, &params).unwrap();
    let second = rsi_batch(&series, &params).unwrap();

    for (s1, s2) in first.iter().zip(second.iter()) {
        for (p1, p2) in s1.iter().zip(s2.iter()) {
            for (r1, r2) in p1.iter().zip(p2.iter()) {
                assert_eq!(r1.is_formed, r2.is_formed);
                assert!(r1.value == r2.value || (r1.value.is_nan() && r2.value.is_nan()));
            }
        }
    }
}

#[test]
fn zero_length_clamps_to_one() {
    let series = vec![candles(&[10.0, 20.0, 30.0])];
    let out = sma_batch(
        &series,
        &[SmaParams {
            length: 0,
            price: PriceKind::Close,
        }],
    )
    .unwrap();
    // Window of one: every bar is formed and equals its own price.
    for (r, c) in out[0][0].iter().zip(series[0].iter()) {
        assert!(r.is_formed);
        assert_eq!(r.value, c.close);
    }
}

#[test]
fn warmup_bars_are_empty_then_all_formed() {
    let series = vec![candles(&(0..50).map(|i| i as f32).collect::<Vec<_>>())];
    let out = ema_batch(
        &series,
        &[EmaParams {
            length: 12,
            price: PriceKind::Close,
        }],
    )
    .unwrap();
    let row = &out[0][0];
    let first_formed = row.iter().position(|r| r.is_formed).unwrap();
    assert_eq!(first_formed, 11);
    assert!(row[..first_formed].iter().all(|r| r.value.is_nan()));
    assert!(row[first_formed..].iter().all(|r| r.is_formed));
}

#[test]
fn csv_fixture_feeds_the_grid() {
    let candles = read_candles_from_csv("src/data/candles_4h.csv").unwrap();
    let out = ema_batch(&[candles], &[EmaParams::default()]).unwrap();
    let row = &out[0][0];
    assert!(row.last().unwrap().is_formed);
    assert!(row.last().unwrap().value.is_finite());
}

proptest! {
    #[test]
    fn flatten_unflatten_round_trips(
        lengths in prop::collection::vec(0usize..20, 1..6),
        param_count in 1usize..4,
    ) {
        let series: Vec<Vec<Candle>> = lengths
            .iter()
            .enumerate()
            .map(|(s, &n)| {
                (0..n)
                    .map(|i| {
                        let v = (s * 100 + i) as f32;
                        Candle::new(i as i64, v, v, v, v, 1.0)
                    })
                    .collect()
            })
            .collect();

        let (flat, layout) = flatten_candles(&series).unwrap();
        prop_assert_eq!(flat.len(), layout.total_bars());

        // Tag each output slot with its flat index, then check unflatten
        // places it at the expected [series][param][bar] coordinate.
        let row: Vec<usize> = (0..layout.total_bars()).collect();
        let mut tagged = Vec::new();
        for p in 0..param_count {
            tagged.extend(row.iter().map(|&i| p * layout.total_bars() + i));
        }
        let nested = unflatten(&tagged, &layout, param_count);

        prop_assert_eq!(nested.len(), series.len());
        for (s, per_series) in nested.iter().enumerate() {
            prop_assert_eq!(per_series.len(), param_count);
            for (p, per_param) in per_series.iter().enumerate() {
                prop_assert_eq!(per_param.len(), series[s].len());
                for (i, &slot) in per_param.iter().enumerate() {
                    prop_assert_eq!(slot, layout.slot(p, s, i));
                }
            }
        }
    }

    #[test]
    fn flat_candles_preserve_series_order(
        lengths in prop::collection::vec(0usize..12, 1..5),
    ) {
        let series: Vec<Vec<Candle>> = lengths
            .iter()
            .enumerate()
            .map(|(s, &n)| {
                (0..n)
                    .map(|i| {
                        let v = (s * 1000 + i) as f32;
                        Candle::new(i as i64, v, v, v, v, 1.0)
                    })
                    .collect()
            })
            .collect();

        let (flat, layout) = flatten_candles(&series).unwrap();
        for (s, bars) in series.iter().enumerate() {
            let offset = layout.offsets()[s];
            for (i, c) in bars.iter().enumerate() {
                prop_assert_eq!(flat[offset + i].close, c.close);
            }
        }
    }
}
