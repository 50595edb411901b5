//! # Ichimoku Kinko Hyo
//!
//! Five lines per bar: Tenkan and Kijun midpoints, the two Senkou spans
//! shifted forward by the Kijun length, and the Chinkou close. The shift is
//! realized with small in-kernel queues so a span value computed at bar `i`
//! is reported `kijun_length` bars later.

use std::collections::VecDeque;

use crate::batch::{scan_batch, BatchError};
use crate::utilities::candle::Candle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IchimokuParams {
    pub tenkan_length: usize,
    pub kijun_length: usize,
    pub senkou_b_length: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan_length: 9,
            kijun_length: 26,
            senkou_b_length: 52,
        }
    }
}

/// One bar of Ichimoku output with per-line readiness flags.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IchimokuResult {
    pub time: i64,
    pub tenkan: f32,
    pub kijun: f32,
    pub senkou_a: f32,
    pub senkou_b: f32,
    pub chinkou: f32,
    pub tenkan_is_formed: bool,
    pub kijun_is_formed: bool,
    pub senkou_a_is_formed: bool,
    pub senkou_b_is_formed: bool,
    pub chinkou_is_formed: bool,
    pub is_formed: bool,
}

impl Default for IchimokuResult {
    fn default() -> Self {
        Self {
            time: 0,
            tenkan: f32::NAN,
            kijun: f32::NAN,
            senkou_a: f32::NAN,
            senkou_b: f32::NAN,
            chinkou: f32::NAN,
            tenkan_is_formed: false,
            kijun_is_formed: false,
            senkou_a_is_formed: false,
            senkou_b_is_formed: false,
            chinkou_is_formed: false,
            is_formed: false,
        }
    }
}

fn midpoint(bars: &[Candle], length: usize, i: usize) -> f32 {
    if i + 1 < length {
        return f32::NAN;
    }
    let mut max_high = f32::NEG_INFINITY;
    let mut min_low = f32::INFINITY;
    for c in &bars[i + 1 - length..=i] {
        max_high = max_high.max(c.high);
        min_low = min_low.min(c.low);
    }
    (max_high + min_low) / 2.0
}

/// Evaluate every parameter set against every series in one dispatch.
pub fn ichimoku_batch(
    series: &[Vec<Candle>],
    params: &[IchimokuParams],
) -> Result<Vec<Vec<Vec<IchimokuResult>>>, BatchError> {
    scan_batch(series, params, ichimoku_kernel)
}

fn ichimoku_kernel(bars: &[Candle], prm: &IchimokuParams, out: &mut [IchimokuResult]) {
    let tenkan_length = prm.tenkan_length.max(1);
    let kijun_length = prm.kijun_length.max(1);
    let senkou_b_length = prm.senkou_b_length.max(1);

    let mut senkou_a_queue: VecDeque<f32> = VecDeque::with_capacity(kijun_length);
    let mut senkou_b_queue: VecDeque<f32> = VecDeque::with_capacity(kijun_length);

    for (i, c) in bars.iter().enumerate() {
        let tenkan = midpoint(bars, tenkan_length, i);
        let kijun = midpoint(bars, kijun_length, i);
        let raw_senkou_a = if !tenkan.is_nan() && !kijun.is_nan() {
            (tenkan + kijun) / 2.0
        } else {
            f32::NAN
        };
        let raw_senkou_b = midpoint(bars, senkou_b_length, i);

        let kijun_formed = i + 1 >= kijun_length;

        // Span A surfaces once kijun_length raw values are queued, with the
        // edge bar reported as soon as the queue is about to fill.
        let mut senkou_a = f32::NAN;
        if !senkou_a_queue.is_empty()
            && (senkou_a_queue.len() >= kijun_length
                || (!raw_senkou_a.is_nan() && senkou_a_queue.len() == kijun_length - 1))
        {
            senkou_a = *senkou_a_queue.front().unwrap();
        }
        if !raw_senkou_a.is_nan() {
            senkou_a_queue.push_back(raw_senkou_a);
            if senkou_a_queue.len() > kijun_length {
                senkou_a_queue.pop_front();
            }
        }

        let mut senkou_b = f32::NAN;
        if !senkou_b_queue.is_empty()
            && (senkou_b_queue.len() >= kijun_length
                || (kijun_formed
                    && !raw_senkou_b.is_nan()
                    && senkou_b_queue.len() == kijun_length - 1))
        {
            senkou_b = *senkou_b_queue.front().unwrap();
        }
        if kijun_formed && !raw_senkou_b.is_nan() {
            senkou_b_queue.push_back(raw_senkou_b);
            if senkou_b_queue.len() > kijun_length {
                senkou_b_queue.pop_front();
            }
        }

        let tenkan_formed = i + 1 >= tenkan_length;
        let senkou_a_formed = senkou_a_queue.len() >= kijun_length;
        let senkou_b_formed = i + 1 >= senkou_b_length && senkou_b_queue.len() >= kijun_length;
        let chinkou_formed = kijun_formed;

        out[i] = IchimokuResult {
            time: c.time,
            tenkan,
            kijun,
            senkou_a,
            senkou_b,
            chinkou: c.close,
            tenkan_is_formed: tenkan_formed,
            kijun_is_formed: kijun_formed,
            senkou_a_is_formed: senkou_a_formed,
            senkou_b_is_formed: senkou_b_formed,
            chinkou_is_formed: chinkou_formed,
            is_formed: tenkan_formed
                && kijun_formed
                && senkou_a_formed
                && senkou_b_formed
                && chinkou_formed,
        };
    }
}
