//! Shared recurrence state machines.
//!
//! Scan-shaped kernels carry their state in locals for the duration of one
//! series; these small structs capture the warm-up patterns that repeat
//! across the catalog so each kernel body stays a few lines of formula.

/// Seeded exponential moving average.
///
/// The first `length` inputs accumulate a running sum; input `length - 1`
/// emits the simple average as the seed and flips the formed flag, after
/// which the usual `ema += (x - ema) * 2 / (length + 1)` update applies.
#[derive(Clone, Copy, Debug)]
pub struct EmaState {
    length: usize,
    alpha: f32,
    sum: f32,
    count: usize,
    value: f32,
}

impl EmaState {
    pub fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            length,
            alpha: 2.0 / (length as f32 + 1.0),
            sum: 0.0,
            count: 0,
            value: f32::NAN,
        }
    }

    /// Feed one input; returns the current EMA or NaN while warming up.
    #[inline]
    pub fn update(&mut self, x: f32) -> f32 {
        self.count += 1;
        if self.count < self.length {
            self.sum += x;
            return f32::NAN;
        }
        if self.count == self.length {
            self.sum += x;
            self.value = self.sum / self.length as f32;
        } else {
            self.value += (x - self.value) * self.alpha;
        }
        self.value
    }

    #[inline]
    pub fn is_formed(&self) -> bool {
        self.count >= self.length
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Seeded Wilder moving average (RMA), the ATR/ADX smoother: same warm-up
/// as [`EmaState`] but the recurrence divides by `length`.
#[derive(Clone, Copy, Debug)]
pub struct WilderState {
    length: usize,
    sum: f32,
    count: usize,
    value: f32,
}

impl WilderState {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            sum: 0.0,
            count: 0,
            value: f32::NAN,
        }
    }

    #[inline]
    pub fn update(&mut self, x: f32) -> f32 {
        self.count += 1;
        if self.count < self.length {
            self.sum += x;
            return f32::NAN;
        }
        if self.count == self.length {
            self.sum += x;
            self.value = self.sum / self.length as f32;
        } else {
            self.value += (x - self.value) / self.length as f32;
        }
        self.value
    }

    #[inline]
    pub fn is_formed(&self) -> bool {
        self.count >= self.length
    }
}

/// Wilder RSI over an arbitrary input stream.
///
/// The first input only primes the previous value. Gains and losses then
/// accumulate for `length` deltas before switching to the smoothed
/// recurrence. A zero average loss resolves to 100 rather than dividing.
#[derive(Clone, Copy, Debug)]
pub struct RsiState {
    length: usize,
    prev: f32,
    has_prev: bool,
    avg_gain: f32,
    avg_loss: f32,
    warmup: usize,
    formed: bool,
}

impl RsiState {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            prev: 0.0,
            has_prev: false,
            avg_gain: 0.0,
            avg_loss: 0.0,
            warmup: 0,
            formed: false,
        }
    }

    /// Feed one input; returns RSI in [0, 100] or NaN while warming up.
    pub fn update(&mut self, x: f32) -> f32 {
        if !self.has_prev {
            self.prev = x;
            self.has_prev = true;
            return f32::NAN;
        }

        let delta = x - self.prev;
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        self.prev = x;

        let len = self.length as f32;
        if !self.formed {
            self.avg_gain += gain;
            self.avg_loss += loss;
            self.warmup += 1;
            if self.warmup >= self.length {
                self.avg_gain /= len;
                self.avg_loss /= len;
                self.formed = true;
            } else {
                return f32::NAN;
            }
        } else {
            self.avg_gain = (self.avg_gain * (len - 1.0) + gain) / len;
            self.avg_loss = (self.avg_loss * (len - 1.0) + loss) / len;
        }

        if self.avg_loss == 0.0 {
            return 100.0;
        }
        let rs = self.avg_gain / self.avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }

    #[inline]
    pub fn is_formed(&self) -> bool {
        self.formed
    }
}
