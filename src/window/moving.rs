//! Statistics over a moving time window
//!
//! Samples are bucketed by time-key in an ordered map and mirrored in a sorted
//! value list. Every public call first drops the buckets that fell out of the
//! window, so reads never observe expired samples.

use crate::time::{MonotonicClock, TimeUnit};
use crate::traits::{Clock, WindowError};
use crate::window::Summary;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Sum, mean, median and percentiles over a sliding time window
///
/// Each sample is stamped with the time elapsed since the window was created,
/// truncated to the window's [`TimeUnit`]. A sample stays live while
/// `now - stamp <= length`; once it is older it is excluded from every query.
/// There is no background timer and no prune call: expiration runs lazily at
/// the start of every public operation, reads included.
///
/// # Structure
///
/// - a time index (`BTreeMap<u64, Vec<f64>>`) from time-key to the values
///   added at that key
/// - a sorted list holding every live value in non-decreasing order
/// - a running sum of the sorted list
///
/// Insertion updates all three incrementally (binary-search insert into the
/// sorted list). Expiration splits the time index at the cutoff key and
/// rebuilds the sorted list and sum from the surviving buckets in one pass.
/// A read with nothing expired costs a single comparison against the oldest
/// key.
///
/// # Empty window
///
/// Every statistic returns `0.0` while the window is empty. Use
/// [`is_empty`](Self::is_empty) to tell "no data" apart from a real zero.
///
/// # Thread Safety
///
/// Queries take `&mut self` because they expire samples. The type does no
/// locking; callers must serialize access. With the `sync` feature,
/// [`SharedWindowedStatistics`](crate::sync::SharedWindowedStatistics) wraps
/// the whole window in a single mutex.
///
/// # Example
///
/// ```
/// use windowstats::time::TimeUnit;
/// use windowstats::WindowedStatistics;
///
/// let mut stats = WindowedStatistics::new(5, TimeUnit::Seconds);
///
/// for i in 0..=100 {
///     stats.add(i as f64);
/// }
///
/// assert_eq!(stats.sum(), 5050.0);
/// assert_eq!(stats.average(), 50.0);
/// assert_eq!(stats.median(), 50.0);
/// assert_eq!(stats.percentile(90.0), 90.0);
/// ```
#[derive(Clone, Debug)]
pub struct WindowedStatistics<C = MonotonicClock> {
    /// Time-key to the values added at that key; buckets are never empty
    time_index: BTreeMap<u64, Vec<f64>>,
    /// Every live value, non-decreasing
    values: Vec<f64>,
    /// Sum of `values`
    sum: f64,
    /// Window length in `unit`
    length: u64,
    unit: TimeUnit,
    /// Clock reading taken at construction (time-key zero)
    origin: Instant,
    clock: C,
}

impl WindowedStatistics<MonotonicClock> {
    /// Create a window of `length` units on the system monotonic clock
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(length: u64, unit: TimeUnit) -> Self {
        Self::with_clock(length, unit, MonotonicClock)
    }

    /// Create a window of `length` units on the system monotonic clock
    ///
    /// Returns [`WindowError::InvalidWindowLength`] if `length` is zero.
    pub fn try_new(length: u64, unit: TimeUnit) -> Result<Self, WindowError> {
        Self::try_with_clock(length, unit, MonotonicClock)
    }
}

impl<C: Clock> WindowedStatistics<C> {
    /// Create a window of `length` units reading time from `clock`
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn with_clock(length: u64, unit: TimeUnit, clock: C) -> Self {
        assert!(length > 0, "window length must be positive, got {}", length);
        Self::build(length, unit, clock)
    }

    /// Create a window of `length` units reading time from `clock`
    ///
    /// Returns [`WindowError::InvalidWindowLength`] if `length` is zero.
    pub fn try_with_clock(length: u64, unit: TimeUnit, clock: C) -> Result<Self, WindowError> {
        if length == 0 {
            return Err(WindowError::InvalidWindowLength { length });
        }
        Ok(Self::build(length, unit, clock))
    }

    fn build(length: u64, unit: TimeUnit, clock: C) -> Self {
        let origin = clock.now();
        Self {
            time_index: BTreeMap::new(),
            values: Vec::new(),
            sum: 0.0,
            length,
            unit,
            origin,
            clock,
        }
    }

    /// Window length in [`time_unit`](Self::time_unit)s
    pub fn window_length(&self) -> u64 {
        self.length
    }

    /// Unit used to bucket and compare timestamps
    pub fn time_unit(&self) -> TimeUnit {
        self.unit
    }

    /// Window length as a duration
    pub fn window(&self) -> Duration {
        self.unit.to_duration(self.length)
    }

    /// Add a value stamped with the current time-key
    ///
    /// NaN values are ignored to prevent poisoning the sorted order and the
    /// sum. Infinities are kept.
    pub fn add(&mut self, value: f64) {
        let now = self.expire();

        if value.is_nan() {
            debug!(time_key = now, "ignoring NaN sample");
            return;
        }

        self.time_index.entry(now).or_default().push(value);

        let idx = self
            .values
            .partition_point(|probe| probe.total_cmp(&value).is_le());
        self.values.insert(idx, value);
        self.sum += value;

        trace!(time_key = now, value, rank = idx, "sample added");
    }

    /// Number of live samples
    pub fn len(&mut self) -> usize {
        self.expire();
        self.values.len()
    }

    /// Check whether the window holds no live samples
    pub fn is_empty(&mut self) -> bool {
        self.expire();
        self.values.is_empty()
    }

    /// Sum of the live samples (0 when empty)
    pub fn sum(&mut self) -> f64 {
        self.expire();
        self.sum
    }

    /// Mean of the live samples (0 when empty)
    pub fn average(&mut self) -> f64 {
        self.expire();
        self.average_now()
    }

    /// Median of the live samples (0 when empty)
    ///
    /// With an even count this is the mean of the values at ranks `n/2 - 1`
    /// and `n/2`; with an odd count it is the value at rank `n/2`.
    pub fn median(&mut self) -> f64 {
        self.expire();
        median_of(&self.values)
    }

    /// The `p`-th percentile of the live samples (0 when empty)
    ///
    /// Returns the value at zero-based rank `ceil(p / 100 * n) - 1` of the
    /// sorted samples, so `percentile(99.9)` is the 99.9th percentile.
    ///
    /// `p` is clamped to `[0, 100]` and NaN is read as 0; the rank is kept
    /// within the sorted list, so `percentile(0.0)` is the minimum. Use
    /// [`try_percentile`](Self::try_percentile) to reject such inputs.
    pub fn percentile(&mut self, p: f64) -> f64 {
        self.expire();
        percentile_of(&self.values, p)
    }

    /// The `p`-th percentile, rejecting `p` outside `[0, 100]` or NaN
    pub fn try_percentile(&mut self, p: f64) -> Result<f64, WindowError> {
        if !(0.0..=100.0).contains(&p) {
            return Err(WindowError::InvalidPercentile { percentile: p });
        }
        Ok(self.percentile(p))
    }

    /// Several percentiles read from the same set of live samples
    pub fn percentiles(&mut self, ps: &[f64]) -> Vec<f64> {
        self.expire();
        ps.iter().map(|&p| percentile_of(&self.values, p)).collect()
    }

    /// Smallest live sample
    pub fn min(&mut self) -> Option<f64> {
        self.expire();
        self.values.first().copied()
    }

    /// Largest live sample
    pub fn max(&mut self) -> Option<f64> {
        self.expire();
        self.values.last().copied()
    }

    /// Snapshot of every statistic taken after a single expiration pass
    pub fn summary(&mut self) -> Summary {
        self.expire();
        Summary {
            count: self.values.len(),
            sum: self.sum,
            average: self.average_now(),
            median: median_of(&self.values),
            min: self.values.first().copied(),
            max: self.values.last().copied(),
        }
    }

    /// Drop every sample; time-key zero stays where it was
    pub fn clear(&mut self) {
        self.time_index.clear();
        self.values.clear();
        self.sum = 0.0;
    }

    /// Current time-key: elapsed time since `origin` in whole units
    fn time_key(&self) -> u64 {
        let elapsed = self.clock.now().saturating_duration_since(self.origin);
        self.unit.convert(elapsed)
    }

    /// Drop buckets older than the window and rebuild the derived state
    ///
    /// Runs before every public operation. Returns the time-key used as now.
    fn expire(&mut self) -> u64 {
        let now = self.time_key();

        let oldest = match self.time_index.keys().next() {
            Some(&key) => key,
            None => return now,
        };
        if now.saturating_sub(oldest) <= self.length {
            return now;
        }

        // now - oldest > length, so this cannot underflow
        let cutoff = now - self.length;
        let retained = self.time_index.split_off(&cutoff);
        let expired = core::mem::replace(&mut self.time_index, retained);
        let evicted: usize = expired.values().map(Vec::len).sum();

        self.rebuild();

        debug!(
            now,
            cutoff,
            evicted,
            retained = self.values.len(),
            "expired samples"
        );
        now
    }

    /// Recreate the sorted list and sum from the time index
    fn rebuild(&mut self) {
        self.values.clear();
        self.sum = 0.0;
        for &value in self.time_index.values().flatten() {
            self.values.push(value);
            self.sum += value;
        }
        self.values.sort_unstable_by(|a, b| a.total_cmp(b));
    }

    fn average_now(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f64
        }
    }
}

impl<C: Clock> Extend<f64> for WindowedStatistics<C> {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        0.0
    } else if n % 2 == 0 {
        (sorted[n / 2] + sorted[n / 2 - 1]) / 2.0
    } else {
        sorted[n / 2]
    }
}

fn percentile_of(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    // Float to int casts saturate, so the ceil cannot wrap
    let rank = ((p / 100.0) * n as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(n - 1)]
}

// ============================================================================
// Tests
// ============================================================================
