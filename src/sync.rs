//! Thread-safe window
//!
//! [`SharedWindowedStatistics`] puts one mutex around a whole
//! [`WindowedStatistics`]. Every call holds the lock from the expiration pass
//! to the returned value, so the time index, sorted list and sum are always
//! observed together.

use crate::time::{MonotonicClock, TimeUnit};
use crate::traits::{Clock, WindowError};
use crate::window::{Summary, WindowedStatistics};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// A [`WindowedStatistics`] that can be shared across threads
///
/// Clones are handles to the same window.
///
/// # Example
///
/// ```
/// use std::thread;
/// use windowstats::sync::SharedWindowedStatistics;
/// use windowstats::time::TimeUnit;
///
/// let stats = SharedWindowedStatistics::new(5, TimeUnit::Seconds);
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let stats = stats.clone();
///         thread::spawn(move || {
///             for i in 0..25 {
///                 stats.add((t * 25 + i) as f64);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(stats.len(), 100);
/// assert_eq!(stats.sum(), 4950.0);
/// ```
#[derive(Debug)]
pub struct SharedWindowedStatistics<C = MonotonicClock> {
    inner: Arc<Mutex<WindowedStatistics<C>>>,
}

impl<C> Clone for SharedWindowedStatistics<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedWindowedStatistics<MonotonicClock> {
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn new(length: u64, unit: TimeUnit) -> Self {
        Self::from(WindowedStatistics::new(length, unit))
    }

    pub fn try_new(length: u64, unit: TimeUnit) -> Result<Self, WindowError> {
        WindowedStatistics::try_new(length, unit).map(Self::from)
    }
}

impl<C: Clock> SharedWindowedStatistics<C> {
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn with_clock(length: u64, unit: TimeUnit, clock: C) -> Self {
        Self::from(WindowedStatistics::with_clock(length, unit, clock))
    }

    pub fn add(&self, value: f64) {
        self.inner.lock().add(value);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.inner.lock().sum()
    }

    pub fn average(&self) -> f64 {
        self.inner.lock().average()
    }

    pub fn median(&self) -> f64 {
        self.inner.lock().median()
    }

    pub fn percentile(&self, p: f64) -> f64 {
        self.inner.lock().percentile(p)
    }

    pub fn try_percentile(&self, p: f64) -> Result<f64, WindowError> {
        self.inner.lock().try_percentile(p)
    }

    pub fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        self.inner.lock().percentiles(ps)
    }

    pub fn min(&self) -> Option<f64> {
        self.inner.lock().min()
    }

    pub fn max(&self) -> Option<f64> {
        self.inner.lock().max()
    }

    pub fn summary(&self) -> Summary {
        self.inner.lock().summary()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn window(&self) -> Duration {
        self.inner.lock().window()
    }

    /// Run `f` with exclusive access to the underlying window
    ///
    /// Use this to read several statistics without another thread adding
    /// samples in between.
    pub fn with<R>(&self, f: impl FnOnce(&mut WindowedStatistics<C>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl<C> From<WindowedStatistics<C>> for SharedWindowedStatistics<C> {
    fn from(stats: WindowedStatistics<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stats)),
        }
    }
}
