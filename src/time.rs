//! Time units and clocks
//!
//! Windows bucket samples by an integer time-key: the time elapsed since the
//! window was created, truncated to a [`TimeUnit`]. The instants come from a
//! [`Clock`]; [`MonotonicClock`] reads the system monotonic clock and
//! [`ManualClock`] is moved by hand so time-dependent behavior can be driven
//! deterministically.

use crate::traits::Clock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Granularity at which a window buckets and compares timestamps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of one unit in nanoseconds
    pub const fn as_nanos(self) -> u128 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60 * 1_000_000_000,
            TimeUnit::Hours => 3_600 * 1_000_000_000,
            TimeUnit::Days => 86_400 * 1_000_000_000,
        }
    }

    /// Number of whole units in `elapsed`
    ///
    /// Truncates toward zero and saturates at `u64::MAX`.
    pub fn convert(self, elapsed: Duration) -> u64 {
        let units = elapsed.as_nanos() / self.as_nanos();
        u64::try_from(units).unwrap_or(u64::MAX)
    }

    /// Duration spanned by `amount` units, saturating on overflow
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(amount),
            TimeUnit::Microseconds => Duration::from_micros(amount),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(amount.saturating_mul(3_600)),
            TimeUnit::Days => Duration::from_secs(amount.saturating_mul(86_400)),
        }
    }

    /// Lowercase unit name
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl core::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The system monotonic clock
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same offset, so a test can keep one handle while the
/// window owns another.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use windowstats::time::{ManualClock, TimeUnit};
/// use windowstats::WindowedStatistics;
///
/// let clock = ManualClock::new();
/// let mut stats = WindowedStatistics::with_clock(2, TimeUnit::Seconds, clock.clone());
///
/// stats.add(10.0);
/// clock.advance(Duration::from_secs(3));
///
/// assert!(stats.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    base: Instant,
    /// Nanoseconds elapsed since `base`
    offset: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock anchored at the current instant
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let delta = duration_to_nanos(by);
        let _ = self
            .offset
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_add(delta))
            });
    }

    /// Set the time elapsed since the clock was created
    ///
    /// Moving backwards is ignored; a clock never decreases.
    pub fn set(&self, elapsed: Duration) {
        self.offset
            .fetch_max(duration_to_nanos(elapsed), Ordering::Relaxed);
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset.load(Ordering::Relaxed))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let nanos = self.offset.load(Ordering::Relaxed);
        self.base
            .checked_add(Duration::from_nanos(nanos))
            .unwrap_or(self.base)
    }
}

fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_truncates() {
        let elapsed = Duration::from_millis(4_999);
        assert_eq!(TimeUnit::Seconds.convert(elapsed), 4);
        assert_eq!(TimeUnit::Milliseconds.convert(elapsed), 4_999);
        assert_eq!(TimeUnit::Microseconds.convert(elapsed), 4_999_000);
        assert_eq!(TimeUnit::Minutes.convert(elapsed), 0);
    }

    #[test]
    fn test_convert_large_units() {
        assert_eq!(TimeUnit::Minutes.convert(Duration::from_secs(125)), 2);
        assert_eq!(TimeUnit::Hours.convert(Duration::from_secs(7_200)), 2);
        assert_eq!(TimeUnit::Days.convert(Duration::from_secs(86_399)), 0);
        assert_eq!(TimeUnit::Days.convert(Duration::from_secs(86_400)), 1);
    }

    #[test]
    fn test_convert_saturates() {
        assert_eq!(TimeUnit::Nanoseconds.convert(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_to_duration() {
        assert_eq!(TimeUnit::Seconds.to_duration(5), Duration::from_secs(5));
        assert_eq!(TimeUnit::Minutes.to_duration(2), Duration::from_secs(120));
        assert_eq!(TimeUnit::Days.to_duration(1), Duration::from_secs(86_400));
        assert_eq!(TimeUnit::Milliseconds.to_duration(500), Duration::from_millis(500));
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeUnit::Milliseconds.to_string(), "milliseconds");
        assert_eq!(TimeUnit::Days.to_string(), "days");
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();

        other.advance(Duration::from_millis(250));

        assert_eq!(clock.now() - start, Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(10));
        clock.set(Duration::from_secs(4));
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn test_monotonic_clock() {
        let clock = MonotonicClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
