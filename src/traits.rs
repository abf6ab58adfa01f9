//! Core traits and error types
//!
//! The [`Clock`] trait is the only environmental dependency of a window: every
//! time-key is derived from the instant it returns. [`WindowError`] covers the
//! inputs a window refuses at the boundary.

use std::time::Instant;

/// Error raised for arguments a window cannot accept
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowError {
    /// Window length must be at least one unit
    InvalidWindowLength {
        length: u64,
    },
    /// Percentile must be a number in `[0, 100]`
    InvalidPercentile {
        percentile: f64,
    },
}

impl core::fmt::Display for WindowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WindowError::InvalidWindowLength { length } => {
                write!(f, "invalid window length: {} (must be positive)", length)
            }
            WindowError::InvalidPercentile { percentile } => {
                write!(f, "invalid percentile: {} (must be within [0, 100])", percentile)
            }
        }
    }
}

impl std::error::Error for WindowError {}

/// Source of monotonic instants
///
/// A window reads its clock once at construction (time-zero) and once per
/// public call. Implementations must never go backwards.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use windowstats::time::ManualClock;
/// use windowstats::traits::Clock;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(3));
/// assert_eq!(clock.now() - start, Duration::from_secs(3));
/// ```
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
