//! Window configuration
//!
//! [`WindowConfig`] carries the two construction parameters of a window so
//! they can be loaded from a settings file (with the `serde` feature) and
//! validated before a window is built.

use crate::time::{MonotonicClock, TimeUnit};
use crate::traits::{Clock, WindowError};
use crate::window::WindowedStatistics;

/// Length and unit of a time window
///
/// # Example
///
/// ```
/// use windowstats::time::TimeUnit;
/// use windowstats::window::WindowConfig;
///
/// let config = WindowConfig::new(30, TimeUnit::Seconds);
/// let mut stats = config.build().unwrap();
///
/// stats.add(1.5);
/// assert_eq!(stats.sum(), 1.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig {
    /// Window length in `unit`s; must be positive
    pub length: u64,
    pub unit: TimeUnit,
}

impl Default for WindowConfig {
    /// One minute
    fn default() -> Self {
        Self {
            length: 60,
            unit: TimeUnit::Seconds,
        }
    }
}

impl WindowConfig {
    pub fn new(length: u64, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Check the configuration without building a window
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.length == 0 {
            return Err(WindowError::InvalidWindowLength {
                length: self.length,
            });
        }
        Ok(())
    }

    /// Build a window on the system monotonic clock
    pub fn build(&self) -> Result<WindowedStatistics<MonotonicClock>, WindowError> {
        self.build_with_clock(MonotonicClock)
    }

    /// Build a window reading time from `clock`
    pub fn build_with_clock<C: Clock>(
        &self,
        clock: C,
    ) -> Result<WindowedStatistics<C>, WindowError> {
        self.validate()?;
        WindowedStatistics::try_with_clock(self.length, self.unit, clock)
    }
}
