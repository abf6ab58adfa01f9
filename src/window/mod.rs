//! Statistics over a sliding time window
//!
//! This module keeps sum, mean, median and percentiles of the samples added
//! during the last `length` time units. Expired samples are dropped lazily on
//! every call, so no prune step is ever needed.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use windowstats::time::{ManualClock, TimeUnit};
//! use windowstats::window::WindowedStatistics;
//!
//! let clock = ManualClock::new();
//! let mut stats = WindowedStatistics::with_clock(5, TimeUnit::Seconds, clock.clone());
//!
//! for value in [1.0, 2.0, 3.0] {
//!     stats.add(value);
//! }
//!
//! clock.advance(Duration::from_secs(4));
//! stats.add(10.0);
//! assert_eq!(stats.sum(), 16.0);
//!
//! // The first three samples are now 6 seconds old
//! clock.advance(Duration::from_secs(2));
//! assert_eq!(stats.sum(), 10.0);
//! ```

mod config;
mod moving;
mod summary;

pub use config::WindowConfig;
pub use moving::WindowedStatistics;
pub use summary::Summary;
