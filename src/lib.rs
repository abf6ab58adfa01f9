//! # Windowstats
//!
//! Summary statistics over a sliding time window.
//!
//! Windowstats keeps sum, mean, median and arbitrary percentiles of the
//! samples added during the last `N` time units. Expiration is lazy: every
//! call first drops the samples that fell out of the window, so the caller
//! never runs a cleanup step and never observes stale data.
//!
//! ## Features
//!
//! - **Exact statistics**: every live value is kept in sorted order; medians
//!   and percentiles are exact ranks, not estimates
//! - **Lazy expiration**: no background thread, no prune call
//! - **Injectable clock**: drive time by hand in tests with
//!   [`ManualClock`](time::ManualClock)
//! - **Any granularity**: windows from nanoseconds to days
//!
//! ## Quick Start
//!
//! ```rust
//! use windowstats::prelude::*;
//!
//! let mut latency = WindowedStatistics::new(10, TimeUnit::Seconds);
//! for ms in [12.0, 15.0, 11.0, 240.0, 13.0] {
//!     latency.add(ms);
//! }
//! println!("p50: {} ms, p99: {} ms", latency.median(), latency.percentile(99.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: (de)serialize [`WindowConfig`](window::WindowConfig),
//!   [`Summary`](window::Summary) and [`TimeUnit`](time::TimeUnit)
//! - `sync`: [`SharedWindowedStatistics`](sync::SharedWindowedStatistics), a
//!   mutex-guarded window for use across threads
//! - `full`: Enable everything
//!
//! ## Logging
//!
//! Expiration passes that evict samples emit `tracing` events at `debug`
//! level; insertions emit `trace` events. Install a subscriber to see them.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod time;
pub mod traits;
pub mod window;

#[cfg(feature = "sync")]
#[cfg_attr(docsrs, doc(cfg(feature = "sync")))]
pub mod sync;

pub mod prelude {
    pub use crate::time::{ManualClock, MonotonicClock, TimeUnit};
    pub use crate::traits::*;
    pub use crate::window::{Summary, WindowConfig, WindowedStatistics};

    #[cfg(feature = "sync")]
    pub use crate::sync::SharedWindowedStatistics;
}

pub use time::TimeUnit;
pub use traits::{Clock, WindowError};
pub use window::{Summary, WindowConfig, WindowedStatistics};
