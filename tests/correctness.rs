//! Correctness and invariant tests for windowstats
//!
//! These tests drive windows with a manual clock through the expiration
//! scenarios and check every statistic against a brute-force reference over
//! a plain list of samples.
//!
//! Run with: cargo test --test correctness --features full

use proptest::prelude::*;
use std::time::Duration;
use windowstats::time::{ManualClock, TimeUnit};
use windowstats::WindowedStatistics;

// ============================================================================
// Reference statistics
// ============================================================================

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

fn ref_sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn ref_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        ref_sum(values) / values.len() as f64
    }
}

fn ref_median(values: &[f64]) -> f64 {
    let values = sorted(values);
    let n = values.len();
    if n == 0 {
        0.0
    } else if n % 2 == 0 {
        (values[n / 2] + values[n / 2 - 1]) / 2.0
    } else {
        values[n / 2]
    }
}

fn ref_percentile(values: &[f64], p: f64) -> f64 {
    let values = sorted(values);
    if values.is_empty() {
        0.0
    } else {
        let idx = ((p / 100.0) * values.len() as f64).ceil() as usize - 1;
        values[idx]
    }
}

fn assert_matches(stats: &mut WindowedStatistics<ManualClock>, expected: &[f64]) {
    assert_eq!(stats.len(), expected.len());
    assert_eq!(stats.sum(), ref_sum(expected));
    assert_eq!(stats.average(), ref_average(expected));
    assert_eq!(stats.median(), ref_median(expected));
    assert_eq!(stats.percentile(90.0), ref_percentile(expected, 90.0));
}

fn range(lo: i32, hi: i32) -> Vec<f64> {
    (lo..hi).map(f64::from).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn fresh_window_reads_zero() {
        let mut stats = WindowedStatistics::with_clock(5, TimeUnit::Seconds, ManualClock::new());
        assert_eq!(stats.sum(), 0.0);
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.median(), 0.0);
        assert_eq!(stats.percentile(90.0), 0.0);
        assert!(stats.is_empty());
    }

    #[test]
    fn basic_hundred_and_one_values() {
        let mut stats = WindowedStatistics::with_clock(5, TimeUnit::Seconds, ManualClock::new());
        for i in 0..101 {
            stats.add(f64::from(i));
        }

        assert_eq!(stats.sum(), 5050.0);
        assert_eq!(stats.average(), 50.0);
        assert_eq!(stats.median(), 50.0);
        assert_eq!(stats.percentile(90.0), 90.0);
        assert_matches(&mut stats, &range(0, 101));
    }

    #[test]
    fn everything_expires() {
        let clock = ManualClock::new();
        let mut stats = WindowedStatistics::with_clock(2, TimeUnit::Seconds, clock.clone());
        for i in 0..101 {
            stats.add(f64::from(i));
        }

        clock.advance(Duration::from_secs(3));

        assert_eq!(stats.sum(), 0.0);
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.median(), 0.0);
        assert_eq!(stats.percentile(90.0), 0.0);
    }

    fn timed(length: u64, unit: TimeUnit, step: impl Fn(u64) -> Duration) {
        let clock = ManualClock::new();
        let mut stats = WindowedStatistics::with_clock(length, unit, clock.clone());

        let mut all = Vec::new();
        for i in 0..101 {
            stats.add(f64::from(i));
            all.push(f64::from(i));
        }

        // 4/5 of the window later: nothing has expired yet
        clock.advance(step(4));
        let mut recent = Vec::new();
        for i in 101..201 {
            stats.add(f64::from(i));
            all.push(f64::from(i));
            recent.push(f64::from(i));
        }
        assert_matches(&mut stats, &all);

        // 6/5 of the window after the first batch: it is gone
        clock.advance(step(2));
        assert_matches(&mut stats, &recent);

        // Re-added values count again alongside the survivors
        clock.advance(step(1));
        for i in 0..101 {
            stats.add(f64::from(i));
            recent.push(f64::from(i));
        }
        assert_matches(&mut stats, &recent);
    }

    #[test]
    fn partial_expiration_and_reinsertion_seconds() {
        timed(5, TimeUnit::Seconds, |n| Duration::from_secs(n));
    }

    #[test]
    fn partial_expiration_and_reinsertion_milliseconds() {
        timed(500, TimeUnit::Milliseconds, |n| Duration::from_millis(n * 100));
    }

    #[test]
    fn expired_values_never_return() {
        let clock = ManualClock::new();
        let mut stats = WindowedStatistics::with_clock(3, TimeUnit::Seconds, clock.clone());
        stats.add(1_000.0);

        clock.advance(Duration::from_secs(4));
        stats.add(1.0);

        for _ in 0..5 {
            assert_eq!(stats.max(), Some(1.0));
            clock.advance(Duration::from_millis(500));
        }
    }

    #[test]
    fn minute_window() {
        let clock = ManualClock::new();
        let mut stats = WindowedStatistics::with_clock(1, TimeUnit::Minutes, clock.clone());
        stats.add(1.0);

        clock.advance(Duration::from_secs(119));
        stats.add(2.0);
        assert_eq!(stats.sum(), 3.0);

        clock.advance(Duration::from_secs(1));
        assert_eq!(stats.sum(), 2.0);
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;

    const WINDOW_MS: u64 = 1_000;

    /// Samples whose time-key is within the window of `now`
    fn live(samples: &[(u64, f64)], now: u64) -> Vec<f64> {
        samples
            .iter()
            .filter(|(key, _)| key + WINDOW_MS >= now)
            .map(|&(_, value)| value)
            .collect()
    }

    proptest! {
        #[test]
        fn statistics_match_live_samples(
            steps in proptest::collection::vec((0u64..400, -1_000i32..1_000), 1..200),
            p in 0.5f64..100.0,
        ) {
            let clock = ManualClock::new();
            let mut stats =
                WindowedStatistics::with_clock(WINDOW_MS, TimeUnit::Milliseconds, clock.clone());
            let mut samples = Vec::new();
            let mut now = 0u64;

            for (advance, value) in steps {
                now += advance;
                clock.advance(Duration::from_millis(advance));

                let value = f64::from(value);
                stats.add(value);
                samples.push((now, value));

                let expected = live(&samples, now);
                prop_assert_eq!(stats.len(), expected.len());
                prop_assert_eq!(stats.sum(), ref_sum(&expected));
                prop_assert_eq!(stats.median(), ref_median(&expected));
                prop_assert_eq!(stats.percentile(p), ref_percentile(&expected, p));
            }
        }

        #[test]
        fn reads_are_idempotent(values in proptest::collection::vec(-1e6f64..1e6, 0..100)) {
            let mut stats =
                WindowedStatistics::with_clock(1, TimeUnit::Seconds, ManualClock::new());
            stats.extend(values);

            prop_assert_eq!(stats.summary(), stats.summary());
            prop_assert_eq!(stats.percentile(99.0), stats.percentile(99.0));
        }

        #[test]
        fn sorted_order_gives_monotone_percentiles(
            values in proptest::collection::vec(-1e6f64..1e6, 1..100),
        ) {
            let mut stats =
                WindowedStatistics::with_clock(1, TimeUnit::Seconds, ManualClock::new());
            stats.extend(values);

            let ps: Vec<f64> = (0..=100).map(f64::from).collect();
            let quantiles = stats.percentiles(&ps);
            prop_assert!(quantiles.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(quantiles.first().copied(), stats.min());
            prop_assert_eq!(quantiles.last().copied(), stats.max());
        }
    }
}

// ============================================================================
// Shared window
// ============================================================================

#[cfg(feature = "sync")]
mod shared {
    use super::*;
    use windowstats::sync::SharedWindowedStatistics;

    #[test]
    fn shared_window_expires_like_plain_window() {
        let clock = ManualClock::new();
        let stats = SharedWindowedStatistics::with_clock(5, TimeUnit::Seconds, clock.clone());
        for i in 0..101 {
            stats.add(f64::from(i));
        }

        clock.advance(Duration::from_secs(4));
        for i in 101..201 {
            stats.add(f64::from(i));
        }
        assert_eq!(stats.sum(), ref_sum(&range(0, 201)));

        clock.advance(Duration::from_secs(2));
        assert_eq!(stats.sum(), ref_sum(&range(101, 201)));
        assert_eq!(stats.median(), ref_median(&range(101, 201)));
    }
}
