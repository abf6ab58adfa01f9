//! Point-in-time snapshot of a window

/// Every statistic of a window, read from one consistent set of samples
///
/// Produced by [`WindowedStatistics::summary`](crate::WindowedStatistics::summary).
/// Follows the window's empty convention: `sum`, `average` and `median` are
/// `0.0` and `min`/`max` are `None` when `count` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Number of live samples
    pub count: usize,
    pub sum: f64,
    pub average: f64,
    pub median: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    /// Check if the snapshot was taken from an empty window
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Spread between the largest and smallest sample
    pub fn range(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(max - min),
            _ => None,
        }
    }
}
