//! Configuration for the position tracker.

/// Default tolerance for treating two timeline positions as equal (seconds).
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Configuration for the position tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Markers closer than this to the playback position count as reached
    pub epsilon: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl TrackerConfig {
    /// Creates a new TrackerConfig, falling back to the default epsilon for
    /// negative or non-finite values.
    pub fn new(epsilon: f64) -> Self {
        let epsilon = if epsilon.is_finite() && epsilon >= 0.0 {
            epsilon
        } else {
            DEFAULT_EPSILON
        };
        Self { epsilon }
    }

    /// Whether a marker at `marker_time` has been passed at `position`.
    ///
    /// True for every marker before the position and for markers within
    /// epsilon of it.
    pub fn is_reached(&self, marker_time: f64, position: f64) -> bool {
        marker_time - position < self.epsilon
    }
}
