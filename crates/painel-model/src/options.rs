//! Configuration options for indicator computation.

use serde::{Deserialize, Serialize};

/// Default recency threshold (about six months).
pub const DEFAULT_THRESHOLD_DAYS: i64 = 180;

/// Thresholds controlling the indicator snapshot and its advisories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOptions {
    /// Records with more days since their last visit than this count as
    /// beyond threshold.
    pub threshold_days: i64,

    /// Raise `HighNonAttendanceRate` when the beyond-threshold percentage is
    /// strictly greater than this value.
    pub non_attendance_warn_percent: f64,

    /// Raise `HighMeanRecency` when the mean recency is strictly greater than
    /// this many days.
    pub mean_recency_warn_days: f64,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            non_attendance_warn_percent: 50.0,
            mean_recency_warn_days: 180.0,
        }
    }
}

impl IndicatorOptions {
    #[must_use]
    pub fn with_threshold_days(mut self, days: i64) -> Self {
        self.threshold_days = days;
        self
    }
}
