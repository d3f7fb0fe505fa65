//! Indicator snapshot types produced for the display layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// Record counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub hypertensive: usize,
    pub diabetic: usize,
    pub total: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Hypertensive => self.hypertensive,
            Category::Diabetic => self.diabetic,
        }
    }
}

/// Informational flag raised from the snapshot metrics. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advisory {
    HighNonAttendanceRate,
    HighMeanRecency,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::HighNonAttendanceRate => {
                "too many patients have gone without a visit beyond the recency threshold"
            }
            Advisory::HighMeanRecency => "mean days since last visit is above the expected limit",
        }
    }
}

/// Why a neighborhood aggregation has nothing to show.
///
/// This is an advisory for the user, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EmptySelection {
    #[error("select at least one patient category to view the chart")]
    NoCategories,
    #[error("no data available for the selected categories")]
    NoMatchingRecords,
}

/// Neighborhood to record count. Iteration order is unspecified.
pub type NeighborhoodCounts = HashMap<String, usize>;

/// Summary computed fresh from the unified table on every filter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub counts: CategoryCounts,
    pub threshold_days: i64,
    /// Percentage (0-100) of all records beyond the recency threshold.
    pub percent_beyond_threshold: f64,
    /// Mean days since last visit over records with a valid date.
    pub mean_recency: f64,
    pub advisories: Vec<Advisory>,
    pub selection: Vec<Category>,
    pub neighborhoods: Result<NeighborhoodCounts, EmptySelection>,
}

impl IndicatorSnapshot {
    /// Percentage with one decimal, e.g. `80.0%`.
    pub fn percent_display(&self) -> String {
        format!("{:.1}%", self.percent_beyond_threshold)
    }

    /// Mean recency rounded to whole days, halves to even.
    pub fn mean_recency_days(&self) -> i64 {
        self.mean_recency.round_ties_even() as i64
    }

    pub fn has_advisory(&self, advisory: Advisory) -> bool {
        self.advisories.contains(&advisory)
    }
}
