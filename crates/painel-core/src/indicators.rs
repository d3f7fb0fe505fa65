//! Indicator calculator over the unified table.
//!
//! Every function here is pure: the snapshot is recomputed from the table on
//! each filter change and never cached.

use painel_model::{
    Advisory, Category, CategoryCounts, EmptySelection, IndicatorOptions, IndicatorSnapshot,
    NeighborhoodCounts, UnifiedTable,
};
use tracing::debug;

/// Record count per category, plus the total.
pub fn count_by_category(table: &UnifiedTable) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for record in table.records() {
        match record.category() {
            Category::Hypertensive => counts.hypertensive += 1,
            Category::Diabetic => counts.diabetic += 1,
        }
    }
    counts.total = table.len();
    counts
}

/// Percentage (0-100) of records with more than `threshold_days` since their
/// last visit.
///
/// Records with an invalid date stay in the denominator but never count as
/// beyond the threshold. An empty table gives 0.
pub fn percent_beyond_threshold(table: &UnifiedTable, threshold_days: i64) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let beyond = table
        .records()
        .iter()
        .filter(|record| {
            record
                .days_since_visit
                .is_some_and(|days| days > threshold_days)
        })
        .count();
    beyond as f64 / table.len() as f64 * 100.0
}

/// Mean days since last visit over records with a valid date; 0 when there
/// are none.
pub fn mean_recency(table: &UnifiedTable) -> f64 {
    let (sum, count) = table
        .records()
        .iter()
        .filter_map(|record| record.days_since_visit)
        .fold((0i64, 0usize), |(sum, count), days| (sum + days, count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Advisories raised by a snapshot's metrics. Compared unrounded.
pub fn flag_warnings(snapshot: &IndicatorSnapshot, options: &IndicatorOptions) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if snapshot.percent_beyond_threshold > options.non_attendance_warn_percent {
        advisories.push(Advisory::HighNonAttendanceRate);
    }
    if snapshot.mean_recency > options.mean_recency_warn_days {
        advisories.push(Advisory::HighMeanRecency);
    }
    advisories
}

/// Record count per neighborhood among the selected categories.
///
/// The mapping has no defined order.
///
/// # Errors
///
/// [`EmptySelection::NoCategories`] when `selected` is empty,
/// [`EmptySelection::NoMatchingRecords`] when no record matches.
pub fn aggregate_by_neighborhood(
    table: &UnifiedTable,
    selected: &[Category],
) -> Result<NeighborhoodCounts, EmptySelection> {
    if selected.is_empty() {
        return Err(EmptySelection::NoCategories);
    }
    let mut counts = NeighborhoodCounts::new();
    for record in table.filter_categories(selected) {
        *counts.entry(record.neighborhood.clone()).or_insert(0) += 1;
    }
    if counts.is_empty() {
        return Err(EmptySelection::NoMatchingRecords);
    }
    Ok(counts)
}

/// Compute a fresh snapshot for the given category selection.
pub fn compute_snapshot(
    table: &UnifiedTable,
    selected: &[Category],
    options: &IndicatorOptions,
) -> IndicatorSnapshot {
    let mut snapshot = IndicatorSnapshot {
        counts: count_by_category(table),
        threshold_days: options.threshold_days,
        percent_beyond_threshold: percent_beyond_threshold(table, options.threshold_days),
        mean_recency: mean_recency(table),
        advisories: Vec::new(),
        selection: selected.to_vec(),
        neighborhoods: aggregate_by_neighborhood(table, selected),
    };
    snapshot.advisories = flag_warnings(&snapshot, options);
    debug!(
        total = snapshot.counts.total,
        percent_beyond_threshold = snapshot.percent_beyond_threshold,
        mean_recency = snapshot.mean_recency,
        advisories = snapshot.advisories.len(),
        "indicator snapshot computed"
    );
    snapshot
}
