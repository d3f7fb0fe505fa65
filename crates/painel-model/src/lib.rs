//! Data model for the patient roster monitoring panel.

pub mod category;
pub mod error;
pub mod options;
pub mod record;
pub mod snapshot;

pub use category::Category;
pub use error::{ModelError, Result};
pub use options::{DEFAULT_THRESHOLD_DAYS, IndicatorOptions};
pub use record::{
    ADDRESS_COLUMN, CATEGORY_COLUMN, DAYS_SINCE_VISIT_COLUMN, LAST_VISIT_COLUMN,
    NEIGHBORHOOD_COLUMN, NormalizedRecord, PatientRecord, TableLayout, UNKNOWN_NEIGHBORHOOD,
    UnifiedTable, VisitDate,
};
pub use snapshot::{
    Advisory, CategoryCounts, EmptySelection, IndicatorSnapshot, NeighborhoodCounts,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_orders_derived_columns_last() {
        let layout = TableLayout {
            identifier_column: "CNS".to_string(),
            last_visit_raw_column: "Ultimo atendimento".to_string(),
            extra_columns: vec!["Idade".to_string()],
        };
        assert_eq!(
            layout.column_names(),
            vec![
                "CNS",
                "Address",
                "Ultimo atendimento",
                "Idade",
                "Category",
                "Neighborhood",
                "LastVisitDate",
                "DaysSinceVisit",
            ]
        );
    }

    #[test]
    fn snapshot_display_helpers() {
        let snapshot = IndicatorSnapshot {
            counts: CategoryCounts {
                hypertensive: 3,
                diabetic: 2,
                total: 5,
            },
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            percent_beyond_threshold: 80.0,
            mean_recency: 200.6,
            advisories: vec![Advisory::HighNonAttendanceRate],
            selection: Category::ALL.to_vec(),
            neighborhoods: Err(EmptySelection::NoMatchingRecords),
        };
        assert_eq!(snapshot.percent_display(), "80.0%");
        assert_eq!(snapshot.mean_recency_days(), 201);
        assert_eq!(snapshot.counts.get(Category::Diabetic), 2);
        assert!(snapshot.has_advisory(Advisory::HighNonAttendanceRate));
        assert!(!snapshot.has_advisory(Advisory::HighMeanRecency));
    }

    #[test]
    fn mean_recency_rounds_halves_to_even() {
        let mut snapshot = IndicatorSnapshot {
            counts: CategoryCounts::default(),
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            percent_beyond_threshold: 0.0,
            mean_recency: 320.5,
            advisories: vec![],
            selection: vec![],
            neighborhoods: Err(EmptySelection::NoCategories),
        };
        assert_eq!(snapshot.mean_recency_days(), 320);
        snapshot.mean_recency = 321.5;
        assert_eq!(snapshot.mean_recency_days(), 322);
        snapshot.mean_recency = 320.51;
        assert_eq!(snapshot.mean_recency_days(), 321);
    }

    #[test]
    fn snapshot_serializes() {
        let snapshot = IndicatorSnapshot {
            counts: CategoryCounts::default(),
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            percent_beyond_threshold: 0.0,
            mean_recency: 0.0,
            advisories: vec![],
            selection: vec![],
            neighborhoods: Err(EmptySelection::NoCategories),
        };
        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let round: IndicatorSnapshot = serde_json::from_str(&json).expect("deserialize snapshot");
        assert_eq!(round, snapshot);
    }
}
