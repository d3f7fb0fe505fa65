//! Patient records before and after normalization, and the unified table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Canonical name of the address column after merge.
pub const ADDRESS_COLUMN: &str = "Address";
/// Derived neighborhood column.
pub const NEIGHBORHOOD_COLUMN: &str = "Neighborhood";
/// Derived, parsed last-visit column.
pub const LAST_VISIT_COLUMN: &str = "LastVisitDate";
/// Derived recency column.
pub const DAYS_SINCE_VISIT_COLUMN: &str = "DaysSinceVisit";
/// Category column attached at merge time.
pub const CATEGORY_COLUMN: &str = "Category";
/// Neighborhood used when no address rule matches.
pub const UNKNOWN_NEIGHBORHOOD: &str = "Unknown";

/// One roster row, tagged with the roster it came from.
///
/// Column 0 is the identifier, column 1 the address and column 2 the last
/// visit, whatever their headers say. Remaining columns are carried without
/// interpretation, one cell per entry of [`TableLayout::extra_columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub identifier: String,
    pub address: Option<String>,
    pub last_visit_raw: Option<String>,
    pub extra: Vec<String>,
    pub category: Category,
}

impl PatientRecord {
    /// Passthrough cell at `index` in the table's extra columns, empty when
    /// this row's roster lacks that column.
    pub fn extra_value(&self, index: usize) -> &str {
        self.extra.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Parsed last-visit value. `Invalid` is a marker, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitDate {
    Valid(NaiveDateTime),
    Invalid,
}

impl VisitDate {
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            VisitDate::Valid(value) => Some(*value),
            VisitDate::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, VisitDate::Valid(_))
    }
}

/// A patient record with its derived columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub record: PatientRecord,
    /// Never empty; falls back to [`UNKNOWN_NEIGHBORHOOD`].
    pub neighborhood: String,
    pub last_visit: VisitDate,
    /// Whole days between the table's reference time and the last visit.
    /// `None` exactly when `last_visit` is invalid; negative for future visits.
    pub days_since_visit: Option<i64>,
}

impl NormalizedRecord {
    pub fn category(&self) -> Category {
        self.record.category
    }
}

/// Column headers of the merged table that come from the source rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Header of column 0 in the first roster.
    pub identifier_column: String,
    /// Header of column 2 in the first roster; holds the raw last-visit text.
    pub last_visit_raw_column: String,
    /// Headers beyond column 2, unioned across rosters in first-seen order.
    /// Names are unique: repeated headers within a roster get `.1`, `.2`
    /// suffixes and blank ones become `Unnamed: <position>`.
    pub extra_columns: Vec<String>,
}

impl TableLayout {
    /// Full column order of the unified table, derived columns last.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.extra_columns.len() + 7);
        names.push(self.identifier_column.clone());
        names.push(ADDRESS_COLUMN.to_string());
        names.push(self.last_visit_raw_column.clone());
        names.extend(self.extra_columns.iter().cloned());
        names.push(CATEGORY_COLUMN.to_string());
        names.push(NEIGHBORHOOD_COLUMN.to_string());
        names.push(LAST_VISIT_COLUMN.to_string());
        names.push(DAYS_SINCE_VISIT_COLUMN.to_string());
        names
    }
}

/// Merged, normalized rosters for one session.
///
/// Built once when the user confirms an upload and never modified afterwards;
/// a new upload replaces the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedTable {
    layout: TableLayout,
    records: Vec<NormalizedRecord>,
    reference_now: NaiveDateTime,
}

impl UnifiedTable {
    pub fn new(
        layout: TableLayout,
        records: Vec<NormalizedRecord>,
        reference_now: NaiveDateTime,
    ) -> Self {
        Self {
            layout,
            records,
            reference_now,
        }
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    /// Reference time the recency column was computed against.
    pub fn reference_now(&self) -> NaiveDateTime {
        self.reference_now
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose category is in `categories`, in table order.
    pub fn filter_categories<'a>(
        &'a self,
        categories: &'a [Category],
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| categories.contains(&record.category()))
    }
}
