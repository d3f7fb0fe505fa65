//! Exports of the unified table and indicator snapshots.

use std::path::Path;

use chrono::NaiveDateTime;
use painel_model::{
    Advisory, Category, CategoryCounts, EmptySelection, IndicatorSnapshot, NormalizedRecord,
    UnifiedTable,
};
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::frame::{format_visit, sorted_neighborhoods};

fn record_row(table: &UnifiedTable, record: &NormalizedRecord) -> Vec<String> {
    let mut row = Vec::with_capacity(table.layout().extra_columns.len() + 7);
    row.push(record.record.identifier.clone());
    row.push(record.record.address.clone().unwrap_or_default());
    row.push(record.record.last_visit_raw.clone().unwrap_or_default());
    row.extend(
        (0..table.layout().extra_columns.len())
            .map(|index| record.record.extra_value(index).to_string()),
    );
    row.push(record.category().as_str().to_string());
    row.push(record.neighborhood.clone());
    row.push(
        record
            .last_visit
            .datetime()
            .map(format_visit)
            .unwrap_or_default(),
    );
    row.push(
        record
            .days_since_visit
            .map(|days| days.to_string())
            .unwrap_or_default(),
    );
    row
}

/// Write the unified table as CSV, header first, in table order.
pub fn write_unified_csv(table: &UnifiedTable, path: &Path) -> Result<()> {
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(table.layout().column_names())
        .map_err(csv_error)?;
    for record in table.records() {
        writer
            .write_record(record_row(table, record))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = table.len(), "unified table exported");
    Ok(())
}

/// One advisory in a serialized report.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryEntry {
    pub code: Advisory,
    pub message: &'static str,
}

/// One chart bar in a serialized report.
#[derive(Debug, Clone, Serialize)]
pub struct NeighborhoodEntry {
    pub neighborhood: String,
    pub count: usize,
}

/// Machine-readable view of an [`IndicatorSnapshot`].
///
/// Neighborhoods are listed in presentation order so the output is stable.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReport {
    pub reference_now: String,
    pub counts: CategoryCounts,
    pub threshold_days: i64,
    pub percent_beyond_threshold: String,
    pub mean_recency_days: i64,
    pub advisories: Vec<AdvisoryEntry>,
    pub selection: Vec<Category>,
    pub neighborhoods: Vec<NeighborhoodEntry>,
    pub empty_selection: Option<EmptySelection>,
}

impl SnapshotReport {
    pub fn new(snapshot: &IndicatorSnapshot, reference_now: NaiveDateTime) -> Self {
        let (neighborhoods, empty_selection) = match &snapshot.neighborhoods {
            Ok(counts) => (
                sorted_neighborhoods(counts)
                    .into_iter()
                    .map(|(neighborhood, count)| NeighborhoodEntry {
                        neighborhood,
                        count,
                    })
                    .collect(),
                None,
            ),
            Err(reason) => (Vec::new(), Some(*reason)),
        };
        Self {
            reference_now: format_visit(reference_now),
            counts: snapshot.counts,
            threshold_days: snapshot.threshold_days,
            percent_beyond_threshold: snapshot.percent_display(),
            mean_recency_days: snapshot.mean_recency_days(),
            advisories: snapshot
                .advisories
                .iter()
                .map(|advisory| AdvisoryEntry {
                    code: *advisory,
                    message: advisory.message(),
                })
                .collect(),
            selection: snapshot.selection.clone(),
            neighborhoods,
            empty_selection,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
