//! Category tagging, roster merge and record normalization.
//!
//! Column position is authoritative: column 0 is the identifier, column 1
//! the address and column 2 the last visit, whatever the headers say.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use painel_ingest::RawTable;
use painel_model::{
    Category, NormalizedRecord, PatientRecord, TableLayout, UNKNOWN_NEIGHBORHOOD, UnifiedTable,
};
use tracing::{debug, info, info_span, trace};

use crate::datetime::{coerce_date, compute_recency};
use crate::error::{NormalizeError, Result};
use crate::neighborhood::extract_neighborhood;

/// Positional columns every roster must have.
pub const REQUIRED_COLUMNS: usize = 3;

const IDENTIFIER_INDEX: usize = 0;
const ADDRESS_INDEX: usize = 1;
const LAST_VISIT_INDEX: usize = 2;

/// A raw roster with the category every one of its rows belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTable {
    pub category: Category,
    pub table: RawTable,
}

/// Both rosters concatenated, before derived columns are computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTable {
    pub layout: TableLayout,
    pub records: Vec<PatientRecord>,
}

/// Attach a constant category to every row of one roster.
pub fn tag_category(table: RawTable, category: Category) -> TaggedTable {
    TaggedTable { category, table }
}

/// Concatenate two tagged rosters, first roster's rows first.
///
/// # Errors
///
/// [`NormalizeError::SchemaMismatch`] when either roster has fewer than
/// [`REQUIRED_COLUMNS`] columns.
pub fn merge_sources(first: TaggedTable, second: TaggedTable) -> Result<MergedTable> {
    for source in [&first, &second] {
        if source.table.column_count() < REQUIRED_COLUMNS {
            return Err(NormalizeError::SchemaMismatch {
                category: source.category,
                columns: source.table.column_count(),
            });
        }
    }

    let first_names = passthrough_headers(&first.table.headers);
    let second_names = passthrough_headers(&second.table.headers);
    let mut extra_columns = first_names.clone();
    for name in &second_names {
        if !extra_columns.contains(name) {
            extra_columns.push(name.clone());
        }
    }
    let layout = TableLayout {
        identifier_column: first.table.headers[IDENTIFIER_INDEX].clone(),
        last_visit_raw_column: first.table.headers[LAST_VISIT_INDEX].clone(),
        extra_columns,
    };

    let mut records = Vec::with_capacity(first.table.len() + second.table.len());
    for (source, names) in [(first, first_names), (second, second_names)] {
        let TaggedTable { category, table } = source;
        let positions: Vec<Option<usize>> = layout
            .extra_columns
            .iter()
            .map(|column| names.iter().position(|name| name == column))
            .collect();
        debug!(%category, rows = table.len(), "merging roster");
        records.extend(
            table
                .rows
                .into_iter()
                .map(|row| to_record(row, &positions, category)),
        );
    }

    Ok(MergedTable { layout, records })
}

/// Unique names for the columns after the positional ones.
///
/// Blank headers become `Unnamed: <position>`. A name already taken by an
/// earlier column, positional ones included, gets the first free `.1`, `.2`,
/// ... suffix.
fn passthrough_headers(headers: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut names = Vec::with_capacity(headers.len().saturating_sub(REQUIRED_COLUMNS));
    for (position, header) in headers.iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {position}")
        } else {
            header.clone()
        };
        let mut name = base.clone();
        let mut suffix = 0;
        while taken.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        taken.insert(name.clone());
        if position >= REQUIRED_COLUMNS {
            names.push(name);
        }
    }
    names
}

/// The cell as written, or `None` when it is blank.
fn present(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty()).cloned()
}

fn to_record(row: Vec<String>, positions: &[Option<usize>], category: Category) -> PatientRecord {
    let extra = positions
        .iter()
        .map(|position| {
            position
                .and_then(|offset| row.get(REQUIRED_COLUMNS + offset))
                .cloned()
                .unwrap_or_default()
        })
        .collect();
    PatientRecord {
        identifier: row.get(IDENTIFIER_INDEX).cloned().unwrap_or_default(),
        address: present(row.get(ADDRESS_INDEX)),
        last_visit_raw: present(row.get(LAST_VISIT_INDEX)),
        extra,
        category,
    }
}

/// Derive neighborhood, parsed visit date and recency for one record.
pub fn normalize_record(record: PatientRecord, reference_now: NaiveDateTime) -> NormalizedRecord {
    let neighborhood = extract_neighborhood(record.address.as_deref());
    let last_visit = coerce_date(record.last_visit_raw.as_deref().unwrap_or(""));
    let days_since_visit = compute_recency(last_visit, reference_now);
    NormalizedRecord {
        record,
        neighborhood,
        last_visit,
        days_since_visit,
    }
}

/// Compute the derived columns for every merged record.
///
/// Each row is handled independently; a bad address or date only affects
/// that row.
pub fn normalize(merged: MergedTable, reference_now: NaiveDateTime) -> UnifiedTable {
    let MergedTable { layout, records } = merged;
    let mut unknown_neighborhoods = 0usize;
    let mut invalid_dates = 0usize;
    let records: Vec<NormalizedRecord> = records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let normalized = normalize_record(record, reference_now);
            if normalized.neighborhood == UNKNOWN_NEIGHBORHOOD {
                unknown_neighborhoods += 1;
                trace!(row, category = %normalized.category(), "no neighborhood rule matched");
            }
            if !normalized.last_visit.is_valid() {
                invalid_dates += 1;
                trace!(row, category = %normalized.category(), "last visit date is invalid");
            }
            normalized
        })
        .collect();
    info!(
        records = records.len(),
        unknown_neighborhoods, invalid_dates, "rosters normalized"
    );
    UnifiedTable::new(layout, records, reference_now)
}

/// Tag, merge and normalize the hypertensive and diabetic rosters.
pub fn build_unified_table(
    hypertensive: RawTable,
    diabetic: RawTable,
    reference_now: NaiveDateTime,
) -> Result<UnifiedTable> {
    let span = info_span!("normalize", reference_now = %reference_now);
    let _guard = span.enter();
    let merged = merge_sources(
        tag_category(hypertensive, Category::Hypertensive),
        tag_category(diabetic, Category::Diabetic),
    )?;
    Ok(normalize(merged, reference_now))
}
