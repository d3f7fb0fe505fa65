//! Polars frames handed to the display layer.
//!
//! The unified table keeps its records as typed structs; these helpers lay
//! them out as a [`DataFrame`] in the table's column order for tabular
//! display.

use chrono::{NaiveDateTime, NaiveTime};
use painel_model::{Category, NeighborhoodCounts, NormalizedRecord, UnifiedTable};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;

/// Column names of the neighborhood chart frame.
pub const CHART_X_COLUMN: &str = "Neighborhood";
pub const CHART_Y_COLUMN: &str = "Count";

/// Display form of a visit: date only when no time of day was recorded.
pub fn format_visit(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn string_column(name: &str, values: Vec<String>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn text_column(
    name: &str,
    records: &[&NormalizedRecord],
    extract: impl Fn(&NormalizedRecord) -> String,
) -> Column {
    string_column(name, records.iter().map(|record| extract(record)).collect())
}

fn records_frame(table: &UnifiedTable, records: &[&NormalizedRecord]) -> Result<DataFrame> {
    let layout = table.layout();
    let names = layout.column_names();

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    columns.push(text_column(&names[0], records, |r| r.record.identifier.clone()));
    columns.push(text_column(&names[1], records, |r| {
        r.record.address.clone().unwrap_or_default()
    }));
    columns.push(text_column(&names[2], records, |r| {
        r.record.last_visit_raw.clone().unwrap_or_default()
    }));
    for (index, extra) in layout.extra_columns.iter().enumerate() {
        columns.push(text_column(extra, records, |r| {
            r.record.extra_value(index).to_string()
        }));
    }
    let derived = &names[names.len() - 4..];
    columns.push(text_column(&derived[0], records, |r| {
        r.category().as_str().to_string()
    }));
    columns.push(text_column(&derived[1], records, |r| r.neighborhood.clone()));
    let visits: Vec<Option<String>> = records
        .iter()
        .map(|r| r.last_visit.datetime().map(format_visit))
        .collect();
    columns.push(Series::new(derived[2].as_str().into(), visits).into_column());
    let days: Vec<Option<i64>> = records.iter().map(|r| r.days_since_visit).collect();
    columns.push(Series::new(derived[3].as_str().into(), days).into_column());

    Ok(DataFrame::new(columns)?)
}

/// Records of the selected categories, in table order.
pub fn filtered_frame(table: &UnifiedTable, selected: &[Category]) -> Result<DataFrame> {
    let records: Vec<&NormalizedRecord> = table.filter_categories(selected).collect();
    records_frame(table, &records)
}

/// Neighborhood counts sorted for presentation: descending count, then name.
pub fn sorted_neighborhoods(counts: &NeighborhoodCounts) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts
        .iter()
        .map(|(name, count)| (name.clone(), *count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Bar chart data: x = neighborhood, y = count, in presentation order.
pub fn neighborhood_frame(counts: &NeighborhoodCounts) -> Result<DataFrame> {
    let sorted = sorted_neighborhoods(counts);
    let names: Vec<String> = sorted.iter().map(|(name, _)| name.clone()).collect();
    let values: Vec<u64> = sorted.iter().map(|(_, count)| *count as u64).collect();
    Ok(DataFrame::new(vec![
        string_column(CHART_X_COLUMN, names),
        Series::new(CHART_Y_COLUMN.into(), values).into_column(),
    ])?)
}
