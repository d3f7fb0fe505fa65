//! First-sheet reader for spreadsheet workbooks.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::raw_table::{RawTable, collect_table};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Read the first sheet of a workbook as text cells.
pub(crate) fn read_workbook(path: &Path) -> Result<RawTable> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyFile {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;
    let rows = range
        .rows()
        .map(|row| Ok(row.iter().map(cell_text).collect::<Vec<String>>()));
    let table = collect_table(path, rows)?;
    debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.len(),
        "workbook roster loaded"
    );
    Ok(table)
}

/// Text form of a cell. Date cells are written day-first, the way the
/// rosters type them by hand.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_number(*value),
        Data::DateTime(value) => format_serial_datetime(value.as_f64()),
        other => other.to_string(),
    }
}

/// Whole numbers lose the `.0` the float representation would add.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Spreadsheet serial date (days since 1899-12-30) as `dd/mm/yyyy`, with the
/// time of day when it is not midnight.
fn format_serial_datetime(serial: f64) -> String {
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let value = NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|epoch| epoch.and_time(NaiveTime::MIN))
        .zip(TimeDelta::try_seconds(seconds))
        .and_then(|(epoch, offset)| epoch.checked_add_signed(offset));
    match value {
        Some(value) if value.time() == NaiveTime::MIN => value.format("%d/%m/%Y").to_string(),
        Some(value) => value.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => serial.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_dates_are_day_first() {
        assert_eq!(format_serial_datetime(45366.0), "15/03/2024");
        assert_eq!(format_serial_datetime(45366.5), "15/03/2024 12:00:00");
    }

    #[test]
    fn whole_numbers_have_no_fraction() {
        assert_eq!(format_number(111.0), "111");
        assert_eq!(format_number(61.5), "61.5");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Centro".to_string())), "Centro");
    }
}
