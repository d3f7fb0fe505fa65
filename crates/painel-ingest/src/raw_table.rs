//! Raw roster tables read from spreadsheets and their text exports.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::workbook::read_workbook;

/// A roster as read from disk: one header row plus string cells.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from in-memory values, padding or truncating rows to the
    /// header width.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| fit_row(row.into_iter().map(Into::into).collect(), width))
            .collect();
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// First `n` rows, for previews before the user confirms an upload.
    pub fn head(&self, n: usize) -> RawTable {
        RawTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

fn fit_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Pick the delimiter that occurs most often in the header line.
///
/// Spreadsheet exports in the pt-BR locale use `;`; tab-separated exports are
/// also common. Ties fall back to `,`.
fn detect_delimiter(header_line: &str) -> u8 {
    let mut best = (b',', header_line.matches(',').count());
    for candidate in [b';', b'\t'] {
        let count = header_line.matches(char::from(candidate)).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Extensions read as spreadsheet workbooks; anything else is delimited text.
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Reads a roster file into a [`RawTable`].
///
/// Workbooks (`.xlsx` and friends) are read from their first sheet; other
/// files are parsed as delimited text, UTF-8 or Windows-1252. The first
/// non-blank row is the header. Blank rows are skipped, cells are trimmed,
/// and short rows are padded to the header width.
pub fn read_roster(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        });
    if is_workbook {
        read_workbook(path)
    } else {
        read_delimited(path)
    }
}

/// Spreadsheet tools in the pt-BR locale save CSV as Windows-1252.
fn decode_text(path: &Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => {
            debug!(path = %path.display(), "roster is not UTF-8, decoding as Windows-1252");
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(error.as_bytes());
            text.into_owned()
        }
    }
}

fn read_delimited(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = decode_text(path, bytes);
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    let header_line = contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| IngestError::EmptyFile {
            path: path.to_path_buf(),
        })?;
    let delimiter = detect_delimiter(header_line);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(contents.as_bytes());
    let records = reader.records().map(|record| {
        record
            .map(|record| record.iter().map(str::to_string).collect::<Vec<String>>())
            .map_err(|source| IngestError::CsvParse {
                path: path.to_path_buf(),
                source,
            })
    });
    let table = collect_table(path, records)?;
    debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.len(),
        delimiter = %char::from(delimiter).escape_default(),
        "roster loaded"
    );
    Ok(table)
}

/// Assemble raw rows into a table: first non-blank row is the header, blank
/// rows are dropped and every row is fitted to the header width.
pub(crate) fn collect_table<I>(path: &Path, records: I) -> Result<RawTable>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(width) = headers.as_ref().map(Vec::len) else {
            headers = Some(
                record
                    .iter()
                    .map(String::as_str)
                    .map(normalize_header)
                    .collect(),
            );
            continue;
        };
        let row: Vec<String> = record.iter().map(String::as_str).map(normalize_cell).collect();
        if row.len() > width {
            warn!(
                path = %path.display(),
                row = rows.len() + 1,
                cells = row.len(),
                columns = width,
                "row wider than header, extra cells dropped"
            );
        }
        rows.push(fit_row(row, width));
    }
    let headers = headers.ok_or_else(|| IngestError::EmptyFile {
        path: path.to_path_buf(),
    })?;
    Ok(RawTable { headers, rows })
}
