//! Roster ingestion utilities.
//!
//! Reads the hypertensive and diabetic rosters, as workbooks or delimited
//! text exports, into raw string tables.
//! No column is interpreted here; positional meaning is applied by the
//! normalizer.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use painel_ingest::read_roster;
//!
//! let table = read_roster(Path::new("hipertensos.csv"))?;
//! println!("{} rows", table.len());
//! ```

mod error;
mod raw_table;
mod workbook;

pub use error::{IngestError, Result};
pub use raw_table::{RawTable, read_roster};
