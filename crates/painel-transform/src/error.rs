//! Error types for roster normalization.

use painel_model::Category;
use thiserror::Error;

/// Errors raised while merging rosters.
///
/// Row-level problems (unparseable dates, unmatched addresses) are never
/// errors; they fall back per row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A roster lacks the positional identifier, address and date columns.
    #[error(
        "{category} roster has {columns} column(s); identifier, address and last-visit columns are required"
    )]
    SchemaMismatch { category: Category, columns: usize },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
