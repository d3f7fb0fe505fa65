//! Roster normalization for the monitoring panel.
//!
//! This crate turns the two raw rosters into one unified table:
//!
//! - **merge**: category tagging, positional merge and per-record derivation
//! - **neighborhood**: neighborhood extraction from free-text addresses
//! - **datetime**: day-first date coercion and recency in whole days

pub mod datetime;
pub mod error;
pub mod merge;
pub mod neighborhood;

pub use datetime::{coerce_date, compute_recency, local_now};
pub use error::{NormalizeError, Result};
pub use merge::{
    MergedTable, REQUIRED_COLUMNS, TaggedTable, build_unified_table, merge_sources, normalize,
    normalize_record, tag_category,
};
pub use neighborhood::extract_neighborhood;
