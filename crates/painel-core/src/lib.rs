//! Indicator computation and session state for the roster monitoring panel.
//!
//! - **indicators**: counts, recency metrics, advisories and the
//!   per-neighborhood aggregation behind the chart
//! - **session**: explicit context owning the confirmed unified table

pub mod error;
pub mod indicators;
pub mod session;

pub use error::{Result, SessionError};
pub use indicators::{
    aggregate_by_neighborhood, compute_snapshot, count_by_category, flag_warnings, mean_recency,
    percent_beyond_threshold,
};
pub use session::{SessionContext, SessionState};
