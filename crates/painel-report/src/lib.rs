//! Display frames and exports for the roster monitoring panel.
//!
//! - **frame**: unified table and chart data as Polars frames
//! - **export**: CSV export of the unified table, JSON view of a snapshot

pub mod error;
pub mod export;
pub mod frame;

pub use error::{ReportError, Result};
pub use export::{AdvisoryEntry, NeighborhoodEntry, SnapshotReport, write_unified_csv};
pub use frame::{
    CHART_X_COLUMN, CHART_Y_COLUMN, filtered_frame, format_visit, neighborhood_frame,
    sorted_neighborhoods,
};
