//! Session context holding the unified table for one interactive session.
//!
//! The context is an explicit value the caller owns and passes around:
//!
//! - **Empty**: nothing uploaded yet
//! - **Staged**: both rosters uploaded, awaiting confirmation
//! - **Ready**: confirmed; holds the unified table
//!
//! A new upload discards the previous table. The table is replaced as a whole,
//! never updated in place.

use chrono::NaiveDateTime;
use painel_ingest::RawTable;
use painel_model::{Category, IndicatorOptions, IndicatorSnapshot, UnifiedTable};
use painel_transform::build_unified_table;
use tracing::info;

use crate::error::{Result, SessionError};
use crate::indicators::compute_snapshot;

/// Lifecycle state of the session table.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Staged {
        hypertensive: RawTable,
        diabetic: RawTable,
    },
    Ready(UnifiedTable),
}

/// Centralized context for one monitoring session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: SessionState,
    /// Indicator thresholds.
    pub options: IndicatorOptions,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indicator options.
    pub fn with_options(mut self, options: IndicatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Start a new upload cycle with both rosters, discarding any confirmed
    /// table.
    pub fn stage(&mut self, hypertensive: RawTable, diabetic: RawTable) {
        if matches!(self.state, SessionState::Ready(_)) {
            info!("new upload discards the confirmed table");
        }
        self.state = SessionState::Staged {
            hypertensive,
            diabetic,
        };
    }

    /// First `rows` rows of each staged roster, hypertensive first.
    pub fn preview(&self, rows: usize) -> Option<(RawTable, RawTable)> {
        match &self.state {
            SessionState::Staged {
                hypertensive,
                diabetic,
            } => Some((hypertensive.head(rows), diabetic.head(rows))),
            _ => None,
        }
    }

    /// Build and store the unified table from the staged rosters.
    ///
    /// # Errors
    ///
    /// [`SessionError::NothingStaged`] when nothing is staged, or the merge
    /// error when a roster is too narrow; the staged rosters are kept in that
    /// case.
    pub fn confirm(&mut self, reference_now: NaiveDateTime) -> Result<&UnifiedTable> {
        let SessionState::Staged {
            hypertensive,
            diabetic,
        } = &self.state
        else {
            return Err(SessionError::NothingStaged);
        };
        let table = build_unified_table(hypertensive.clone(), diabetic.clone(), reference_now)?;
        info!(records = table.len(), "upload confirmed");
        self.state = SessionState::Ready(table);
        self.table().ok_or(SessionError::NotConfirmed)
    }

    /// The confirmed table, if any.
    pub fn table(&self) -> Option<&UnifiedTable> {
        match &self.state {
            SessionState::Ready(table) => Some(table),
            _ => None,
        }
    }

    /// Fresh indicator snapshot for a category selection.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotConfirmed`] before an upload has been confirmed.
    pub fn snapshot(&self, selected: &[Category]) -> Result<IndicatorSnapshot> {
        let table = self.table().ok_or(SessionError::NotConfirmed)?;
        Ok(compute_snapshot(table, selected, &self.options))
    }

    /// Drop everything and return to the empty state.
    pub fn reset(&mut self) {
        self.state = SessionState::Empty;
    }
}
