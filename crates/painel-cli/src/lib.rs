//! CLI library components for the roster monitoring panel.

pub mod chart;
pub mod logging;
