//! Terminal presentation layer for listen-stats.
//!
//! Provides themes, bar-chart and table views of aggregated play counts,
//! and the event loop that shows them, built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod report;
pub mod table_view;
pub mod themes;

pub use listen_core as core;
