//! Data layer for listen-stats.
//!
//! Responsible for discovering and parsing streaming-history export files
//! into an immutable play history, and for aggregating that history into
//! ranked track counts and per-month counts.

pub mod aggregator;
pub mod reader;

pub use listen_core as core;
