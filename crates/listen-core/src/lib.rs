//! Shared building blocks for listen-stats.
//!
//! Play-event models, the error type, timestamp helpers, number formatting
//! and CLI settings used by the data, UI and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
