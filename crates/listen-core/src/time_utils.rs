use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use crate::error::{Result, StatsError};

/// Timestamp layout used by streaming-history exports.
pub const PLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Key layout for monthly buckets.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

/// Parse an export timestamp such as `2021-01-05T10:15:00Z`.
///
/// The format is strict: fractional seconds or numeric offsets are rejected,
/// matching what the export tooling writes.
pub fn parse_play_timestamp(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, PLAY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            warn!("could not parse play timestamp \"{}\": {}", s, e);
            StatsError::TimestampParse(s.to_string())
        })
}

/// Truncate a timestamp to its `YYYY-MM` bucket key.
pub fn month_key(ts: DateTime<Utc>) -> String {
    ts.format(MONTH_KEY_FORMAT).to_string()
}
