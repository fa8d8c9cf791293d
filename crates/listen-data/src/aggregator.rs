//! Play-count aggregation: most-played tracks and plays per month.
//!
//! Every call rebuilds its [`CountTable`] from the full [`PlayHistory`];
//! nothing is cached between requests.

use std::collections::HashMap;

use listen_core::error::{Result, StatsError};
use listen_core::models::{PlayEvent, PlayHistory};
use listen_core::time_utils;
use serde::Serialize;
use tracing::debug;

/// Smallest accepted `top_tracks` count.
pub const MIN_TOP_COUNT: usize = 1;
/// Largest accepted `top_tracks` count.
pub const MAX_TOP_COUNT: usize = 50;

// ── CountEntry ────────────────────────────────────────────────────────────────

/// One row of an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    /// Track label (`"Artist : Track"`) or month key (`"2021-01"`).
    pub key: String,
    /// Number of plays collected under `key`.
    pub count: u64,
}

impl CountEntry {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

// ── CountTable ────────────────────────────────────────────────────────────────

/// Occurrence counts keyed by label. Iteration order is unspecified; use
/// [`CountTable::into_ranked`] or [`CountTable::into_chronological`].
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    counts: HashMap<String, u64>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: impl Into<String>) {
        *self.counts.entry(key.into()).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Keep only the keys for which `keep` returns `true`.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.counts.retain(|key, _| keep(key));
    }

    /// Entries by count descending; equal counts ordered by key ascending.
    pub fn into_ranked(self) -> Vec<CountEntry> {
        let mut entries = self.into_entries();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        entries
    }

    /// Entries by key ascending. `YYYY-MM` keys sort chronologically.
    pub fn into_chronological(self) -> Vec<CountEntry> {
        let mut entries = self.into_entries();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    fn into_entries(self) -> Vec<CountEntry> {
        self.counts
            .into_iter()
            .map(|(key, count)| CountEntry { key, count })
            .collect()
    }
}

// ── PlayAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that groups play events into ranked or monthly counts.
pub struct PlayAggregator;

impl PlayAggregator {
    /// The `n` most-played tracks, labelled `"Artist : Track"`.
    ///
    /// Plays missing either name are not counted. Labels containing any of
    /// `excluded_artists` (case-insensitive) are dropped before ranking;
    /// blank terms are ignored.
    pub fn top_tracks(
        history: &PlayHistory,
        n: usize,
        excluded_artists: &[String],
    ) -> Result<Vec<CountEntry>> {
        if !(MIN_TOP_COUNT..=MAX_TOP_COUNT).contains(&n) {
            return Err(StatsError::Range {
                value: n,
                min: MIN_TOP_COUNT,
                max: MAX_TOP_COUNT,
            });
        }

        let mut table = CountTable::new();
        let mut unlabelled = 0usize;
        for event in history {
            match event.track_label() {
                Some(label) => table.increment(label),
                None => unlabelled += 1,
            }
        }
        if unlabelled > 0 {
            debug!("{} plays without artist or track name not ranked", unlabelled);
        }

        let terms: Vec<String> = excluded_artists
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        if !terms.is_empty() {
            let before = table.len();
            table.retain_keys(|label| {
                let label = label.to_lowercase();
                !terms.iter().any(|term| label.contains(term.as_str()))
            });
            debug!("Excluded {} tracks matching {:?}", before - table.len(), terms);
        }

        let mut ranked = table.into_ranked();
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Plays per `YYYY-MM` for artists whose name contains `artist`
    /// (case-insensitive), oldest month first.
    ///
    /// Plays with no artist never match. A matching play whose timestamp
    /// cannot be parsed fails the whole request.
    pub fn monthly_counts(history: &PlayHistory, artist: &str) -> Result<Vec<CountEntry>> {
        if artist.trim().is_empty() {
            return Err(StatsError::MissingArtist);
        }

        let needle = artist.to_lowercase();
        let table = Self::count_by_month(history.iter().filter(|e| e.artist_contains(&needle)))?;
        debug!("{} plays matched artist \"{}\"", table.total(), artist);

        Ok(table.into_chronological())
    }

    /// Plays per `YYYY-MM` across the whole history, oldest month first.
    ///
    /// Unlike [`PlayAggregator::monthly_counts`] this includes plays with
    /// no artist metadata.
    pub fn monthly_totals(history: &PlayHistory) -> Result<Vec<CountEntry>> {
        Ok(Self::count_by_month(history.iter())?.into_chronological())
    }

    /// Sum of the counts in `entries`.
    pub fn total_count(entries: &[CountEntry]) -> u64 {
        entries.iter().map(|e| e.count).sum()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn count_by_month<'a>(events: impl Iterator<Item = &'a PlayEvent>) -> Result<CountTable> {
        let mut table = CountTable::new();
        for event in events {
            let played_at = event.played_at()?;
            table.increment(time_utils::month_key(played_at));
        }
        Ok(table)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Split a comma-separated exclusion list, trimming each term and dropping
/// blanks. `""` yields no terms.
pub fn parse_exclusion_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split entries into parallel `(keys, counts)` vectors, preserving order.
pub fn into_series(entries: Vec<CountEntry>) -> (Vec<String>, Vec<u64>) {
    entries.into_iter().map(|e| (e.key, e.count)).unzip()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
