use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::time_utils;

/// A single listen read from a streaming-history export file.
///
/// Only the three fields the aggregations need are kept; every other key in
/// the export record is ignored during deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEvent {
    /// When playback started, as stored (`2021-01-05T00:00:00Z`).
    #[serde(rename = "ts")]
    pub timestamp: String,
    /// Album artist, `None` for podcasts and records with missing metadata.
    #[serde(rename = "master_metadata_album_artist_name", default)]
    pub artist_name: Option<String>,
    /// Track title, `None` for podcasts and records with missing metadata.
    #[serde(rename = "master_metadata_track_name", default)]
    pub track_name: Option<String>,
}

impl PlayEvent {
    pub fn new(
        timestamp: impl Into<String>,
        artist_name: Option<&str>,
        track_name: Option<&str>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            artist_name: artist_name.map(str::to_string),
            track_name: track_name.map(str::to_string),
        }
    }

    /// Parse the stored timestamp into a UTC [`DateTime`].
    pub fn played_at(&self) -> Result<DateTime<Utc>> {
        time_utils::parse_play_timestamp(&self.timestamp)
    }

    /// `"{artist} : {track}"`, or `None` unless both names are present.
    pub fn track_label(&self) -> Option<String> {
        match (&self.artist_name, &self.track_name) {
            (Some(artist), Some(track)) => Some(format!("{} : {}", artist, track)),
            _ => None,
        }
    }

    /// Case-insensitive substring match on the artist name.
    ///
    /// `needle_lower` must already be lowercased. Events without an artist
    /// never match.
    pub fn artist_contains(&self, needle_lower: &str) -> bool {
        self.artist_name
            .as_deref()
            .map(|artist| artist.to_lowercase().contains(needle_lower))
            .unwrap_or(false)
    }
}

/// Immutable snapshot of every loaded [`PlayEvent`].
///
/// Built once by the reader and handed to each aggregation by reference.
/// Clones share the same backing slice.
#[derive(Debug, Clone)]
pub struct PlayHistory {
    events: Arc<[PlayEvent]>,
}

impl PlayHistory {
    pub fn new(events: Vec<PlayEvent>) -> Self {
        Self {
            events: Arc::from(events),
        }
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for PlayHistory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<PlayEvent>> for PlayHistory {
    fn from(events: Vec<PlayEvent>) -> Self {
        Self::new(events)
    }
}

impl FromIterator<PlayEvent> for PlayHistory {
    fn from_iter<I: IntoIterator<Item = PlayEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PlayHistory {
    type Item = &'a PlayEvent;
    type IntoIter = std::slice::Iter<'a, PlayEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
