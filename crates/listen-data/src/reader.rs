//! Streaming-history file discovery and loading.
//!
//! Reads every `.json` export in a directory and concatenates the records
//! into one immutable [`PlayHistory`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use listen_core::error::{Result, StatsError};
use listen_core::models::{PlayEvent, PlayHistory};
use tracing::{debug, info, warn};

/// Extension of recognised export files.
pub const DATA_FILE_EXTENSION: &str = "json";

// ── Public API ────────────────────────────────────────────────────────────────

/// List the `.json` files directly inside `data_dir`, sorted by path.
///
/// Subdirectories are not descended into.
pub fn find_data_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(StatsError::NotFound(data_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable directory entry: {}", e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == DATA_FILE_EXTENSION)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Load every export file under `data_dir` into a [`PlayHistory`].
///
/// A file that cannot be read or parsed aborts the whole load; no partial
/// history is returned.
pub fn load_history(data_dir: &Path) -> Result<PlayHistory> {
    let files = find_data_files(data_dir)?;
    if files.is_empty() {
        warn!("No .json files found in {}", data_dir.display());
        return Ok(PlayHistory::default());
    }

    let mut events: Vec<PlayEvent> = Vec::new();
    for path in &files {
        let file_events = read_events_file(path)?;
        debug!("File {}: {} plays", path.display(), file_events.len());
        events.extend(file_events);
    }

    info!(
        "Loaded {} plays from {} files in {}",
        events.len(),
        files.len(),
        data_dir.display()
    );

    Ok(PlayHistory::new(events))
}

/// Parse one export file: a JSON array of play records.
pub fn read_events_file(path: &Path) -> Result<Vec<PlayEvent>> {
    let file = File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        warn!("Malformed data file {}: {}", path.display(), source);
        StatsError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
