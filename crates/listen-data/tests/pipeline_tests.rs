//! Loader and aggregator exercised together against on-disk fixtures.

use std::path::Path;

use listen_core::error::StatsError;
use listen_data::aggregator::{parse_exclusion_list, CountEntry, PlayAggregator};
use listen_data::reader::load_history;
use tempfile::TempDir;

fn write_export(dir: &Path, name: &str, records: serde_json::Value) {
    std::fs::write(dir.join(name), records.to_string()).unwrap();
}

fn export_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "Streaming_History_Audio_2021_0.json",
        serde_json::json!([
            {
                "ts": "2021-01-05T00:00:00Z",
                "master_metadata_album_artist_name": "A",
                "master_metadata_track_name": "X"
            },
            {
                "ts": "2021-01-06T00:00:00Z",
                "master_metadata_album_artist_name": "A",
                "master_metadata_track_name": "X"
            }
        ]),
    );
    write_export(
        dir.path(),
        "Streaming_History_Audio_2021_1.json",
        serde_json::json!([
            {
                "ts": "2021-02-01T00:00:00Z",
                "master_metadata_album_artist_name": "B",
                "master_metadata_track_name": "Y"
            },
            {
                "ts": "2021-02-02T00:00:00Z",
                "master_metadata_album_artist_name": null,
                "master_metadata_track_name": null,
                "episode_name": "Some podcast"
            }
        ]),
    );
    dir
}

#[test]
fn test_top_tracks_from_directory() {
    let dir = export_dir();
    let history = load_history(dir.path()).unwrap();

    let top = PlayAggregator::top_tracks(&history, 2, &[]).unwrap();
    assert_eq!(
        top,
        vec![CountEntry::new("A : X", 2), CountEntry::new("B : Y", 1)]
    );
}

#[test]
fn test_top_tracks_with_parsed_exclusions() {
    let dir = export_dir();
    let history = load_history(dir.path()).unwrap();

    let excluded = parse_exclusion_list("a : x, nobody");
    let top = PlayAggregator::top_tracks(&history, 10, &excluded).unwrap();
    assert_eq!(top, vec![CountEntry::new("B : Y", 1)]);
}

#[test]
fn test_monthly_counts_from_directory() {
    let dir = export_dir();
    let history = load_history(dir.path()).unwrap();

    assert_eq!(
        PlayAggregator::monthly_counts(&history, "a").unwrap(),
        vec![CountEntry::new("2021-01", 2)]
    );
    assert_eq!(
        PlayAggregator::monthly_totals(&history).unwrap(),
        vec![CountEntry::new("2021-01", 2), CountEntry::new("2021-02", 2)]
    );
}

#[test]
fn test_history_reused_across_requests() {
    let dir = export_dir();
    let history = load_history(dir.path()).unwrap();

    assert!(PlayAggregator::top_tracks(&history, 51, &[]).is_err());
    let top = PlayAggregator::top_tracks(&history, 1, &[]).unwrap();
    assert_eq!(top, vec![CountEntry::new("A : X", 2)]);
    assert_eq!(history.len(), 4);
}

#[test]
fn test_empty_directory_yields_empty_results() {
    let dir = TempDir::new().unwrap();
    let history = load_history(dir.path()).unwrap();

    assert!(history.is_empty());
    assert!(PlayAggregator::top_tracks(&history, 10, &[])
        .unwrap()
        .is_empty());
    assert!(PlayAggregator::monthly_counts(&history, "a")
        .unwrap()
        .is_empty());
    assert!(PlayAggregator::monthly_totals(&history).unwrap().is_empty());
}

#[test]
fn test_missing_directory_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_history(&dir.path().join("laura")).unwrap_err();
    assert!(matches!(err, StatsError::NotFound(_)));
}
