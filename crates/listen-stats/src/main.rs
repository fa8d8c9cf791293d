mod bootstrap;

use anyhow::Result;
use serde::Serialize;

use listen_core::models::PlayHistory;
use listen_core::settings::{Command, Settings};
use listen_data::aggregator::{into_series, parse_exclusion_list, CountEntry, PlayAggregator};
use listen_data::reader::load_history;
use listen_ui::app::{App, ViewMode};
use listen_ui::report::{CountRow, Report};
use listen_ui::table_view::format_plain_table;

/// Shape of `--output json`. `labels` and `counts` are the rows split into
/// parallel arrays, ready for an external plotting tool.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    total: u64,
    rows: &'a [CountEntry],
    labels: Vec<String>,
    counts: Vec<u64>,
}

impl<'a> JsonReport<'a> {
    fn new(title: &'a str, rows: &'a [CountEntry]) -> Self {
        let (labels, counts) = into_series(rows.to_vec());
        Self {
            title,
            total: PlayAggregator::total_count(rows),
            rows,
            labels,
            counts,
        }
    }
}

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level)?;
    settings.validate()?;

    tracing::info!("listen-stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Data dir: {}, Output: {}, Theme: {}",
        settings.data_dir.display(),
        settings.output,
        settings.theme
    );

    let history = load_history(&settings.data_dir)?;
    let (report, entries) = build_report(&history, &settings.command)?;

    match settings.output.as_str() {
        "json" => {
            let json = JsonReport::new(&report.title, &entries);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "text" => print!("{}", format_plain_table(&report)),
        "table" => App::new(&settings.theme, ViewMode::Table).run(&report)?,
        _ => App::new(&settings.theme, ViewMode::Chart).run(&report)?,
    }

    Ok(())
}

/// Run the aggregation `command` asks for against `history`.
///
/// Returns the titled view-model alongside the raw entries it was built
/// from.
fn build_report(
    history: &PlayHistory,
    command: &Command,
) -> listen_core::error::Result<(Report, Vec<CountEntry>)> {
    match command {
        Command::Top { count, exclude } => {
            let n = usize::try_from(*count).unwrap_or(usize::MAX);
            let excluded = parse_exclusion_list(exclude);
            let entries = PlayAggregator::top_tracks(history, n, &excluded)?;
            Ok((Report::top_tracks(n, &excluded, to_rows(&entries)), entries))
        }
        Command::Monthly {
            artist: Some(artist),
            ..
        } => {
            let entries = PlayAggregator::monthly_counts(history, artist)?;
            Ok((Report::monthly(artist, to_rows(&entries)), entries))
        }
        Command::Monthly { artist: None, .. } => {
            let entries = PlayAggregator::monthly_totals(history)?;
            Ok((Report::monthly_totals(to_rows(&entries)), entries))
        }
    }
}

fn to_rows(entries: &[CountEntry]) -> Vec<CountRow> {
    entries
        .iter()
        .map(|e| CountRow::new(e.key.clone(), e.count))
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
