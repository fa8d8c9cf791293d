//! View-model handed from the binary to the chart and table views.

/// One bar / table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    /// `"Artist : Track"` or `"YYYY-MM"`.
    pub label: String,
    pub count: u64,
}

impl CountRow {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Which aggregation produced the rows. Decides chart orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Ranked tracks, drawn as horizontal bars with the top track first.
    TopTracks,
    /// Month buckets, drawn as vertical bars oldest first.
    Monthly,
}

/// Titled, ordered rows ready for rendering.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub kind: ReportKind,
    pub rows: Vec<CountRow>,
}

impl Report {
    /// Top-tracks report titled after the requested count and exclusions.
    pub fn top_tracks(n: usize, excluded: &[String], rows: Vec<CountRow>) -> Self {
        Self {
            title: top_tracks_title(n, excluded),
            kind: ReportKind::TopTracks,
            rows,
        }
    }

    /// Monthly report for one artist search term.
    pub fn monthly(artist: &str, rows: Vec<CountRow>) -> Self {
        Self {
            title: monthly_title(artist),
            kind: ReportKind::Monthly,
            rows,
        }
    }

    /// Monthly report across every play.
    pub fn monthly_totals(rows: Vec<CountRow>) -> Self {
        Self {
            title: monthly_totals_title(),
            kind: ReportKind::Monthly,
            rows,
        }
    }

    /// Column heading for the row labels.
    pub fn key_header(&self) -> &'static str {
        match self.kind {
            ReportKind::TopTracks => "Artist : Song",
            ReportKind::Monthly => "Month",
        }
    }

    /// Sum of every row's count.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `Top 10 Songs of All Time`, with ` (Excluding a, b)` when terms are given.
pub fn top_tracks_title(n: usize, excluded: &[String]) -> String {
    if excluded.is_empty() {
        format!("Top {} Songs of All Time", n)
    } else {
        format!(
            "Top {} Songs of All Time (Excluding {})",
            n,
            excluded.join(", ")
        )
    }
}

pub fn monthly_title(artist: &str) -> String {
    format!("Monthly Listen Count of {} Songs", artist)
}

pub fn monthly_totals_title() -> String {
    "Number of Songs Listened to Each Month".to_string()
}
