//! Ranked count tables for listen-stats.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per track or
//! month plus a highlighted totals row, and the same layout as plain text
//! for non-interactive output.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use listen_core::formatting;

use crate::chart_view::{render_no_data, truncate_label, MAX_LABEL_WIDTH};
use crate::report::Report;
use crate::themes::Theme;

/// Render `report` as a table filling `area`.
pub fn render_count_table(frame: &mut Frame, area: Rect, report: &Report, theme: &Theme) {
    if report.is_empty() {
        render_no_data(frame, area, &report.title, theme);
        return;
    }

    let total = report.total();

    let header_cells = ["#", report.key_header(), "Plays", "Share"]
        .into_iter()
        .map(|h| Cell::from(h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = report
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(row.label.clone()),
                Cell::from(formatting::format_count(row.count)),
                Cell::from(formatting::format_share(row.count, total)),
            ])
            .style(style)
        })
        .collect();

    // Totals row – styled separately to stand out.
    let total_row = Row::new(vec![
        Cell::from(""),
        Cell::from(format!("TOTAL ({} rows)", report.rows.len())),
        Cell::from(formatting::format_count(total)),
        Cell::from(formatting::format_share(total, total)),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", report.title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Lay `report` out as aligned plain-text lines, ending in a totals line.
pub fn format_plain_table(report: &Report) -> String {
    let total = report.total();
    let labels: Vec<String> = report
        .rows
        .iter()
        .map(|r| truncate_label(&r.label, MAX_LABEL_WIDTH))
        .collect();
    let label_width = labels
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(report.key_header().width()))
        .chain(std::iter::once("TOTAL".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&format!(
        "{:>3}  {}  {:>9}  {:>7}\n",
        "#",
        pad_to_width(report.key_header(), label_width),
        "Plays",
        "Share"
    ));

    for (i, (row, label)) in report.rows.iter().zip(&labels).enumerate() {
        out.push_str(&format!(
            "{:>3}  {}  {:>9}  {:>7}\n",
            i + 1,
            pad_to_width(label, label_width),
            formatting::format_count(row.count),
            formatting::format_share(row.count, total)
        ));
    }

    out.push_str(&format!(
        "{:>3}  {}  {:>9}  {:>7}\n",
        "",
        pad_to_width("TOTAL", label_width),
        formatting::format_count(total),
        formatting::format_share(total, total)
    ));
    out
}

/// Right-pad with spaces to `width` terminal columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
