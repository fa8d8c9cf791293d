//! Bar-chart views for listen-stats.
//!
//! Top tracks are drawn as horizontal bars, most-played first; monthly
//! counts as vertical bars, oldest month on the left. Every bar carries its
//! play count.

use ratatui::{
    layout::{Direction, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use listen_core::formatting;

use crate::report::{CountRow, Report, ReportKind};
use crate::themes::Theme;

/// Upper bound on the label column of the horizontal chart.
pub const MAX_LABEL_WIDTH: usize = 48;

/// Render `report` as a bar chart filling `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, report: &Report, theme: &Theme) {
    if report.is_empty() {
        render_no_data(frame, area, &report.title, theme);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {} ", report.title), theme.header));

    let chart = match report.kind {
        ReportKind::TopTracks => {
            let max_label = (area.width as usize / 2).clamp(8, MAX_LABEL_WIDTH);
            let bars: Vec<Bar> = report
                .rows
                .iter()
                .map(|row| make_bar(row, max_label))
                .collect();
            let inner_height = area.height.saturating_sub(2) as usize;
            let gap = if report.rows.len() * 2 <= inner_height {
                1
            } else {
                0
            };

            BarChart::default()
                .direction(Direction::Horizontal)
                .bar_width(1)
                .bar_gap(gap)
                .data(BarGroup::default().bars(&bars))
        }
        ReportKind::Monthly => {
            let bar_width = report
                .rows
                .iter()
                .map(|row| row.label.width())
                .max()
                .unwrap_or(1)
                .max(3);
            let bars: Vec<Bar> = report
                .rows
                .iter()
                .map(|row| make_bar(row, bar_width))
                .collect();

            BarChart::default()
                .direction(Direction::Vertical)
                .bar_width(bar_width as u16)
                .bar_gap(1)
                .data(BarGroup::default().bars(&bars))
        }
    };

    frame.render_widget(
        chart
            .block(block)
            .bar_style(theme.bar)
            .value_style(theme.bar_value)
            .label_style(theme.bar_label),
        area,
    );
}

/// Render a "no data" placeholder when the aggregation came back empty.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No plays matched", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the data directory and the artist or exclusion terms.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Esc to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

/// Shorten `label` to at most `max_width` terminal columns, marking the cut
/// with `…`.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn make_bar(row: &CountRow, max_label: usize) -> Bar<'static> {
    Bar::default()
        .value(row.count)
        .text_value(formatting::format_count(row.count))
        .label(Line::from(truncate_label(&row.label, max_label)))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
