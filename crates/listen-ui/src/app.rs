//! Application state and TUI event loop for listen-stats.
//!
//! [`App`] owns the theme and the current view mode and draws a single
//! [`Report`] until the user quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::chart_view;
use crate::report::Report;
use crate::table_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// How the report is drawn. `Tab` switches between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Bar chart with a count on every bar.
    Chart,
    /// Ranked table with shares and a totals row.
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Chart => ViewMode::Table,
            ViewMode::Table => ViewMode::Chart,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the listen-stats TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, view_mode: ViewMode) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            should_quit: false,
        }
    }

    /// Show `report` on the alternate screen until `q`, `Esc` or `Ctrl+C`.
    pub fn run(mut self, report: &Report) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame, report)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Every restore step runs even if an earlier one fails.
        let restored = disable_raw_mode()
            .and(execute!(terminal.backend_mut(), LeaveAlternateScreen))
            .and(terminal.show_cursor());

        settle(result, restored)
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.view_mode = self.view_mode.toggled(),
            _ => {}
        }
    }

    /// Draw `report` in the current view mode.
    pub fn render(&self, frame: &mut Frame, report: &Report) {
        let area = frame.area();
        match self.view_mode {
            ViewMode::Chart => chart_view::render_chart(frame, area, report, &self.theme),
            ViewMode::Table => table_view::render_count_table(frame, area, report, &self.theme),
        }
    }
}

/// Combine the event-loop outcome with the terminal-restore outcome. A loop
/// error is reported ahead of a restore error.
fn settle(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    result.and(restored)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
