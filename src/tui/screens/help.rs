//! Help screen — scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

enum Entry {
    Heading(&'static str),
    Key(&'static str, &'static str),
}

static ENTRIES: &[Entry] = &[
    Entry::Heading("Onboarding Form"),
    Entry::Key("Tab / Shift-Tab", "next / prev field"),
    Entry::Key("Backspace", "delete last character"),
    Entry::Key("\u{2190}/\u{2192}", "change role"),
    Entry::Key("Space", "toggle terms; change role; press Submit"),
    Entry::Key("Enter", "submit (when enabled)"),
    Entry::Key("Esc", "quit"),
    Entry::Heading("Global"),
    Entry::Key("F1", "open this help"),
    Entry::Key("Ctrl+C", "quit from any screen"),
];

/// State for the help screen.
#[derive(Debug, Clone, Default)]
pub struct HelpState {
    scroll: u16,
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('q') | KeyCode::Esc => return Action::Navigate(Screen::Onboarding),
            _ => {}
        }
        Action::None
    }
}

fn entry_line(entry: &Entry) -> Line<'static> {
    match entry {
        Entry::Heading(title) => Line::from(Span::styled(
            *title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Entry::Key(key, desc) => Line::from(vec![
            Span::styled(format!("  {key:<20}"), Style::default().fg(Color::Yellow)),
            Span::raw(*desc),
        ]),
    }
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = ENTRIES.iter().map(entry_line).collect();
    let visible = area.height.saturating_sub(2);
    let scroll = state
        .scroll()
        .min((lines.len() as u16).saturating_sub(visible));

    let block = Block::default()
        .title(" Help ")
        .title_bottom(
            Line::from(" \u{2191}/\u{2193}: scroll  q/Esc: back ")
                .style(Style::default().fg(Color::DarkGray)),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)).block(block), area);
}
