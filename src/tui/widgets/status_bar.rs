//! Status bar widget: one-line submission context.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Endpoint the form posts to.
    pub endpoint: String,
    /// Whether the submit button is enabled.
    pub submit_enabled: bool,
    /// Number of submissions awaiting a response.
    pub in_flight: usize,
}

/// Renders a one-line status bar.
///
/// Display format:
/// - Nothing in flight: `POST https://host/path  READY` (READY in Green) or `INCOMPLETE`
/// - Requests pending:  `POST https://host/path  SUBMITTING (2)` (Yellow)
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);

    let mut spans = vec![
        Span::styled(format!("POST {}", ctx.endpoint), cyan),
        Span::styled("  ", cyan),
    ];

    if ctx.in_flight > 0 {
        spans.push(Span::styled(
            format!("SUBMITTING ({})", ctx.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    } else if ctx.submit_enabled {
        spans.push(Span::styled("READY", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(
            "INCOMPLETE",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
