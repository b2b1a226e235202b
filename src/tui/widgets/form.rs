//! Reusable form widget: labelled inputs plus a submit button, with focus management.
//!
//! The widget owns layout and focus only. Values and errors are supplied at
//! draw time so the form state stays the single source of truth.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// How a field is edited and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, edited a character at a time.
    Text,
    /// One of a fixed list of options, cycled with arrow keys.
    Select(&'static [&'static str]),
    /// A boolean toggled with Space.
    Checkbox,
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown in the field's border.
    pub label: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Whether the label is marked as required.
    pub required: bool,
}

impl FormField {
    /// Creates a new form field.
    pub fn new(label: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            label: label.into(),
            kind,
            required,
        }
    }
}

/// What to show for one field at draw time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView<'a> {
    /// Rendered value text.
    pub value: String,
    /// Inline error text; empty for none.
    pub error: &'a str,
}

/// Fields followed by a submit button, with one focus slot per field and
/// one for the button.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
    submit_label: String,
}

impl Form {
    /// Creates a new form. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>, submit_label: impl Into<String>) -> Self {
        Self {
            fields,
            focus: 0,
            submit_label: submit_label.into(),
        }
    }

    fn slots(&self) -> usize {
        self.fields.len() + 1
    }

    /// Returns the focused slot; the slot after the last field is the submit button.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns the focused field index, or `None` when the button is focused.
    pub fn focused_field(&self) -> Option<usize> {
        (self.focus < self.fields.len()).then_some(self.focus)
    }

    /// Returns `true` if the submit button has focus.
    pub fn button_focused(&self) -> bool {
        self.focus == self.fields.len()
    }

    /// Returns the kind of the focused field.
    pub fn focused_kind(&self) -> Option<FieldKind> {
        self.focused_field().map(|i| self.fields[i].kind)
    }

    /// Moves focus to the next slot, wrapping around.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.slots();
    }

    /// Moves focus to the previous slot, wrapping around.
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.slots() - 1) % self.slots();
    }
}

/// Returns the option after (or before) `current`, wrapping around.
///
/// An unknown `current` is treated as the first option.
pub fn cycle_option(options: &'static [&'static str], current: &str, forward: bool) -> &'static str {
    if options.is_empty() {
        return "";
    }
    let pos = options.iter().position(|&o| o == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % options.len()
    } else {
        (pos + options.len() - 1) % options.len()
    };
    options[next]
}

const ROW_HEIGHT: u16 = 3;

/// Height needed to draw `form` with [`draw_form`].
pub fn form_height(form: &Form) -> u16 {
    ROW_HEIGHT * form.slots() as u16
}

/// Renders a form within the given area.
///
/// `views` is indexed like the form's fields; missing entries render empty.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(
    form: &Form,
    views: &[FieldView<'_>],
    submit_enabled: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let constraints: Vec<Constraint> = (0..form.slots())
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = i == form.focus;
        let view = views.get(i).cloned().unwrap_or_default();

        let border_color = if !view.error.is_empty() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = Vec::new();
        match field.kind {
            FieldKind::Select(_) => {
                spans.push(Span::raw(format!("\u{25c2} {} \u{25b8}", view.value)));
            }
            FieldKind::Text | FieldKind::Checkbox => spans.push(Span::raw(view.value)),
        }
        if is_focused && field.kind == FieldKind::Text {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        if !view.error.is_empty() {
            let error_line =
                Paragraph::new(Span::styled(view.error, Style::default().fg(Color::Red)));
            // Overlaps the bottom border of the field's row.
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + ROW_HEIGHT.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }

    let button_style = match (submit_enabled, form.button_focused()) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Green),
    };
    let button_border = if form.button_focused() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let button_text = if submit_enabled {
        format!("[ {} ]", form.submit_label)
    } else {
        format!("[ {} ] (disabled)", form.submit_label)
    };
    let button = Paragraph::new(Line::from(Span::styled(button_text, button_style))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(button_border)),
    );
    if let Some(&row) = rows.last() {
        frame.render_widget(button, row);
    }
}
