//! Onboarding screen — the form, its submit button and the last response.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use serde_json::Value;

use crate::model::{Field, FieldValue, FormState, ROLE_OPTIONS, Schema};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{
    FieldKind, FieldView, Form, FormField, cycle_option, draw_form, form_height,
};

/// Shown for the empty role option.
const ROLE_PLACEHOLDER: &str = "Select an Option";

/// State for the onboarding screen.
#[derive(Debug, Clone)]
pub struct OnboardingState {
    form: Form,
    state: FormState,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::new(Schema::onboarding())
    }
}

impl OnboardingState {
    /// Creates an empty onboarding form validated by `schema`.
    pub fn new(schema: Schema) -> Self {
        let fields = Field::all()
            .iter()
            .map(|&field| match field {
                Field::Name => FormField::new("Name", FieldKind::Text, true),
                Field::Email => FormField::new("Email", FieldKind::Text, true),
                Field::Password => FormField::new("Password", FieldKind::Text, true),
                Field::Role => FormField::new(
                    "Which role were you hired for?",
                    FieldKind::Select(ROLE_OPTIONS),
                    false,
                ),
                Field::Terms => {
                    FormField::new("Terms & Conditions", FieldKind::Checkbox, true)
                }
            })
            .collect();
        Self {
            form: Form::new(fields, "Submit"),
            state: FormState::new(schema),
        }
    }

    /// Returns the form widget state (focus and layout).
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the form state holder.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Performs any scheduled submit-enablement recomputation.
    pub fn settle(&mut self) {
        self.state.settle();
    }

    /// Applies a successful response: shows it and resets the form.
    pub fn submission_succeeded(&mut self, body: Value) {
        self.state.submission_succeeded(body);
    }

    fn focused(&self) -> Option<Field> {
        self.form.focused_field().map(|i| Field::all()[i])
    }

    fn submit(&mut self) -> Action {
        match self.state.submission() {
            Some(record) => Action::Submit(record),
            None => Action::None,
        }
    }

    fn edit_text(&mut self, field: Field, code: KeyCode) {
        let mut value = self.state.record().text(field).to_string();
        match code {
            KeyCode::Char(ch) => value.push(ch),
            KeyCode::Backspace => {
                if value.pop().is_none() {
                    return;
                }
            }
            _ => return,
        }
        self.state.change(field, FieldValue::Text(value));
    }

    fn cycle_select(&mut self, field: Field, options: &'static [&'static str], forward: bool) {
        let next = cycle_option(options, self.state.record().text(field), forward);
        self.state.change(field, next.into());
    }

    fn toggle(&mut self, field: Field) {
        let checked = self.state.record().value(field).is_truthy();
        self.state.change(field, FieldValue::Checked(!checked));
    }

    fn views(&self) -> Vec<FieldView<'_>> {
        let record = self.state.record();
        Field::all()
            .iter()
            .map(|&field| {
                let value = match field {
                    Field::Role if record.role.is_empty() => ROLE_PLACEHOLDER.to_string(),
                    Field::Terms if record.terms => "[x] I agree".to_string(),
                    Field::Terms => "[ ] I agree".to_string(),
                    _ => record.text(field).to_string(),
                };
                FieldView {
                    value,
                    error: self.state.errors().get(field),
                }
            })
            .collect()
    }
}

impl ScreenState for OnboardingState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Windows reports AltGr as Ctrl+Alt, so only a lone Ctrl or Alt is a chord.
        let chord = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if key.modifiers.intersects(chord) && !key.modifiers.contains(chord) {
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                return Action::None;
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => return Action::Quit,
            _ => {}
        }

        let Some(field) = self.focused() else {
            // Submit button.
            return match key.code {
                KeyCode::Char(' ') => self.submit(),
                _ => Action::None,
            };
        };

        match (self.form.focused_kind(), key.code) {
            (Some(FieldKind::Text), code @ (KeyCode::Char(_) | KeyCode::Backspace)) => {
                self.edit_text(field, code);
            }
            (Some(FieldKind::Select(options)), KeyCode::Right | KeyCode::Char(' ')) => {
                self.cycle_select(field, options, true);
            }
            (Some(FieldKind::Select(options)), KeyCode::Left) => {
                self.cycle_select(field, options, false);
            }
            (Some(FieldKind::Checkbox), KeyCode::Char(' ')) => self.toggle(field),
            _ => {}
        }
        Action::None
    }
}

/// Renders the onboarding screen.
#[mutants::skip]
pub fn draw_onboarding(state: &OnboardingState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Onboarding ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, response_area, footer_area] = Layout::vertical([
        Constraint::Length(form_height(state.form())),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let views = state.views();
    draw_form(
        state.form(),
        &views,
        state.state().submit_enabled(),
        frame,
        form_area,
    );

    let pretty = serde_json::to_string_pretty(state.state().result()).unwrap_or_default();
    let response = Paragraph::new(pretty.lines().map(Line::from).collect::<Vec<_>>())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Response ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(response, response_area);

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  \u{2190}/\u{2192}: role  Space: toggle  Enter: submit  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
