use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{info, warn};

use crate::config::Config;
use crate::model::FormRecord;
use crate::submit::{SubmissionClient, SubmitError};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{HelpState, OnboardingState, draw_help, draw_onboarding};
use super::widgets::{StatusBarContext, draw_status_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The onboarding form.
    Onboarding,
    /// Show keybinding help.
    Help,
}

/// The result of one submission task.
pub type SubmitOutcome = Result<Value, SubmitError>;

/// Top-level application state.
pub struct App {
    screen: Screen,
    onboarding: OnboardingState,
    help: HelpState,
    client: SubmissionClient,
    outcome_tx: UnboundedSender<SubmitOutcome>,
    outcome_rx: UnboundedReceiver<SubmitOutcome>,
    in_flight: usize,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the [`Screen::Onboarding`] screen.
    pub fn new(client: SubmissionClient) -> Self {
        let (outcome_tx, outcome_rx) = unbounded_channel();
        Self {
            screen: Screen::Onboarding,
            onboarding: OnboardingState::default(),
            help: HelpState::new(),
            client,
            outcome_tx,
            outcome_rx,
            in_flight: 0,
            should_quit: false,
        }
    }

    /// Creates an `App` that submits to the configured endpoint.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(SubmissionClient::new(config.endpoint())?))
    }

    /// Main event loop: settle → draw → wait for a key or a submission outcome.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut events = EventStream::new();
        while !self.should_quit {
            self.onboarding.settle();
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
                Some(outcome) = self.outcome_rx.recv() => self.apply_outcome(outcome),
            }
        }
        Ok(())
    }

    /// Renders the current screen with the status bar beneath it.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Onboarding => draw_onboarding(&self.onboarding, frame, main_area),
            Screen::Help => draw_help(&self.help, frame, main_area),
        }

        let ctx = StatusBarContext {
            endpoint: self.client.endpoint().to_string(),
            submit_enabled: self.onboarding.state().submit_enabled(),
            in_flight: self.in_flight,
        };
        draw_status_bar(&ctx, frame, status_area);
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => {
                if self.screen != Screen::Help {
                    self.help.reset();
                    self.screen = Screen::Help;
                }
                return;
            }
            _ => {}
        }

        let action = match self.screen {
            Screen::Onboarding => self.onboarding.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply_action(action);
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::Submit(record) => self.start_submission(record),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Spawns one POST of `record`; its outcome arrives on the outcome channel.
    fn start_submission(&mut self, record: FormRecord) {
        info!(endpoint = self.client.endpoint(), "submitting form");
        self.in_flight += 1;
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.submit(&record).await;
            // The receiver lives as long as the app.
            let _ = tx.send(outcome);
        });
    }

    /// Applies a finished submission to the form.
    ///
    /// Failures are logged only; the form keeps the user's input so they
    /// can submit again.
    pub fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(body) => {
                info!(response = %body, "submission succeeded");
                self.onboarding.submission_succeeded(body);
            }
            Err(e) => warn!(error = %e, "submission failed"),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the onboarding screen state.
    pub fn onboarding(&self) -> &OnboardingState {
        &self.onboarding
    }

    /// Returns the number of submissions awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next submission outcome and applies it.
    #[cfg(test)]
    pub(crate) async fn await_outcome(&mut self) {
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.apply_outcome(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn make_app() -> App {
        App::new(SubmissionClient::new("http://127.0.0.1:9/api/users").unwrap())
    }

    fn make_app_for(server: &MockServer) -> App {
        App::new(SubmissionClient::new(format!("{}/api/users", server.uri())).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_string(app: &mut App, s: &str) {
        for ch in s.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    /// Fills every field from a fresh form (focus on name) and settles.
    fn fill_valid_form(app: &mut App) {
        type_string(app, "Ada");
        app.handle_key(press(KeyCode::Tab));
        type_string(app, "ada@example.com");
        app.handle_key(press(KeyCode::Tab));
        type_string(app, "hunter2");
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char(' ')));
        app.onboarding.settle();
        // Back to the first field.
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
    }

    fn filled_record() -> FormRecord {
        FormRecord {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter2".into(),
            role: "Front-End Developer".into(),
            terms: true,
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn new_starts_on_onboarding() {
            let app = make_app();
            assert_eq!(app.screen(), Screen::Onboarding);
            assert!(!app.should_quit());
            assert_eq!(app.in_flight(), 0);
        }

        #[test]
        fn from_config_uses_configured_endpoint() {
            let dir = tempfile::tempdir().unwrap();
            let config = Config::with_paths("http://api.test/users", dir.path()).unwrap();
            let app = App::from_config(&config).unwrap();
            assert_eq!(app.client.endpoint(), "http://api.test/users");
            assert_eq!(app.screen(), Screen::Onboarding);
        }

        #[test]
        fn ctrl_c_quits() {
            let mut app = make_app();
            app.handle_key(ctrl_press(KeyCode::Char('c')));
            assert!(app.should_quit());
        }

        #[test]
        fn altgr_c_is_typed_not_quit() {
            let mut app = make_app();
            app.handle_key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL | KeyModifiers::ALT,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            });
            assert!(!app.should_quit());
            assert_eq!(app.onboarding().state().record().name, "c");
        }

        #[test]
        fn esc_on_form_quits() {
            let mut app = make_app();
            app.handle_key(press(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn q_on_form_is_typed_not_quit() {
            let mut app = make_app();
            app.handle_key(press(KeyCode::Char('q')));
            assert!(!app.should_quit());
            assert_eq!(app.onboarding().state().record().name, "q");
        }

        #[test]
        fn f1_opens_help_and_esc_returns() {
            let mut app = make_app();
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::Onboarding);
            assert!(!app.should_quit());
        }

        #[test]
        fn f1_on_help_stays_on_help() {
            let mut app = make_app();
            app.handle_key(press(KeyCode::F(1)));
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
        }

        #[test]
        fn ctrl_c_quits_from_help() {
            let mut app = make_app();
            app.handle_key(press(KeyCode::F(1)));
            app.handle_key(ctrl_press(KeyCode::Char('c')));
            assert!(app.should_quit());
        }

        #[test]
        fn release_events_are_ignored() {
            let mut app = make_app();
            app.handle_key(release(KeyCode::Esc));
            assert!(!app.should_quit());
        }

        #[test]
        fn form_edits_survive_help_round_trip() {
            let mut app = make_app();
            type_string(&mut app, "Ada");
            app.handle_key(press(KeyCode::F(1)));
            app.handle_key(press(KeyCode::Char('q')));
            assert_eq!(app.screen(), Screen::Onboarding);
            assert_eq!(app.onboarding().state().record().name, "Ada");
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn disabled_submit_sends_nothing() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(201))
                .expect(0)
                .mount(&server)
                .await;

            let mut app = make_app_for(&server);
            type_string(&mut app, "Ada");
            app.onboarding.settle();
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.in_flight(), 0);
        }

        #[tokio::test]
        async fn success_stores_response_and_resets_form() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/users"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
                .expect(1)
                .mount(&server)
                .await;

            let mut app = make_app_for(&server);
            fill_valid_form(&mut app);
            assert_eq!(app.onboarding().state().record(), &filled_record());

            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.in_flight(), 1);
            app.await_outcome().await;

            assert_eq!(app.in_flight(), 0);
            let state = app.onboarding().state();
            assert_eq!(state.result(), &json!({"id": 1}));
            assert_eq!(state.record(), &FormRecord::default());
        }

        #[tokio::test]
        async fn server_error_keeps_input_and_previous_result() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
                .mount(&server)
                .await;

            let mut app = make_app_for(&server);
            fill_valid_form(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.await_outcome().await;

            server.reset().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            fill_valid_form(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.await_outcome().await;

            let state = app.onboarding().state();
            assert_eq!(state.record(), &filled_record());
            assert_eq!(state.result(), &json!({"id": 1}));
        }

        #[tokio::test]
        async fn network_error_keeps_input() {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            let endpoint = format!("http://{}/api/users", listener.local_addr().unwrap());
            drop(listener);

            let mut app = App::new(SubmissionClient::new(endpoint).unwrap());
            fill_valid_form(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.await_outcome().await;

            let state = app.onboarding().state();
            assert_eq!(state.record(), &filled_record());
            assert_eq!(state.result(), &json!([]));
            assert_eq!(app.in_flight(), 0);
        }

        #[tokio::test]
        async fn failed_submission_can_be_retried() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;

            let mut app = make_app_for(&server);
            fill_valid_form(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.await_outcome().await;

            server.reset().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
                .expect(1)
                .mount(&server)
                .await;

            app.onboarding.settle();
            app.handle_key(press(KeyCode::Enter));
            app.await_outcome().await;
            assert_eq!(app.onboarding().state().result(), &json!({"id": 2}));
        }

        #[tokio::test]
        async fn each_press_sends_its_own_request() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
                .expect(2)
                .mount(&server)
                .await;

            let mut app = make_app_for(&server);
            fill_valid_form(&mut app);
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.in_flight(), 2);
            app.await_outcome().await;
            app.await_outcome().await;
            assert_eq!(app.in_flight(), 0);
        }

        #[test]
        fn apply_outcome_error_leaves_form_untouched() {
            let mut app = make_app();
            type_string(&mut app, "Ada");
            let err = SubmitError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: String::new(),
            };
            app.apply_outcome(Err(err));
            assert_eq!(app.onboarding().state().record().name, "Ada");
            assert_eq!(app.in_flight(), 0);
        }
    }
}
