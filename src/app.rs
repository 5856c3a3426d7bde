//! Application state and core logic

use crate::api::HttpCommutingClient;
use crate::config::AppConfig;
use crate::error::SubmitError;
use crate::platform::SUBMIT_MODIFIER;
use crate::state::{AppState, Focus, Notice, NoticeKind};
use crate::submission::{AggregateOutcome, SubmissionReport, SubmissionStatus, Submitter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Dispatches form snapshots to the commuting endpoint
    submitter: Submitter,
    /// Background task of the attempt in flight
    pending: Option<JoinHandle<SubmissionReport>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance talking HTTP to the configured endpoint
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = HttpCommutingClient::new()?;
        let submitter = Submitter::new(Arc::new(client), config.submit_settings());
        Ok(Self::with_submitter(submitter))
    }

    pub fn with_submitter(submitter: Submitter) -> Self {
        Self {
            state: AppState::default(),
            submitter,
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether an attempt has been started and its result not yet shown
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some() || self.submitter.is_in_flight()
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Notice dialog is modal
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }

        let focus = self.state.focus();
        match key.code {
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(SUBMIT_MODIFIER) =>
            {
                self.start_submission();
            }
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::Enter => match focus {
                Focus::Toggle(_) => {
                    self.state.toggle_focused_type();
                }
                Focus::Submit => self.start_submission(),
                Focus::Identity(_) | Focus::Detail(..) => self.state.next_field(),
            },
            KeyCode::Char(' ') if matches!(focus, Focus::Toggle(_)) => {
                self.state.toggle_focused_type();
            }
            KeyCode::Char(c)
                if focus.is_editable() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.state.input_char(c);
            }
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Delete => self.state.clear_field(),
            KeyCode::Esc => self.state.status_message = None,
            _ => {}
        }
        Ok(())
    }

    /// Validate the form and hand a snapshot to the submitter.
    ///
    /// The dispatches run on a background task; [`App::poll_submission`]
    /// picks up the report.
    fn start_submission(&mut self) {
        if self.is_submitting() {
            self.state.status_message = Some("Envío en curso, espere".to_string());
            return;
        }
        let Some(snapshot) = self.state.ready_snapshot() else {
            return;
        };

        match self.submitter.start(&snapshot) {
            Ok(submission) => {
                tracing::debug!(
                    attempt_id = %submission.attempt_id(),
                    records = submission.records().len(),
                    "dispatching in background"
                );
                self.state.submission = SubmissionStatus::InFlight;
                self.state.status_message = None;
                self.pending = Some(tokio::spawn(submission.run()));
            }
            Err(SubmitError::AlreadyInFlight) => {
                self.state.status_message = Some("Envío en curso, espere".to_string());
            }
            Err(SubmitError::NothingSelected) => {
                self.state.notice = Some(Notice::new(
                    NoticeKind::Warning,
                    "Seleccione al menos un tipo de commuting",
                ));
            }
            Err(err @ SubmitError::Configuration(_)) => {
                tracing::error!(error = %err, "submission refused");
                self.state.notice = Some(Notice::new(
                    NoticeKind::Failure,
                    format!("{}\n{err}", AggregateOutcome::Failed.message()),
                ));
            }
        }
    }

    /// Collect the report of a finished attempt, if any
    pub async fn poll_submission(&mut self) {
        if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };

        let outcome = match handle.await {
            Ok(report) => report.aggregate(),
            Err(err) => {
                tracing::error!(error = %err, "submission task ended abnormally");
                AggregateOutcome::Failed
            }
        };
        let kind = match outcome {
            AggregateOutcome::Succeeded => NoticeKind::Success,
            AggregateOutcome::Failed => NoticeKind::Failure,
        };
        self.state.submission = outcome.into();
        self.state.notice = Some(Notice::new(kind, outcome.message()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommutingApi, MockCommutingApi};
    use crate::error::DispatchError;
    use crate::state::{CommutingType, DetailField, IdentityField};
    use crate::submission::{OutboundRecord, SubmitSettings};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::sync::Semaphore;
    use url::Url;

    fn settings() -> SubmitSettings {
        SubmitSettings {
            base_url: Some("http://collector.test".to_string()),
            dispatch_timeout: Duration::from_secs(5),
        }
    }

    fn app_with(api: impl CommutingApi + 'static) -> App {
        App::with_submitter(Submitter::new(Arc::new(api), settings()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).await.unwrap();
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    /// Fill identity and a complete Walking/Cycling entry using keys only,
    /// leaving focus on the submit button
    async fn fill_walking_form(app: &mut App) {
        type_text(app, "Ana").await;
        press(app, KeyCode::Tab).await;
        type_text(app, "Acme").await;
        press(app, KeyCode::Tab).await;
        while app.state.focus() != Focus::Toggle(CommutingType::WalkingCycling) {
            press(app, KeyCode::Down).await;
        }
        press(app, KeyCode::Char(' ')).await;
        app.state.set_focus(Focus::Detail(
            CommutingType::WalkingCycling,
            DetailField::StartDate,
        ));
        type_text(app, "2024-01-01").await;
        press(app, KeyCode::Tab).await;
        type_text(app, "2024-01-31").await;
        press(app, KeyCode::Tab).await;
        type_text(app, "3").await;
        press(app, KeyCode::Tab).await;
        assert_eq!(app.state.focus(), Focus::Submit);
    }

    async fn wait_for_report(app: &mut App) {
        for _ in 0..200 {
            app.poll_submission().await;
            if !app.is_submitting() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("submission did not finish");
    }

    struct GatedApi {
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl CommutingApi for GatedApi {
        async fn create_record(
            &self,
            _endpoint: &Url,
            _record: &OutboundRecord,
        ) -> Result<Value, DispatchError> {
            self.gate.acquire().await.unwrap().forget();
            Ok(Value::Null)
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_ctrl_c_quits() {
            let mut app = app_with(MockCommutingApi::new());
            assert!(!app.should_quit());
            app.handle_key(ctrl('c')).await.unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_space_is_text_outside_toggles() {
            let mut app = app_with(MockCommutingApi::new());
            type_text(&mut app, "Ana María").await;
            press(&mut app, KeyCode::Tab).await;
            assert_eq!(app.state.form.identity().name, "Ana María");
        }

        #[tokio::test]
        async fn test_enter_toggles_type() {
            let mut app = app_with(MockCommutingApi::new());
            app.state.set_focus(Focus::Toggle(CommutingType::Taxi));
            press(&mut app, KeyCode::Enter).await;
            assert!(app.state.form.is_selected(CommutingType::Taxi));
            press(&mut app, KeyCode::Enter).await;
            assert!(!app.state.form.is_selected(CommutingType::Taxi));
        }

        #[tokio::test]
        async fn test_back_tab_moves_backwards() {
            let mut app = app_with(MockCommutingApi::new());
            press(&mut app, KeyCode::Tab).await;
            assert_eq!(app.state.focus(), Focus::Identity(IdentityField::Company));
            press(&mut app, KeyCode::BackTab).await;
            assert_eq!(app.state.focus(), Focus::Identity(IdentityField::Name));
        }

        #[tokio::test]
        async fn test_notice_is_modal() {
            let mut app = app_with(MockCommutingApi::new());
            app.state.notice = Some(Notice::new(NoticeKind::Warning, "x"));
            type_text(&mut app, "abc").await;
            press(&mut app, KeyCode::Tab).await;
            assert_eq!(app.state.focus(), Focus::Identity(IdentityField::Name));

            press(&mut app, KeyCode::Esc).await;
            assert!(app.state.notice.is_none());
        }
    }

    mod submitting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_success_shows_success_notice() {
            let mut api = MockCommutingApi::new();
            api.expect_create_record()
                .withf(|_, record| {
                    record.kind == CommutingType::WalkingCycling
                        && record.name == "Ana"
                        && record.distance == 3.0
                        && record.cost == 0.0
                })
                .times(1)
                .returning(|_, _| Ok(json!({"id": 1})));
            let mut app = app_with(api);

            fill_walking_form(&mut app).await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.submission, SubmissionStatus::InFlight);

            wait_for_report(&mut app).await;
            assert_eq!(app.state.submission, SubmissionStatus::Succeeded);
            let notice = app.state.notice.clone().unwrap();
            assert_eq!(notice.kind, NoticeKind::Success);
            assert_eq!(notice.message, "Datos enviados con éxito");

            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.submission, SubmissionStatus::Idle);
            assert!(app.state.notice.is_none());
        }

        #[tokio::test]
        async fn test_failure_shows_failure_notice() {
            let mut api = MockCommutingApi::new();
            api.expect_create_record().times(1).returning(|_, _| {
                Err(DispatchError::Status {
                    status: 503,
                    body: String::new(),
                })
            });
            let mut app = app_with(api);

            fill_walking_form(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            wait_for_report(&mut app).await;

            assert_eq!(app.state.submission, SubmissionStatus::Failed);
            let notice = app.state.notice.clone().unwrap();
            assert_eq!(notice.kind, NoticeKind::Failure);
            assert_eq!(notice.message, "Error al enviar los datos");
        }

        #[tokio::test]
        async fn test_empty_selection_dispatches_nothing() {
            let mut api = MockCommutingApi::new();
            api.expect_create_record().never();
            let mut app = app_with(api);

            app.handle_key(ctrl('s')).await.unwrap();

            assert!(!app.is_submitting());
            assert_eq!(app.state.submission, SubmissionStatus::Idle);
            assert_eq!(app.state.notice.clone().unwrap().kind, NoticeKind::Warning);
        }

        #[tokio::test]
        async fn test_missing_base_url_is_reported() {
            let mut api = MockCommutingApi::new();
            api.expect_create_record().never();
            let submitter = Submitter::new(Arc::new(api), SubmitSettings::default());
            let mut app = App::with_submitter(submitter);

            fill_walking_form(&mut app).await;
            press(&mut app, KeyCode::Enter).await;

            assert!(!app.is_submitting());
            assert_eq!(app.state.submission, SubmissionStatus::Idle);
            let notice = app.state.notice.clone().unwrap();
            assert_eq!(notice.kind, NoticeKind::Failure);
            assert!(notice.message.contains("COMMUTING_API_URL"));
        }

        #[tokio::test]
        async fn test_resubmit_ignored_while_in_flight() {
            let gate = Arc::new(Semaphore::new(0));
            let mut app = app_with(GatedApi {
                gate: Arc::clone(&gate),
            });

            fill_walking_form(&mut app).await;
            press(&mut app, KeyCode::Enter).await;
            press(&mut app, KeyCode::Enter).await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(app.is_submitting());
            assert!(app.state.status_message.is_some());
            app.poll_submission().await;
            assert_eq!(app.state.submission, SubmissionStatus::InFlight);

            gate.add_permits(1);
            wait_for_report(&mut app).await;
            assert_eq!(app.state.submission, SubmissionStatus::Succeeded);
            // the single permit was consumed by the only dispatch
            assert_eq!(gate.available_permits(), 0);
        }
    }
}
