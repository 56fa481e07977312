//! Run lifecycle controller.
//!
//! The controller is the single owner of run state. Everything that happens asynchronously
//! (the HTTP call, the success flash timer) runs on a spawned task that reports back through
//! the controller's event channel, so state only ever changes inside [`SessionController::handle`].
//!
//! ```text
//! Idle ─RunRequested─▶ Running ─RunCompleted─▶ Succeeded | Failed ─RunRequested─▶ Running
//! ```
//!
//! A trigger while `Running` is dropped, which keeps at most one request in flight.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    editor::EditorSession,
    execution::{ExecutionClient, ExecutionRequest, ExecutionResult, TransportError},
    theme::{toggle_theme, ThemePersistence, ThemePreference},
};

pub mod view;

pub use view::{ControlView, OutputStyle, OutputView, RunState};

pub const SUCCESS_FLASH: Duration = Duration::from_millis(600);

pub type RunOutcome = Result<ExecutionResult, TransportError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error("Please write some code first!")]
    Validation,
    #[error("{0}")]
    Service(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug)]
pub enum SessionEvent {
    RunRequested,
    RunCompleted { run_id: u64, outcome: RunOutcome },
    ClearRequested,
    ThemeToggled,
    SuccessFlashExpired { run_id: u64 },
}

#[derive(Debug, Clone, Copy)]
struct ActiveRun {
    id: u64,
    started: Instant,
    /// Set by a clear while the request is outstanding; the response is then dropped.
    superseded: bool,
}

pub struct SessionController<E: EditorSession> {
    editor: E,
    client: Arc<dyn ExecutionClient>,
    themes: Box<dyn ThemePersistence>,
    theme: ThemePreference,
    stdin: String,
    state: RunState,
    output: OutputView,
    controls: ControlView,
    last_error: Option<RunError>,
    next_run_id: u64,
    active_run: Option<ActiveRun>,
    flash_run: Option<u64>,
    flash_duration: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl<E: EditorSession> SessionController<E> {
    /// Builds the controller and hands back the receiving end of its event channel. The
    /// owner feeds every received event back into [`handle`](Self::handle).
    pub fn new(
        mut editor: E,
        client: Arc<dyn ExecutionClient>,
        themes: Box<dyn ThemePersistence>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let theme = themes.load();
        editor.apply_theme(theme);

        let controller = Self {
            editor,
            client,
            themes,
            theme,
            stdin: String::new(),
            state: RunState::Idle,
            output: OutputView::placeholder(),
            controls: ControlView::default(),
            last_error: None,
            next_run_id: 1,
            active_run: None,
            flash_run: None,
            flash_duration: SUCCESS_FLASH,
            events: tx,
        };
        (controller, rx)
    }

    pub fn with_flash_duration(mut self, duration: Duration) -> Self {
        self.flash_duration = duration;
        self
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::RunRequested => self.request_run(),
            SessionEvent::RunCompleted { run_id, outcome } => self.complete_run(run_id, outcome),
            SessionEvent::ClearRequested => self.clear(),
            SessionEvent::ThemeToggled => {
                self.theme = toggle_theme(self.theme, self.themes.as_ref(), &mut self.editor);
                info!(theme = %self.theme, "theme switched");
            }
            SessionEvent::SuccessFlashExpired { run_id } => {
                if self.flash_run == Some(run_id) {
                    self.flash_run = None;
                    self.controls.success_flash = false;
                }
            }
        }
    }

    fn request_run(&mut self) {
        if self.state == RunState::Running {
            debug!("run already in flight, trigger ignored");
            return;
        }

        let request = ExecutionRequest::new(self.editor.text(), self.stdin.clone());
        if !request.has_code() {
            debug!("empty code, not dispatching");
            self.fail(RunError::Validation);
            return;
        }

        let run_id = self.next_run_id;
        self.next_run_id += 1;

        self.state = RunState::Running;
        self.controls.run_enabled = false;
        self.controls.pending = true;
        self.controls.success_flash = false;
        self.flash_run = None;
        self.output = OutputView::running();
        self.last_error = None;
        self.active_run = Some(ActiveRun { id: run_id, started: Instant::now(), superseded: false });

        info!(run_id, code_len = request.code.len(), stdin_len = request.stdin.len(), "dispatching run");

        let client = Arc::clone(&self.client);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.execute(&request).await;
            // Receiver gone means the session ended; nothing left to update.
            let _ = tx.send(SessionEvent::RunCompleted { run_id, outcome });
        });
    }

    fn complete_run(&mut self, run_id: u64, outcome: RunOutcome) {
        let active = match self.active_run.take() {
            Some(active) if active.id == run_id => active,
            other => {
                self.active_run = other;
                debug!(run_id, "completion for a run that is no longer active");
                return;
            }
        };

        // Leaving Running always restores the control, whatever the outcome.
        self.controls.run_enabled = true;
        self.controls.pending = false;

        let elapsed = active.started.elapsed();
        if active.superseded {
            self.state = RunState::Idle;
            info!(run_id, ?elapsed, "output cleared while running, response discarded");
            return;
        }

        match outcome {
            Ok(result) => {
                self.output = OutputView::from_result(&result);
                match result.error() {
                    None => {
                        self.state = RunState::Succeeded;
                        self.start_flash(run_id);
                    }
                    Some(err) => {
                        self.state = RunState::Failed;
                        self.last_error = Some(RunError::Service(err.to_string()));
                    }
                }
                info!(run_id, state = self.state.label(), ?elapsed, "run finished");
            }
            Err(e) => {
                warn!(run_id, error = %e, ?elapsed, "run failed in transport");
                self.fail(RunError::Transport(e));
            }
        }
    }

    fn fail(&mut self, err: RunError) {
        self.state = RunState::Failed;
        self.controls.success_flash = false;
        self.flash_run = None;
        self.output = OutputView::error(format!("Error: {err}"));
        self.last_error = Some(err);
    }

    fn start_flash(&mut self, run_id: u64) {
        self.controls.success_flash = true;
        self.flash_run = Some(run_id);
        let tx = self.events.clone();
        let delay = self.flash_duration;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SessionEvent::SuccessFlashExpired { run_id });
        });
    }

    fn clear(&mut self) {
        self.output = OutputView::placeholder();
        match self.active_run.as_mut() {
            Some(active) => active.superseded = true,
            None => self.state = RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn output(&self) -> &OutputView {
        &self.output
    }

    pub fn controls(&self) -> ControlView {
        self.controls
    }

    pub fn last_error(&self) -> Option<&RunError> {
        self.last_error.as_ref()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }
}
