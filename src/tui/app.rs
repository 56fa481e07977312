//! TUI application state management.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::warn;

use crate::{
    editor::{BufferEditor, EditorSession},
    export::export_code,
    samples,
    session::{SessionController, SessionEvent},
};

/// Which pane receives typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Code,
    Stdin,
}

/// Popup display state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    SamplePicker { selected: usize },
}

pub struct App {
    pub session: SessionController<BufferEditor>,
    /// Text fed to the program's standard input
    pub stdin: BufferEditor,
    pub focus: Focus,
    pub popup_state: PopupState,
    pub show_help: bool,
    pub status_message: String,
    /// Rows scrolled back from the tail of the output pane; 0 follows the tail
    pub output_scroll: u16,
    pub server_url: String,
    pub export_dir: PathBuf,
    pub export_file_name: String,
    /// Timestamp of last Ctrl+C press for double Ctrl+C detection
    pub last_ctrl_c_time: Option<Instant>,
}

impl App {
    pub fn new(
        session: SessionController<BufferEditor>,
        server_url: String,
        export_dir: PathBuf,
        export_file_name: String,
    ) -> Self {
        Self {
            session,
            stdin: BufferEditor::default(),
            focus: Focus::Code,
            popup_state: PopupState::None,
            show_help: false,
            status_message: default_status().to_string(),
            output_scroll: 0,
            server_url,
            export_dir,
            export_file_name,
            last_ctrl_c_time: None,
        }
    }

    /// The buffer that currently receives keystrokes
    pub fn focused_editor(&mut self) -> &mut BufferEditor {
        match self.focus {
            Focus::Code => self.session.editor_mut(),
            Focus::Stdin => &mut self.stdin,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Code => Focus::Stdin,
            Focus::Stdin => Focus::Code,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Snapshot the stdin pane and ask the session to run.
    pub fn request_run(&mut self) {
        self.session.set_stdin(self.stdin.text());
        self.session.handle(SessionEvent::RunRequested);
        self.output_scroll = 0;
    }

    pub fn clear_output(&mut self) {
        self.session.handle(SessionEvent::ClearRequested);
        self.output_scroll = 0;
    }

    pub fn scroll_output_up(&mut self, rows: u16) {
        // A wrapped view never has more rows than chars
        let limit = u16::try_from(self.session.output().text.chars().count()).unwrap_or(u16::MAX);
        self.output_scroll = self.output_scroll.saturating_add(rows).min(limit);
    }

    pub fn scroll_output_down(&mut self, rows: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(rows);
    }

    pub fn toggle_theme(&mut self) {
        self.session.handle(SessionEvent::ThemeToggled);
        self.status_message = format!("Theme: {}", self.session.theme());
    }

    pub fn export(&mut self) -> Result<PathBuf> {
        let code = self.session.editor().text();
        let result = export_code(&code, &self.export_dir, &self.export_file_name);
        self.status_message = match &result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                warn!(error = %e, "export failed");
                format!("Export failed: {e}")
            }
        };
        result
    }

    pub fn open_sample_picker(&mut self) {
        self.popup_state = PopupState::SamplePicker { selected: 0 };
    }

    pub fn picker_move(&mut self, delta: isize) {
        if let PopupState::SamplePicker { selected } = &mut self.popup_state {
            let len = samples::SAMPLES.len() as isize;
            *selected = (*selected as isize + delta).rem_euclid(len) as usize;
        }
    }

    /// Load the sample at `index` into the code pane and close the picker.
    pub fn pick_sample(&mut self, index: usize) {
        if let Some(sample) = samples::SAMPLES.get(index) {
            if samples::load_into(sample.key, self.session.editor_mut()) {
                self.focus = Focus::Code;
                self.status_message = format!("Loaded sample: {}", sample.title);
            }
        }
        self.hide_popup();
    }

    pub fn hide_popup(&mut self) {
        self.popup_state = PopupState::None;
    }

    pub fn is_popup_shown(&self) -> bool {
        self.popup_state != PopupState::None
    }

    /// Handle Ctrl+C press and detect double press for quit
    /// Returns true if should quit (double Ctrl+C), false otherwise
    pub fn handle_ctrl_c(&mut self) -> bool {
        const DOUBLE_CTRL_C_TIMEOUT: Duration = Duration::from_millis(500);

        let now = Instant::now();
        if let Some(last_time) = self.last_ctrl_c_time {
            if now.duration_since(last_time) <= DOUBLE_CTRL_C_TIMEOUT {
                self.last_ctrl_c_time = None;
                return true;
            }
        }

        self.last_ctrl_c_time = Some(now);
        self.status_message = "Press Ctrl+C again to quit".to_string();
        false
    }
}

pub fn default_status() -> &'static str {
    "Ctrl+Enter/F5 run | Ctrl+L clear | F2 samples | F1 help"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        execution::{ExecutionClient, ExecutionRequest, ExecutionResult, TransportError},
        theme::{MemoryThemeStore, ThemePreference},
    };

    struct NoopClient;

    #[async_trait::async_trait]
    impl ExecutionClient for NoopClient {
        async fn execute(&self, _: &ExecutionRequest) -> Result<ExecutionResult, TransportError> {
            Ok(ExecutionResult::default())
        }
    }

    fn app(dir: PathBuf) -> App {
        let (session, _rx) = SessionController::new(
            BufferEditor::new("print(1)"),
            Arc::new(NoopClient),
            Box::new(MemoryThemeStore::default()),
        );
        App::new(session, "http://localhost".into(), dir, "code.py".into())
    }

    #[test]
    fn picker_wraps_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());
        app.focus = Focus::Stdin;
        app.open_sample_picker();
        app.picker_move(-1);
        assert_eq!(app.popup_state, PopupState::SamplePicker { selected: samples::SAMPLES.len() - 1 });
        app.picker_move(1);
        app.picker_move(1);
        let PopupState::SamplePicker { selected } = app.popup_state else { panic!("picker closed") };
        app.pick_sample(selected);

        assert!(!app.is_popup_shown());
        assert_eq!(app.focus, Focus::Code);
        assert_eq!(app.session.editor().text(), samples::SAMPLES[1].code);
    }

    #[test]
    fn export_writes_code_pane() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());
        app.stdin.set_text("not exported");
        let path = app.export().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "print(1)");
        assert!(app.status_message.starts_with("Saved"));
    }

    #[test]
    fn theme_toggle_updates_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());
        app.toggle_theme();
        assert_eq!(app.session.theme(), ThemePreference::Light);
        assert_eq!(app.status_message, "Theme: light");
    }

    #[test]
    fn double_ctrl_c_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());
        assert!(!app.handle_ctrl_c());
        assert!(app.handle_ctrl_c());
    }
}
