//! Observable state derived from the run lifecycle.

use crate::execution::ExecutionResult;

pub const PLACEHOLDER_TEXT: &str = "Output will appear here...";
pub const RUNNING_TEXT: &str = "Running...";
pub const NO_OUTPUT_TEXT: &str = "No output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn label(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Succeeded => "succeeded",
            RunState::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Normal,
    Error,
}

/// The output pane.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputView {
    pub text: String,
    pub style: OutputStyle,
    /// Labeled execution time, e.g. `⏱ 0.01s`.
    pub duration: Option<String>,
}

impl Default for OutputView {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl OutputView {
    pub fn placeholder() -> Self {
        Self { text: PLACEHOLDER_TEXT.to_string(), style: OutputStyle::Normal, duration: None }
    }

    pub fn running() -> Self {
        Self { text: RUNNING_TEXT.to_string(), style: OutputStyle::Normal, duration: None }
    }

    pub fn error(text: String) -> Self {
        Self { text, style: OutputStyle::Error, duration: None }
    }

    /// Stdout then error, each only when non-empty.
    pub fn from_result(result: &ExecutionResult) -> Self {
        let mut text = String::new();
        if let Some(out) = result.stdout() {
            text.push_str(out);
        }
        if let Some(err) = result.error() {
            text.push_str(err);
        }
        if text.is_empty() {
            text.push_str(NO_OUTPUT_TEXT);
        }
        let style = if result.is_success() { OutputStyle::Normal } else { OutputStyle::Error };
        Self { text, style, duration: result.execution_time_seconds.map(duration_label) }
    }

    pub fn is_error(&self) -> bool {
        self.style == OutputStyle::Error
    }
}

pub fn duration_label(secs: f64) -> String {
    format!("⏱ {secs}s")
}

/// State of the run control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub run_enabled: bool,
    pub pending: bool,
    pub success_flash: bool,
}

impl Default for ControlView {
    fn default() -> Self {
        Self { run_enabled: true, pending: false, success_flash: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(stdout: Option<&str>, error: Option<&str>, time: Option<f64>) -> ExecutionResult {
        ExecutionResult {
            stdout: stdout.map(String::from),
            error: error.map(String::from),
            execution_time_seconds: time,
        }
    }

    #[test]
    fn stdout_only() {
        let view = OutputView::from_result(&result(Some("hi\n"), None, Some(0.01)));
        assert_eq!(view.text, "hi\n");
        assert!(!view.is_error());
        assert_eq!(view.duration.as_deref(), Some("⏱ 0.01s"));
    }

    #[test]
    fn error_only() {
        let view = OutputView::from_result(&result(None, Some("SyntaxError: bad"), None));
        assert_eq!(view.text, "SyntaxError: bad");
        assert!(view.is_error());
        assert_eq!(view.duration, None);
    }

    #[test]
    fn partial_output_then_crash() {
        let view = OutputView::from_result(&result(Some("partial\n"), Some("Crash\n"), None));
        assert_eq!(view.text, "partial\nCrash\n");
        assert!(view.is_error());
    }

    #[test]
    fn neither_field_shows_placeholder() {
        let view = OutputView::from_result(&result(None, None, Some(0.0)));
        assert_eq!(view.text, NO_OUTPUT_TEXT);
        assert!(!view.is_error());
        assert_eq!(view.duration.as_deref(), Some("⏱ 0s"));

        let view = OutputView::from_result(&result(Some(""), Some(""), None));
        assert_eq!(view.text, NO_OUTPUT_TEXT);
        assert!(!view.is_error());
    }
}
