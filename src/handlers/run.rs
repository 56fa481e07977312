//! Headless handler: one run through the session controller, printed to the terminal.

use std::sync::Arc;

use anyhow::Result;

use crate::{
    config::Config,
    editor::BufferEditor,
    execution::{ExecutionClient, HttpExecutionClient},
    printer::TextPrinter,
    session::{OutputView, RunError, RunState, SessionController, SessionEvent},
    theme::MemoryThemeStore,
};

#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    pub output: OutputView,
    pub error: Option<RunError>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.state == RunState::Succeeded
    }
}

/// Drive a single run to completion. Theme state is irrelevant here, so it stays in memory.
pub async fn run_once(client: Arc<dyn ExecutionClient>, code: &str, stdin: &str) -> RunReport {
    let (mut controller, mut events) = SessionController::new(
        BufferEditor::new(code),
        client,
        Box::new(MemoryThemeStore::default()),
    );
    controller.set_stdin(stdin);
    controller.handle(SessionEvent::RunRequested);

    while controller.is_running() {
        match events.recv().await {
            Some(ev) => controller.handle(ev),
            None => break,
        }
    }

    RunReport {
        state: controller.state(),
        output: controller.output().clone(),
        error: controller.last_error().cloned(),
    }
}

pub async fn run(cfg: &Config, code: &str, stdin: &str, printer: &TextPrinter) -> Result<bool> {
    let client = HttpExecutionClient::from_config(cfg)?;
    let report = run_once(Arc::new(client), code, stdin).await;
    printer.print_output(&report.output)?;
    Ok(report.succeeded())
}
