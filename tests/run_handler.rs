mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use pyrun::{
    execution::HttpExecutionClient,
    handlers::run::run_once,
    session::{view::PLACEHOLDER_TEXT, RunError, RunState},
};

use common::{canned, echo, spawn_server, unreachable_url};

async fn client_for(body: &'static str) -> Arc<HttpExecutionClient> {
    let url = spawn_server(canned(StatusCode::OK, body)).await;
    Arc::new(HttpExecutionClient::new(&url).unwrap())
}

#[tokio::test]
async fn stdout_with_timing() {
    let client = client_for(r#"{"output":"hi\n","execution_time":0.01}"#).await;

    let report = run_once(client, "print(\"hi\")", "").await;

    assert_eq!(report.state, RunState::Succeeded);
    assert_eq!(report.output.text, "hi\n");
    assert!(!report.output.is_error());
    assert!(report.output.duration.as_deref().unwrap().contains("0.01"));
    assert!(report.succeeded());
}

#[tokio::test]
async fn service_error_without_output() {
    let client = client_for(r#"{"error":"SyntaxError: invalid syntax"}"#).await;

    let report = run_once(client, "print(", "").await;

    assert_eq!(report.state, RunState::Failed);
    assert_eq!(report.output.text, "SyntaxError: invalid syntax");
    assert!(report.output.is_error());
    assert_eq!(report.error, Some(RunError::Service("SyntaxError: invalid syntax".into())));
}

#[tokio::test]
async fn partial_output_then_error() {
    let client = client_for(r#"{"output":"partial\n","error":"Crash\n"}"#).await;

    let report = run_once(client, "crash()", "").await;

    assert_eq!(report.output.text, "partial\nCrash\n");
    assert!(report.output.is_error());
}

#[tokio::test]
async fn unreachable_service_reports_client_message() {
    let client = Arc::new(HttpExecutionClient::new(&unreachable_url()).unwrap());

    let report = run_once(client, "print(1)", "").await;

    assert_eq!(report.state, RunState::Failed);
    assert!(report.output.is_error());
    assert!(report.output.text.starts_with("Error: "));
    assert_ne!(report.output.text, PLACEHOLDER_TEXT);
    assert!(matches!(report.error, Some(RunError::Transport(_))));
}

#[tokio::test]
async fn stdin_is_forwarded() {
    let url = spawn_server(echo()).await;
    let client = Arc::new(HttpExecutionClient::new(&url).unwrap());

    let report = run_once(client, "name = input()", "Ada").await;

    assert_eq!(report.state, RunState::Succeeded);
    assert_eq!(report.output.text, "name = input()|Ada");
}

#[tokio::test]
async fn blank_code_is_rejected_locally() {
    // Nothing listens here; validation must fail before any connection attempt.
    let client = Arc::new(HttpExecutionClient::new(&unreachable_url()).unwrap());

    let report = run_once(client, "   ", "").await;

    assert_eq!(report.error, Some(RunError::Validation));
    assert_eq!(report.output.text, "Error: Please write some code first!");
}
