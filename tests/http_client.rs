mod common;

use std::time::Duration;

use axum::{http::StatusCode, routing::post, Router};
use pyrun::execution::{ExecutionClient, ExecutionRequest, HttpExecutionClient, TransportError};

use common::{canned, echo, spawn_server, unreachable_url};

#[tokio::test]
async fn sends_code_and_input_fields() {
    let url = spawn_server(echo()).await;
    let client = HttpExecutionClient::new(&url).unwrap();

    let result = client.execute(&ExecutionRequest::new("print(input())", "42")).await.unwrap();

    assert_eq!(result.stdout(), Some("print(input())|42"));
    assert_eq!(result.error(), None);
    assert!(result.is_success());
    assert_eq!(result.execution_time_seconds, Some(0.005));
}

#[tokio::test]
async fn output_and_error_can_both_be_present() {
    let url = spawn_server(canned(StatusCode::OK, r#"{"output":"partial\n","error":"Crash\n"}"#)).await;
    let client = HttpExecutionClient::new(&url).unwrap();

    let result = client.execute(&ExecutionRequest::new("x", "")).await.unwrap();

    assert_eq!(result.stdout(), Some("partial\n"));
    assert_eq!(result.error(), Some("Crash\n"));
    assert_eq!(result.execution_time_seconds, None);
}

#[tokio::test]
async fn server_error_status_is_transport_failure() {
    let url = spawn_server(canned(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await;
    let client = HttpExecutionClient::new(&url).unwrap();

    let err = client.execute(&ExecutionRequest::new("x", "")).await.unwrap_err();

    assert_eq!(err, TransportError::Status { status: 500, body: "boom".into() });
}

#[tokio::test]
async fn non_json_body_is_transport_failure() {
    let url = spawn_server(canned(StatusCode::OK, "<html>oops</html>")).await;
    let client = HttpExecutionClient::new(&url).unwrap();

    let err = client.execute(&ExecutionRequest::new("x", "")).await.unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn wrong_field_type_is_transport_failure() {
    let url = spawn_server(canned(StatusCode::OK, r#"{"output": 5}"#)).await;
    let client = HttpExecutionClient::new(&url).unwrap();

    let err = client.execute(&ExecutionRequest::new("x", "")).await.unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    let client = HttpExecutionClient::new(&unreachable_url()).unwrap();

    let err = client.execute(&ExecutionRequest::new("x", "")).await.unwrap_err();

    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn configured_timeout_surfaces_as_network_failure() {
    let router = Router::new().route(
        "/run",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let url = spawn_server(router).await;
    let http = reqwest::Client::builder().timeout(Duration::from_millis(100)).build().unwrap();
    let client = HttpExecutionClient::with_client(http, &url);

    let err = client.execute(&ExecutionRequest::new("x", "")).await.unwrap_err();

    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
}
