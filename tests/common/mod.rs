#![allow(dead_code)]

use axum::{http::header::CONTENT_TYPE, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{addr}")
}

/// `/run` answering every request with `status` and a raw `body`.
pub fn canned(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/run",
        post(move || async move { (status, [(CONTENT_TYPE, "application/json")], body) }),
    )
}

/// `/run` that reflects the request: output is `code|input`.
pub fn echo() -> Router {
    Router::new().route(
        "/run",
        post(|Json(body): Json<Value>| async move {
            let code = body["code"].as_str().unwrap_or_default();
            let input = body["input"].as_str().unwrap_or_default();
            Json(json!({ "output": format!("{code}|{input}"), "error": "", "execution_time": 0.005 }))
        }),
    )
}

/// A base URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
