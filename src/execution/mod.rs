//! Remote execution protocol: request/result types and the client seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;

pub use http::HttpExecutionClient;

/// Body of `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    #[serde(rename = "input")]
    pub stdin: String,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, stdin: impl Into<String>) -> Self {
        Self { code: code.into(), stdin: stdin.into() }
    }

    /// Code that is empty after trimming never goes over the wire.
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

/// What the service reports. Every field may be missing and `stdout`/`error` may both be
/// present (partial output before a crash).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(rename = "output", default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "execution_time", default, skip_serializing_if = "Option::is_none")]
    pub execution_time_seconds: Option<f64>,
}

impl ExecutionResult {
    /// Standard output, with an empty string counted as absent.
    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref().filter(|s| !s.is_empty())
    }

    /// Service-reported error, with an empty string counted as absent.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }
}

/// The call could not produce a well-formed result. Distinct from a result whose `error`
/// field is set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not reach execution service: {0}")]
    Network(String),
    #[error("execution service responded with HTTP {status}{}", fmt_body(.body))]
    Status { status: u16, body: String },
    #[error("unexpected response from execution service: {0}")]
    Decode(String),
}

fn fmt_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// One attempt, no retries.
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, TransportError>;
}
