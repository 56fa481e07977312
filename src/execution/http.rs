//! Reqwest-backed client for the `/run` endpoint.

use std::error::Error as _;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::debug;

use super::{ExecutionClient, ExecutionRequest, ExecutionResult, TransportError};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct HttpExecutionClient {
    http: Client,
    base_url: String,
}

impl HttpExecutionClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_client(http, &cfg.server_url()))
    }

    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_client(Client::builder().build()?, base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn run_url(&self) -> String {
        format!("{}/run", self.base_url)
    }
}

#[async_trait]
impl ExecutionClient for HttpExecutionClient {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, TransportError> {
        let url = self.run_url();
        debug!(%url, code_len = request.code.len(), "POST run");

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(error_chain(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Network(error_chain(&e)))?;
        serde_json::from_slice::<ExecutionResult>(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// reqwest's Display stops at the outermost layer; the cause ("connection refused") lives in
/// the source chain.
fn error_chain(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_url_strips_trailing_slash() {
        let client = HttpExecutionClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.run_url(), "http://localhost:5000/run");
    }
}
