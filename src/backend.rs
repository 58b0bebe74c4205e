//! HTTP client for the remote command backend
//!
//! The backend exposes three endpoints:
//! - `POST /execute` with `{"command": ..}` returning `{"output": ..}`
//! - `GET /autocomplete?prefix=..` returning `{"suggestions": [..]}`
//! - `GET /stats` returning `{"cpu", "mem", "net_up", "net_down"}`

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::error::GhosttermError;

/// Errors that can occur talking to the backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Could not reach the server (refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// Body was not the JSON we expected
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            BackendError::Status(status.as_u16())
        } else if error.is_decode() {
            BackendError::Parse(error.to_string())
        } else {
            BackendError::Network(error.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    command: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExecuteReply {
    output: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteReply {
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Raw `/stats` payload; network counters are bytes
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BackendStats {
    pub cpu: f64,
    pub mem: f64,
    pub net_up: f64,
    pub net_down: f64,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// Build a client for `base_url` (scheme required, trailing slash optional)
    pub fn new(base_url: &str) -> Result<Self, GhosttermError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(GhosttermError::InvalidBackendUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GhosttermError::BackendSetup(e.to_string()))?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn execute(&self, command: &str) -> Result<String, BackendError> {
        let reply: ExecuteReply = self
            .http
            .post(self.url("/execute"))
            .json(&ExecuteRequest { command })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(reply.output)
    }

    /// Candidates for the trimmed prefix
    pub async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, BackendError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let reply: AutocompleteReply = self
            .http
            .get(self.url("/autocomplete"))
            .query(&[("prefix", prefix)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(reply.suggestions)
    }

    pub async fn stats(&self, timeout: Duration) -> Result<BackendStats, BackendError> {
        let stats = self
            .http
            .get(self.url("/stats"))
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(stats)
    }
}

/// Blocking facade for running committed commands
///
/// Owns a current-thread runtime shared by clones.
#[derive(Debug, Clone)]
pub struct BlockingBackend {
    client: BackendClient,
    runtime: Arc<Runtime>,
}

impl BlockingBackend {
    pub fn new(client: BackendClient) -> Result<Self, GhosttermError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            client,
            runtime: Arc::new(runtime),
        })
    }

    pub fn execute(&self, command: &str) -> Result<String, BackendError> {
        self.runtime.block_on(self.client.execute(command))
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
