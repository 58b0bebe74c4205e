//! Command execution behind the prompt
//!
//! The session hands every submitted line to a [`CommandExecutor`]. Two
//! implementations exist: a client-side simulator and a thin HTTP client
//! for a real backend.

mod local_shell;
mod remote;

pub use local_shell::LocalShell;
pub use remote::RemoteExecutor;

use thiserror::Error;

use crate::backend::{BackendClient, BlockingBackend};
use crate::config::BackendConfig;
use crate::error::GhosttermError;

/// Output text that means "clear the screen" on the wire
pub const CLEAR_SENTINEL: &str = "<CLEAR_SCREEN>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutput {
    /// Lines to append to the history
    Text(String),
    /// Wipe the visible history
    Clear,
}

impl ExecOutput {
    /// Map raw backend output, honouring the clear sentinel
    pub fn from_wire(output: String) -> Self {
        if output.trim() == CLEAR_SENTINEL {
            ExecOutput::Clear
        } else {
            ExecOutput::Text(output)
        }
    }
}

/// Failures shown to the user as an error line
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecError {
    #[error("{0}: command not found")]
    NotFound(String),

    #[error("Usage: {0}")]
    Usage(String),

    /// Backend answered but not with a usable result
    #[error("Error: {0}")]
    Backend(String),

    /// Backend could not be reached at all
    #[error("Error: {0}")]
    Unreachable(String),
}

pub trait CommandExecutor {
    fn execute(&mut self, line: &str) -> Result<ExecOutput, ExecError>;

    /// Directory shown in the prompt
    fn cwd(&self) -> &str;
}

/// Remote executor when a backend URL is configured, else the simulator
pub fn from_config(config: &BackendConfig) -> Result<Box<dyn CommandExecutor>, GhosttermError> {
    match &config.url {
        Some(url) => {
            let backend = BlockingBackend::new(BackendClient::new(url)?)?;
            Ok(Box::new(RemoteExecutor::new(backend)))
        }
        None => Ok(Box::new(LocalShell::new())),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
