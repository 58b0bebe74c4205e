use thiserror::Error;

/// Errors surfaced while starting ghostterm
#[derive(Debug, Error)]
pub enum GhosttermError {
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("Invalid backend URL '{0}': expected http:// or https://")]
    InvalidBackendUrl(String),

    #[error("Backend client setup failed: {0}")]
    BackendSetup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
