//! Configuration loading
//!
//! Reads `config.toml` from the user's config directory (or an explicit path)
//! and falls back to defaults when no file exists.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GhosttermError;

pub use types::{BackendConfig, Config, EnterPolicy, SelectionDefault, StatsConfig, SuggestConfig};

/// Default location: `<config dir>/ghostterm/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghostterm").join("config.toml"))
}

/// Load configuration
///
/// An explicit path must exist. The default path is optional; if it is
/// missing the built-in defaults are used.
pub fn load(explicit: Option<&Path>) -> Result<Config, GhosttermError> {
    match explicit {
        Some(path) => load_file(path),
        None => match default_path() {
            Some(path) if path.exists() => load_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        },
    }
}

fn load_file(path: &Path) -> Result<Config, GhosttermError> {
    let content = fs::read_to_string(path)?;
    let config = parse(&content).map_err(|message| GhosttermError::InvalidConfig {
        path: path.display().to_string(),
        message,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse TOML content into a Config
pub fn parse(content: &str) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| e.message().to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
