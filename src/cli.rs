use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, EnterPolicy, SelectionDefault};

/// Fake terminal with ghost-text command completion
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL; without one everything is simulated locally
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// Quiet period before querying a remote suggestion source
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Whether a fresh suggestion list preselects its first entry
    #[arg(long, value_enum)]
    pub selection: Option<SelectionDefault>,

    /// What Enter does while a suggestion is selected
    #[arg(long, value_enum)]
    pub enter: Option<EnterPolicy>,

    /// Run one command line, print its output and exit
    #[arg(short = 'c', long, value_name = "CMD")]
    pub command: Option<String>,
}

impl Cli {
    /// Layer flags over file values
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.backend {
            config.backend.url = Some(url.clone());
        }
        if let Some(ms) = self.debounce_ms {
            config.suggest.debounce_ms = ms;
        }
        if let Some(selection) = self.selection {
            config.suggest.selection = selection;
        }
        if let Some(enter) = self.enter {
            config.suggest.enter = enter;
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
