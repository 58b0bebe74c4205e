// Configuration type definitions

use clap::ValueEnum;
use serde::Deserialize;

/// Which suggestion is selected when a fresh list arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SelectionDefault {
    /// Nothing highlighted; ghost text previews the top candidate
    #[default]
    None,
    /// First candidate highlighted
    First,
}

/// What Enter does while a suggestion is selected by arrow navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EnterPolicy {
    /// Ignore the selection and submit the typed text
    SubmitRaw,
    /// Accept the selection into the input; a second Enter submits
    #[default]
    AcceptSelection,
    /// Accept the selection and submit it in one step
    AcceptAndSubmit,
}

/// Suggestion behaviour section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub debounce_ms: u64,
    pub selection: SelectionDefault,
    pub enter: EnterPolicy,
    pub accept_separator: bool,
    pub max_visible: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        SuggestConfig {
            debounce_ms: 120,
            selection: SelectionDefault::None,
            enter: EnterPolicy::AcceptSelection,
            accept_separator: false,
            max_visible: 8,
        }
    }
}

/// Remote command backend section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the command backend; absent means local simulation
    pub url: Option<String>,
    pub stats_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: None,
            stats_timeout_ms: 500,
        }
    }
}

/// Status bar section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub interval_ms: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig { interval_ms: 2000 }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub suggest: SuggestConfig,
    pub backend: BackendConfig,
    pub stats: StatsConfig,
}
