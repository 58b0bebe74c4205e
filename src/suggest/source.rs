//! Suggestion source abstraction
//!
//! A source answers "what could this prefix become?". Local sources answer
//! on the spot; remote ones answer later through `poll_reply`.

use thiserror::Error;

use crate::backend::BackendError;
use crate::commands;

/// Why a source produced no candidates
///
/// Never shown to the user; the controller treats it as an empty list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SuggestError {
    #[error("Suggestion backend failed: {0}")]
    Backend(String),

    #[error("Suggestion worker is not running")]
    WorkerUnavailable,
}

impl From<BackendError> for SuggestError {
    fn from(error: BackendError) -> Self {
        SuggestError::Backend(error.to_string())
    }
}

/// A query issued for one exact input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    /// Increments per issued query, used to address cancellation
    pub request_id: u64,
    /// The input text the query was issued for, untrimmed
    pub prefix: String,
}

/// Result of handing a query to a source
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Answered synchronously
    Ready(Result<Vec<String>, SuggestError>),
    /// Answer will arrive through `poll_reply`
    Pending,
}

/// An asynchronous answer, keyed by the query it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionReply {
    pub request_id: u64,
    pub prefix: String,
    pub result: Result<Vec<String>, SuggestError>,
}

pub trait SuggestionSource {
    /// Whether queries should wait for a quiet period after typing
    fn needs_debounce(&self) -> bool;

    fn fetch(&mut self, query: &SuggestionQuery) -> FetchOutcome;

    /// Abort an outstanding query; a no-op for synchronous sources
    fn cancel(&mut self, _request_id: u64) {}

    /// Next finished asynchronous answer, if any
    fn poll_reply(&mut self) -> Option<SuggestionReply> {
        None
    }
}

impl<S: SuggestionSource + ?Sized> SuggestionSource for Box<S> {
    fn needs_debounce(&self) -> bool {
        (**self).needs_debounce()
    }

    fn fetch(&mut self, query: &SuggestionQuery) -> FetchOutcome {
        (**self).fetch(query)
    }

    fn cancel(&mut self, request_id: u64) {
        (**self).cancel(request_id)
    }

    fn poll_reply(&mut self) -> Option<SuggestionReply> {
        (**self).poll_reply()
    }
}

/// Synchronous prefix filter over a fixed command list
#[derive(Debug, Clone)]
pub struct StaticMatcher {
    commands: Vec<String>,
}

impl Default for StaticMatcher {
    fn default() -> Self {
        Self::new(commands::names())
    }
}

impl StaticMatcher {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// Commands starting with the lowercased prefix, in list order
    pub fn matches(&self, prefix: &str) -> Vec<String> {
        if prefix.trim().is_empty() {
            return Vec::new();
        }

        let needle = prefix.to_lowercase();
        self.commands
            .iter()
            .filter(|command| command.starts_with(&needle))
            .cloned()
            .collect()
    }
}

impl SuggestionSource for StaticMatcher {
    fn needs_debounce(&self) -> bool {
        false
    }

    fn fetch(&mut self, query: &SuggestionQuery) -> FetchOutcome {
        FetchOutcome::Ready(Ok(self.matches(&query.prefix)))
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
