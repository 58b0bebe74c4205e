//! Suggestion controller and its collaborators
//!
//! The controller owns the line being composed and everything derived from
//! it: the candidate list, the selection cursor and the ghost text. Sources
//! plug in behind [`SuggestionSource`].

mod controller;
mod debouncer;
mod ghost;
pub mod remote;
mod selection;
mod source;

pub use controller::{ControlKey, ControllerPolicy, KeyOutcome, SuggestionController};
pub use debouncer::Debouncer;
pub use ghost::{ghost_text, starts_with_ignore_case};
pub use remote::RemoteSource;
pub use selection::SelectionState;
pub use source::{
    FetchOutcome, StaticMatcher, SuggestError, SuggestionQuery, SuggestionReply, SuggestionSource,
};
