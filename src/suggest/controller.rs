//! Suggestion controller state machine
//!
//! Events arrive one at a time: input changes, key presses, timer ticks and
//! source replies. Every async reply is checked against the live input
//! before it is applied, so a slow answer for an older prefix can never
//! overwrite the list for the current one.

use std::time::{Duration, Instant};

use super::debouncer::Debouncer;
use super::ghost::{ghost_text, starts_with_ignore_case};
use super::selection::SelectionState;
use super::source::{FetchOutcome, SuggestionQuery, SuggestionReply, SuggestionSource};
use crate::config::{EnterPolicy, SelectionDefault, SuggestConfig};

/// Keys the controller cares about
///
/// The render binding maps its toolkit's key events onto this set; any key
/// not listed is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    Tab,
    /// ArrowRight; `at_end` is true when the caret sits after the last char
    Right { at_end: bool },
    Down,
    Up,
    Enter,
    Escape,
    Other,
}

/// What the binding should do after a key went through the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a controller key here; run the widget's default editing
    Ignored,
    /// Consumed; suppress the default action, input text unchanged
    Handled,
    /// Consumed; input was replaced by a suggestion and must be re-synced
    Accepted,
    /// Consumed; this line goes to the command executor, input is now empty
    Submitted(String),
}

impl KeyOutcome {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Behaviour knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerPolicy {
    pub debounce: Duration,
    pub selection: SelectionDefault,
    pub enter: EnterPolicy,
    pub accept_separator: bool,
}

impl Default for ControllerPolicy {
    fn default() -> Self {
        Self::from(&SuggestConfig::default())
    }
}

impl From<&SuggestConfig> for ControllerPolicy {
    fn from(config: &SuggestConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            selection: config.selection,
            enter: config.enter,
            accept_separator: config.accept_separator,
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    request_id: u64,
    prefix: String,
}

pub struct SuggestionController<S> {
    source: S,
    policy: ControllerPolicy,
    input: String,
    suggestions: Vec<String>,
    selection: SelectionState,
    debouncer: Debouncer,
    in_flight: Option<InFlight>,
    request_id: u64,
}

impl<S: SuggestionSource> SuggestionController<S> {
    pub fn new(source: S, policy: ControllerPolicy) -> Self {
        Self {
            source,
            policy,
            input: String::new(),
            suggestions: Vec::new(),
            selection: SelectionState::new(),
            debouncer: Debouncer::new(policy.debounce),
            in_flight: None,
            request_id: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn is_navigation_active(&self) -> bool {
        self.selection.is_navigated()
    }

    /// True while a query is waiting on the debounce timer or the source
    pub fn is_loading(&self) -> bool {
        self.debouncer.is_pending() || self.in_flight.is_some()
    }

    pub fn policy(&self) -> &ControllerPolicy {
        &self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Candidate the ghost text and accept key refer to
    ///
    /// The explicitly selected one, else the top of the list.
    pub fn active_candidate(&self) -> Option<&str> {
        let index = self.selection.selected().unwrap_or(0);
        self.suggestions.get(index).map(String::as_str)
    }

    /// Inline completion preview to draw after the typed text
    pub fn ghost_text(&self) -> &str {
        match self.active_candidate() {
            Some(candidate) => ghost_text(&self.input, candidate),
            None => "",
        }
    }

    /// The widget's text changed to `text` (full contents, not a delta)
    pub fn on_input_changed(&mut self, text: &str) {
        self.on_input_changed_at(text, Instant::now());
    }

    pub fn on_input_changed_at(&mut self, text: &str, now: Instant) {
        if text == self.input && !text.is_empty() {
            return;
        }

        self.input.clear();
        self.input.push_str(text);
        self.debouncer.cancel();
        self.cancel_in_flight();

        if self.input.is_empty() {
            self.clear_suggestions();
            return;
        }

        // Keep what still matches until the new answer lands
        let input = &self.input;
        self.suggestions
            .retain(|candidate| starts_with_ignore_case(candidate, input));
        self.selection
            .reset(self.policy.selection, self.suggestions.len());

        if self.source.needs_debounce() {
            self.debouncer.schedule(now);
        } else {
            self.issue_query();
        }
    }

    /// Candidates arrived for `for_text`
    ///
    /// Dropped without effect when `for_text` is no longer the live input.
    pub fn on_suggestions_received(&mut self, for_text: &str, candidates: Vec<String>) {
        if for_text != self.input {
            log::debug!(
                "Dropping stale suggestions for {:?} (input is {:?})",
                for_text,
                self.input
            );
            return;
        }
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.prefix == for_text)
        {
            self.in_flight = None;
        }

        let input = &self.input;
        let total = candidates.len();
        self.suggestions = candidates
            .into_iter()
            .filter(|candidate| starts_with_ignore_case(candidate, input))
            .collect();
        if self.suggestions.len() != total {
            log::debug!(
                "Filtered {} candidates not starting with {:?}",
                total - self.suggestions.len(),
                self.input
            );
        }
        self.selection
            .reset(self.policy.selection, self.suggestions.len());
    }

    /// The source failed for `for_text`; treated as "no suggestions"
    pub fn on_suggestions_failed(&mut self, for_text: &str) {
        if for_text != self.input {
            return;
        }
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.prefix == for_text)
        {
            self.in_flight = None;
        }
        self.clear_suggestions();
    }

    /// Timer event: fire a due query and apply finished replies
    pub fn tick(&mut self, now: Instant) {
        while let Some(reply) = self.source.poll_reply() {
            self.apply_reply(reply);
        }

        if self.debouncer.take_due(now) && !self.input.is_empty() {
            self.issue_query();
        }
    }

    pub fn on_key(&mut self, key: ControlKey) -> KeyOutcome {
        match key {
            ControlKey::Tab => {
                // Tab never moves focus, accepted or not
                if self.accept() {
                    KeyOutcome::Accepted
                } else {
                    KeyOutcome::Handled
                }
            }
            ControlKey::Right { at_end: true } if !self.ghost_text().is_empty() => {
                if self.accept() {
                    KeyOutcome::Accepted
                } else {
                    KeyOutcome::Ignored
                }
            }
            ControlKey::Right { .. } => KeyOutcome::Ignored,
            ControlKey::Down if !self.suggestions.is_empty() => {
                self.selection.select_next(self.suggestions.len());
                KeyOutcome::Handled
            }
            ControlKey::Up if !self.suggestions.is_empty() => {
                self.selection.select_previous(self.suggestions.len());
                KeyOutcome::Handled
            }
            ControlKey::Down | ControlKey::Up => KeyOutcome::Ignored,
            ControlKey::Enter => self.commit(),
            ControlKey::Escape => {
                if self.suggestions.is_empty() && !self.is_loading() {
                    return KeyOutcome::Ignored;
                }
                self.dismiss();
                KeyOutcome::Handled
            }
            ControlKey::Other => KeyOutcome::Ignored,
        }
    }

    /// Drop the list (and any query that would refill it), keep the text
    pub fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight();
        self.clear_suggestions();
    }

    /// Reset the composed line and everything derived from it
    pub fn clear(&mut self) {
        self.input.clear();
        self.dismiss();
    }

    fn commit(&mut self) -> KeyOutcome {
        let navigated = self.selection.is_navigated() && self.selection.selected().is_some();
        if navigated {
            match self.policy.enter {
                EnterPolicy::SubmitRaw => {}
                EnterPolicy::AcceptSelection => {
                    self.accept();
                    return KeyOutcome::Accepted;
                }
                EnterPolicy::AcceptAndSubmit => {
                    self.accept();
                }
            }
        }

        if self.input.trim().is_empty() {
            return KeyOutcome::Handled;
        }

        let line = std::mem::take(&mut self.input);
        self.dismiss();
        KeyOutcome::Submitted(line)
    }

    fn accept(&mut self) -> bool {
        let Some(candidate) = self.active_candidate() else {
            return false;
        };

        let mut accepted = candidate.to_string();
        if self.policy.accept_separator {
            accepted.push(' ');
        }

        self.input = accepted;
        self.dismiss();
        true
    }

    fn issue_query(&mut self) {
        self.cancel_in_flight();
        self.request_id = self.request_id.wrapping_add(1);
        let query = SuggestionQuery {
            request_id: self.request_id,
            prefix: self.input.clone(),
        };

        match self.source.fetch(&query) {
            FetchOutcome::Ready(Ok(candidates)) => {
                self.on_suggestions_received(&query.prefix, candidates);
            }
            FetchOutcome::Ready(Err(e)) => {
                log::debug!("Suggestion source failed for {:?}: {}", query.prefix, e);
                self.on_suggestions_failed(&query.prefix);
            }
            FetchOutcome::Pending => {
                log::debug!(
                    "Issued suggestion request {} for {:?}",
                    query.request_id,
                    query.prefix
                );
                self.in_flight = Some(InFlight {
                    request_id: query.request_id,
                    prefix: query.prefix,
                });
            }
        }
    }

    fn apply_reply(&mut self, reply: SuggestionReply) {
        // Replies to cancelled or superseded requests may still be queued
        let live = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.request_id == reply.request_id);
        if !live {
            log::debug!("Ignoring reply for dead request {}", reply.request_id);
            return;
        }

        match reply.result {
            Ok(candidates) => self.on_suggestions_received(&reply.prefix, candidates),
            Err(e) => {
                log::debug!("Suggestion request {} failed: {}", reply.request_id, e);
                self.on_suggestions_failed(&reply.prefix);
            }
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            log::debug!("Cancelling suggestion request {}", in_flight.request_id);
            self.source.cancel(in_flight.request_id);
        }
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.selection.clear();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
