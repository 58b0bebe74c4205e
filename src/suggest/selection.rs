//! Selection cursor over the suggestion list

use crate::config::SelectionDefault;

/// Which suggestion is highlighted, and whether the user put it there
///
/// `navigated` is only set by arrow-key movement. A default highlight
/// from [`SelectionDefault::First`] does not count as navigation, which is
/// what lets Enter tell "user picked this" from "this happened to be first".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
    navigated: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a freshly replaced list of `count` candidates
    pub fn reset(&mut self, policy: SelectionDefault, count: usize) {
        self.navigated = false;
        self.selected = match policy {
            SelectionDefault::First if count > 0 => Some(0),
            _ => None,
        };
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.navigated = false;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_navigated(&self) -> bool {
        self.navigated
    }

    /// Move down, wrapping from the last candidate to the first
    ///
    /// With nothing selected the first candidate is picked.
    pub fn select_next(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.navigated = true;
        self.selected = Some(match self.selected {
            Some(current) => (current + 1) % count,
            None => 0,
        });
    }

    /// Move up, wrapping from the first candidate to the last
    ///
    /// With nothing selected the last candidate is picked.
    pub fn select_previous(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.navigated = true;
        self.selected = Some(match self.selected {
            Some(current) => (current + count - 1) % count,
            None => count - 1,
        });
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
