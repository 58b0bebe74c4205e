use std::time::{Duration, Instant};

use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::backend::{BackendClient, BlockingBackend};
use crate::config::Config;
use crate::error::GhosttermError;
use crate::executor::{LocalShell, RemoteExecutor};
use crate::session::TerminalSession;
use crate::stats::StatsFeed;
use crate::suggest::{
    ControllerPolicy, RemoteSource, StaticMatcher, SuggestionController, SuggestionSource,
};

pub type Controller = SuggestionController<Box<dyn SuggestionSource>>;

/// Application state
pub struct App {
    pub(super) controller: Controller,
    pub(super) session: TerminalSession,
    pub(super) stats: StatsFeed,
    /// Edit buffer for the prompt; the controller owns the canonical text
    pub(super) textarea: TextArea<'static>,
    pub(super) max_visible: usize,
    pub(super) should_quit: bool,
}

impl App {
    pub fn new(
        controller: Controller,
        session: TerminalSession,
        stats: StatsFeed,
        max_visible: usize,
    ) -> Self {
        let textarea = prompt_textarea(controller.input());
        Self {
            controller,
            session,
            stats,
            textarea,
            max_visible,
            should_quit: false,
        }
    }

    /// Wire sources, executor and stats from config
    ///
    /// With a backend URL everything talks to the backend; without one the
    /// app is a fully local simulation.
    pub fn from_config(config: &Config) -> Result<Self, GhosttermError> {
        let policy = ControllerPolicy::from(&config.suggest);
        let interval = Duration::from_millis(config.stats.interval_ms);

        let (source, session, stats) = match &config.backend.url {
            Some(url) => {
                let client = BackendClient::new(url)?;
                let timeout = Duration::from_millis(config.backend.stats_timeout_ms);
                log::debug!("Using backend at {}", client.base_url());

                let stats = StatsFeed::remote(client.clone(), timeout, interval)?;
                let backend = BlockingBackend::new(client.clone())?;
                let session = TerminalSession::new(Box::new(RemoteExecutor::new(backend)));
                let source: Box<dyn SuggestionSource> = Box::new(RemoteSource::spawn(client)?);
                (source, session, stats)
            }
            None => {
                let source: Box<dyn SuggestionSource> = Box::new(StaticMatcher::default());
                let session = TerminalSession::new(Box::new(LocalShell::new()));
                (source, session, StatsFeed::simulated(interval))
            }
        };

        Ok(Self::new(
            SuggestionController::new(source, policy),
            session,
            stats,
            config.suggest.max_visible,
        ))
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn stats(&self) -> &StatsFeed {
        &self.stats
    }

    pub fn input_text(&self) -> &str {
        self.controller.input()
    }

    /// Char index of the caret within the input line
    pub fn cursor_col(&self) -> usize {
        self.textarea.cursor().1
    }

    /// Timer event: debounce, async replies and stats
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
        self.stats.poll_due(now);
    }

    /// Rebuild the edit buffer from the controller's text, caret at the end
    pub(super) fn sync_textarea(&mut self) {
        self.textarea = prompt_textarea(self.controller.input());
    }

    pub(super) fn textarea_text(&self) -> String {
        self.textarea.lines().first().cloned().unwrap_or_default()
    }
}

fn prompt_textarea(text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![text.to_string()]);
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(CursorMove::End);
    textarea
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
