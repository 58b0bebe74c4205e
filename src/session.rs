//! Terminal session: output history, prompt and command recall
//!
//! Sits between the prompt and the executor. The suggestion controller
//! never sees any of this; it only hands over committed lines.

mod recall;

pub use recall::CommandRecall;

use chrono::{DateTime, Local};

use crate::executor::{CommandExecutor, ExecOutput};

pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to Tyeetale Terminal v1.0",
    "Type \"help\" to see available commands.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of a submitted line, with its prompt
    Command,
    Output,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub id: u64,
    pub kind: LineKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

pub struct TerminalSession {
    executor: Box<dyn CommandExecutor>,
    lines: Vec<TerminalLine>,
    next_id: u64,
    recall: CommandRecall,
}

impl TerminalSession {
    /// Session greeting the user with the welcome banner
    pub fn new(executor: Box<dyn CommandExecutor>) -> Self {
        let mut session = Self::headless(executor);
        for line in WELCOME_LINES {
            session.push(LineKind::Output, line.to_string());
        }
        session
    }

    /// Session with an empty history
    pub fn headless(executor: Box<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            lines: Vec::new(),
            next_id: 1,
            recall: CommandRecall::default(),
        }
    }

    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    pub fn cwd(&self) -> &str {
        self.executor.cwd()
    }

    pub fn prompt(&self) -> String {
        format!("{} >", self.cwd())
    }

    /// Run a committed line and record what happened
    pub fn submit(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let echo = format!("{} {}", self.prompt(), line);
        self.push(LineKind::Command, echo);
        self.recall.push(line);

        match self.executor.execute(line) {
            Ok(ExecOutput::Clear) => self.lines.clear(),
            Ok(ExecOutput::Text(text)) => {
                for output in text.lines() {
                    self.push(LineKind::Output, output.to_string());
                }
            }
            Err(e) => {
                log::debug!("Command {:?} failed: {}", line, e);
                self.push(LineKind::Error, e.to_string());
            }
        }
    }

    pub fn clear_screen(&mut self) {
        self.lines.clear();
    }

    /// Step back through submitted lines; `current` is restored at the end
    pub fn recall_previous(&mut self, current: &str) -> Option<String> {
        self.recall.older(current).map(str::to_string)
    }

    pub fn recall_next(&mut self) -> Option<String> {
        self.recall.newer().map(str::to_string)
    }

    fn push(&mut self, kind: LineKind, content: String) {
        self.lines.push(TerminalLine {
            id: self.next_id,
            kind,
            content,
            timestamp: Local::now(),
        });
        self.next_id += 1;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
