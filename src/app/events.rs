use std::io;
use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::App;
use crate::suggest::{ControlKey, KeyOutcome};

/// Event poll timeout; also the tick granularity for the debounce timer
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Draw, wait for input, tick; until the user quits
pub fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_INTERVAL)? {
            // Only key presses; releases would double every keystroke
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
    Ok(())
}

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.handle_global_keys(key) {
            return;
        }

        let control = self.control_key(key);
        match self.controller.on_key(control) {
            KeyOutcome::Accepted => self.sync_textarea(),
            KeyOutcome::Submitted(line) => {
                self.session.submit(&line);
                self.sync_textarea();
            }
            KeyOutcome::Handled => {}
            KeyOutcome::Ignored => self.handle_unclaimed_key(key, control),
        }
    }

    /// Keys that work no matter what the prompt holds
    ///
    /// Returns true if the key was handled.
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('l') => {
                self.session.clear_screen();
                true
            }
            _ => false,
        }
    }

    fn control_key(&self, key: KeyEvent) -> ControlKey {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab => ControlKey::Tab,
            KeyCode::Right if key.modifiers.is_empty() => ControlKey::Right {
                at_end: self.cursor_col() >= self.input_text().chars().count(),
            },
            KeyCode::Down => ControlKey::Down,
            KeyCode::Up => ControlKey::Up,
            KeyCode::Enter => ControlKey::Enter,
            // Terminals report Enter as Ctrl+M or Ctrl+J in some modes
            KeyCode::Char('m') | KeyCode::Char('j') if ctrl => ControlKey::Enter,
            KeyCode::Esc => ControlKey::Escape,
            _ => ControlKey::Other,
        }
    }

    /// The controller passed on this key; do the prompt's own thing
    fn handle_unclaimed_key(&mut self, key: KeyEvent, control: ControlKey) {
        match control {
            ControlKey::Up => {
                if let Some(line) = self.session.recall_previous(self.controller.input()) {
                    self.replace_input(&line);
                }
            }
            ControlKey::Down => {
                if let Some(line) = self.session.recall_next() {
                    self.replace_input(&line);
                }
            }
            ControlKey::Escape => {}
            _ => {
                if self.textarea.input(key) {
                    let text = self.textarea_text();
                    self.controller.on_input_changed(&text);
                }
            }
        }
    }

    /// Swap in a recalled line without popping the dropdown open
    fn replace_input(&mut self, text: &str) {
        self.controller.on_input_changed(text);
        self.controller.dismiss();
        self.sync_textarea();
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
