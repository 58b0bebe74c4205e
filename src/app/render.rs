use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::state::App;
use crate::session::LineKind;
use crate::widgets::popup;

const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const DROPDOWN_OFFSET_X: u16 = 2;
/// Room for the "► " selection marker
const MARKER_WIDTH: u16 = 2;

impl App {
    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

        self.render_output(frame, layout[0]);
        self.render_prompt(frame, layout[1]);
        self.render_status(frame, layout[2]);
        // Last, so it draws over the output pane
        self.render_dropdown(frame, layout[1]);
    }

    /// History pane, pinned to the newest line
    fn render_output(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Terminal ")
            .border_style(Style::default().fg(Color::DarkGray));

        let lines: Vec<Line> = self
            .session
            .lines()
            .iter()
            .map(|line| match line.kind {
                LineKind::Command => Line::styled(
                    line.content.as_str(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                LineKind::Output => Line::styled(line.content.as_str(), Style::default().fg(Color::White)),
                LineKind::Error => Line::styled(line.content.as_str(), Style::default().fg(Color::Red)),
            })
            .collect();

        let inner_height = area.height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(inner_height);

        let content = Paragraph::new(lines)
            .block(block)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(content, area);
    }

    /// Prompt, typed text and the ghost completion after it
    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);

        let prompt = format!("{} ", self.session.prompt());
        let input = self.input_text();
        let line = Line::from(vec![
            Span::styled(prompt.as_str(), Style::default().fg(Color::Green)),
            Span::raw(input),
            Span::styled(
                self.controller.ghost_text(),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        // Caret sits after the typed chars, never inside the ghost
        let before_cursor: String = input.chars().take(self.cursor_col()).collect();
        let offset = prompt.width() + before_cursor.width();
        let x = inner
            .x
            .saturating_add(offset.min(u16::MAX as usize) as u16)
            .min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }

    /// Suggestion list above the prompt
    fn render_dropdown(&self, frame: &mut Frame, input_area: Rect) {
        let suggestions = self.controller.suggestions();
        if suggestions.is_empty() || self.max_visible == 0 {
            return;
        }

        let visible = suggestions.len().min(self.max_visible);
        let selected = self.controller.selected_index();
        let offset = popup::scroll_offset(selected, visible);

        let content_width = suggestions
            .iter()
            .map(|s| s.width())
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let area = popup::dropdown_above(
            input_area,
            content_width.saturating_add(MARKER_WIDTH + 1),
            visible as u16,
            DROPDOWN_OFFSET_X,
        );
        if area.height == 0 {
            return;
        }
        popup::clear_area(frame, area);

        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, suggestion)| {
                if Some(i) == selected {
                    ListItem::new(Line::from(Span::styled(
                        format!("► {} ", suggestion),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(suggestion.as_str(), Style::default().fg(Color::White)),
                    ]))
                }
            })
            .collect();

        let title = format!(" {}/{} ", selected.map_or(0, |i| i + 1), suggestions.len());
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );
        frame.render_widget(list, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let stats = self.stats.current();
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::Yellow);

        let line = Line::from(vec![
            Span::styled(" CPU ", label),
            Span::styled(format!("{:.0}%", stats.cpu), value),
            Span::styled("  MEM ", label),
            Span::styled(format!("{:.0}%", stats.memory), value),
            Span::styled("  ↑ ", label),
            Span::styled(format!("{:.1} MB", stats.network_up), value),
            Span::styled("  ↓ ", label),
            Span::styled(format!("{:.1} MB", stats.network_down), value),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
