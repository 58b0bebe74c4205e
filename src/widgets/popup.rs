use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Borders on each side of a popup
const BORDER: u16 = 1;

/// Area for a bordered dropdown sitting directly above `anchor`
///
/// `content_width` and `rows` exclude the border. The result is clamped to
/// the anchor's width and to the space above it, so it may come back with
/// zero height on a tiny terminal.
pub fn dropdown_above(anchor: Rect, content_width: u16, rows: u16, x_offset: u16) -> Rect {
    let width = content_width
        .saturating_add(BORDER * 2)
        .min(anchor.width.saturating_sub(x_offset));
    let height = rows.saturating_add(BORDER * 2).min(anchor.y);

    Rect {
        x: anchor.x + x_offset.min(anchor.width),
        y: anchor.y - height,
        width,
        height,
    }
}

/// First row to show so that `selected` stays inside a window of `visible`
pub fn scroll_offset(selected: Option<usize>, visible: usize) -> usize {
    match selected {
        Some(index) if visible > 0 && index >= visible => index + 1 - visible,
        _ => 0,
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
