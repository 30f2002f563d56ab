//! Small rendering helpers shared by the widgets.

use super::styles::{LABEL_TEXT, VALUE_TEXT};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
};

/// An empty line, used as a vertical spacer.
pub fn empty_line() -> Line<'static> {
    Line::from("")
}

/// `label: value` line with the label muted.
pub fn key_value_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), LABEL_TEXT),
        Span::styled(value.into(), VALUE_TEXT),
    ])
}

/// Rect centered in `area` taking the given percentage of each dimension.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Flatten a rendered buffer into one string per row, joined by newlines.
#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        result.push('\n');
    }
    result
}
