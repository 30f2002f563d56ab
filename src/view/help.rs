//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::helpers::{centered_rect, empty_line};
use super::styles::{MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups shown in the overlay: (category, [(keys, description)]).
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("j/↓", "Next row"),
            ("k/↑", "Previous row"),
            ("]/→/PgDn", "Next page"),
            ("[/←/PgUp", "Previous page"),
            ("1-9", "Go to page"),
            ("click", "Go to clicked page"),
        ],
    ),
    (
        "Search",
        &[
            ("//Ctrl+f", "Start search (filters from 3 characters)"),
            ("Enter", "Search now"),
            ("Esc", "Clear search"),
        ],
    ),
    (
        "Cargo",
        &[
            ("a", "Add cargo"),
            ("e", "Edit selected cargo"),
            ("v/Enter", "View details"),
            ("x/Delete", "Delete selected cargo"),
            ("p", "Add product"),
        ],
    ),
    (
        "Forms",
        &[
            ("Tab/Shift+Tab", "Next / previous field"),
            ("Space/←/→", "Change type or criterion"),
            ("Enter", "Submit (on Map click: set point)"),
            ("Ctrl+d", "Delete (edit form)"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Application",
        &[("q/Ctrl+c", "Quit"), ("?", "Show help overlay")],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

fn build_help_content() -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for (index, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(empty_line());
        }
        lines.push(Line::from(Span::styled(*category, SECTION_HEADER)));
        for (keys, description) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<14}"), key_style),
                Span::styled(*description, desc_style),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
