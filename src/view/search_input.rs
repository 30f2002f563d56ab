//! Search input widget for rendering the search bar.

use crate::state::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar.
///
/// While typing it shows the query with a cursor; otherwise it shows the
/// applied term, or a hint when nothing is filtered.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
    applied_term: &'a str,
    min_chars: usize,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search_state: &'a SearchState, applied_term: &'a str, min_chars: usize) -> Self {
        Self {
            search_state,
            applied_term,
            min_chars,
        }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.search_state {
            SearchState::Typing { input } => {
                let query = input.value();
                let cursor = input.cursor();
                let before: String = query.chars().take(cursor).collect();
                let mut after = query.chars().skip(cursor);
                let cursor_char = after.next().map_or_else(|| " ".to_string(), String::from);
                let after_text: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(
                        cursor_char,
                        Style::default()
                            .bg(Color::White)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(after_text),
                ]);
                let title = if query.trim().chars().count() < self.min_chars {
                    format!("Search (Enter to apply, live from {} chars)", self.min_chars)
                } else {
                    "Search".to_string()
                };
                Paragraph::new(line)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(title)
                            .style(Style::default().bg(Color::DarkGray)),
                    )
                    .render(area, buf);
            }
            SearchState::Inactive if !self.applied_term.is_empty() => {
                Paragraph::new(Line::from(self.applied_term))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Search (active, Esc clears)"),
                    )
                    .render(area, buf);
            }
            SearchState::Inactive => {
                Paragraph::new(Line::from(Span::styled(
                    "Press / to search",
                    super::styles::MUTED_TEXT,
                )))
                .block(Block::default().borders(Borders::ALL).title("Search"))
                .render(area, buf);
            }
        }
    }
}
