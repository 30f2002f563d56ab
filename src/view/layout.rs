//! Screen layout: header, search bar, cargo table, pagination bar, status
//! line, with modals drawn on top.

use super::constants::{
    HEADER_HEIGHT, PAGINATION_BAR_HEIGHT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT,
};
use super::help::render_help_overlay;
use super::modals::render_modal;
use super::pagination_bar::render_pagination_bar;
use super::search_input::SearchInput;
use super::styles::{TableStyles, MUTED_TEXT};
use super::cargo_table::render_cargo_table;
use crate::state::{AppState, Modal};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rectangles of the fixed screen regions for one frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title and record counts.
    pub header: Rect,
    /// Search box.
    pub search: Rect,
    /// Cargo table.
    pub table: Rect,
    /// Pagination bar, border included.
    pub pagination: Rect,
    /// Status line.
    pub status: Rect,
}

/// Split `frame_area` into the screen regions.
pub fn calculate_areas(frame_area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGINATION_BAR_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    ScreenAreas {
        header: chunks[0],
        search: chunks[1],
        table: chunks[2],
        pagination: chunks[3],
        status: chunks[4],
    }
}

/// Render the whole screen for `state`.
///
/// Returns the cargo table's scroll offset for mouse hit testing.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &TableStyles) -> usize {
    let areas = calculate_areas(frame.area());
    let view = state.table_view();

    render_header(frame, areas.header, state, view.filtered_total);
    frame.render_widget(
        SearchInput::new(
            &state.search,
            state.table.term(),
            state.settings().search_min_chars,
        ),
        areas.search,
    );
    let table_offset = render_cargo_table(
        frame,
        areas.table,
        &view,
        state.selected_row,
        state.table.term(),
        styles,
    );
    render_pagination_bar(frame, areas.pagination, &view.controls, styles);
    render_status_bar(frame, areas.status, state, styles);

    match state.modal {
        Modal::None => {}
        Modal::Help => render_help_overlay(frame),
        _ => render_modal(frame, state, styles),
    }
    table_offset
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, shown: usize) {
    let total = state.store().len();
    let counts = if shown == total {
        format!(" {total} records")
    } else {
        format!(" {shown} of {total} records")
    };
    let line = Line::from(vec![
        Span::styled(" cargotrack", MUTED_TEXT.add_modifier(Modifier::BOLD)),
        Span::raw(counts),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Last message if there is one, otherwise the key hints.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let line = match &state.status {
        Some(status) => Line::from(Span::styled(status.text.clone(), styles.status(status.kind))),
        None => Line::from(Span::styled(
            "a: add | e: edit | v: details | p: product | /: search | [ ]: pages | ?: help | q: quit",
            MUTED_TEXT,
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
