//! Cargo table widget: header, one row per record on the current page.

use super::constants::TABLE_COLUMN_WIDTHS;
use super::styles::{TableStyles, MUTED_TEXT};
use crate::model::{Cargo, ROW_HEADERS};
use crate::table::TableView;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lines above the first data row inside the table area (border + header).
pub const TABLE_ROWS_OFFSET: u16 = 2;

/// Cut `text` to `width` display cells, ending with `…` when shortened.
pub fn fit_cell(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Render the current page of the cargo table into `area`.
///
/// `term` is the applied search term, used for the empty-state message.
/// Returns the index of the first page row drawn, which is non-zero when the
/// area is too short for the page and the table scrolled to the selection.
pub fn render_cargo_table(
    frame: &mut Frame,
    area: Rect,
    view: &TableView<'_, Cargo>,
    selected_row: usize,
    term: &str,
    styles: &TableStyles,
) -> usize {
    let title = format!(" Cargos ({}) ", view.filtered_total);
    let block = Block::default().borders(Borders::ALL).title(title);

    if view.rows.is_empty() {
        let message = if term.is_empty() {
            "No cargo yet. Press a to add one.".to_string()
        } else {
            format!("No cargo matches \"{term}\".")
        };
        let empty = Paragraph::new(Line::from(Span::styled(message, MUTED_TEXT))).block(block);
        frame.render_widget(empty, area);
        return 0;
    }

    let header = Row::new(ROW_HEADERS.iter().map(|h| h.to_string())).style(styles.header());
    let rows = view.rows.iter().map(|cargo| {
        let cells = cargo
            .cells()
            .into_iter()
            .zip(TABLE_COLUMN_WIDTHS)
            .map(|(text, width)| fit_cell(&text, width));
        Row::new(cells).style(styles.row(cargo))
    });
    let widths = TABLE_COLUMN_WIDTHS.map(Constraint::Length);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(styles.selected_row());

    let mut table_state = TableState::default().with_selected(Some(selected_row));
    frame.render_stateful_widget(table, area, &mut table_state);
    table_state.offset()
}

/// Row index on the page under screen row `row`, if it is a data row.
///
/// `scroll_offset` is the first page row drawn, as returned by
/// [`render_cargo_table`].
pub fn row_at(area: Rect, rows_on_page: usize, scroll_offset: usize, row: u16) -> Option<usize> {
    let first = area.y.saturating_add(TABLE_ROWS_OFFSET);
    // Bottom border.
    let last = area.bottom().saturating_sub(1);
    if row < first || row >= last {
        return None;
    }
    let index = scroll_offset + usize::from(row - first);
    (index < rows_on_page).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::new_cargo;
    use crate::model::{cargo_matches, CargoType};
    use crate::store::CargoStore;
    use crate::table::{PageSize, PagedTable};
    use crate::view::helpers::buffer_to_string;
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(store: &CargoStore, term: &str) -> String {
        render_sized(store, term, PageSize::default(), 0, 8).0
    }

    /// Rendered text and scroll offset for a `height`-row table.
    fn render_sized(
        store: &CargoStore,
        term: &str,
        page_size: PageSize,
        selected_row: usize,
        height: u16,
    ) -> (String, usize) {
        let mut table = PagedTable::new(page_size, cargo_matches);
        table.set_filter(term);
        let view = table.view(store.all());
        let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(true));

        let mut offset = 0;
        let mut terminal = Terminal::new(TestBackend::new(100, height)).expect("test terminal");
        terminal
            .draw(|frame| {
                offset = render_cargo_table(frame, frame.area(), &view, selected_row, term, &styles);
            })
            .expect("draw");
        (buffer_to_string(terminal.backend().buffer()), offset)
    }

    #[test]
    fn fit_cell_keeps_short_text() {
        assert_eq!(fit_cell("M001", 6), "M001");
    }

    #[test]
    fn fit_cell_truncates_with_ellipsis() {
        assert_eq!(fit_cell("awaiting customs", 8), "awaitin…");
        assert_eq!(fit_cell("abc", 0), "");
    }

    #[test]
    fn fit_cell_counts_wide_characters() {
        assert_eq!(fit_cell("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn renders_headers_and_page_rows() {
        let mut store = CargoStore::default();
        for _ in 0..4 {
            store.add(new_cargo(CargoType::Maritime, "2024-01-05", "2024-01-10"));
        }
        let rendered = render(&store, "");

        assert!(rendered.contains("Cargos (4)"));
        for header in ROW_HEADERS {
            assert!(rendered.contains(header), "missing header {header}");
        }
        assert!(rendered.contains("M004"));
        assert!(rendered.contains("M002"));
        assert!(!rendered.contains("M001"), "page 2 row rendered on page 1");
    }

    #[test]
    fn empty_store_shows_add_hint() {
        let rendered = render(&CargoStore::default(), "");
        assert!(rendered.contains("No cargo yet"));
    }

    #[test]
    fn empty_filter_result_names_term() {
        let mut store = CargoStore::default();
        store.add(new_cargo(CargoType::Aerial, "2024-01-05", "2024-01-10"));
        let rendered = render(&store, "zzz");
        assert!(rendered.contains("No cargo matches \"zzz\"."));
    }

    #[test]
    fn row_at_maps_screen_rows_to_page_rows() {
        let area = Rect::new(0, 4, 80, 10);
        assert_eq!(row_at(area, 3, 0, 5), None);
        assert_eq!(row_at(area, 3, 0, 6), Some(0));
        assert_eq!(row_at(area, 3, 0, 8), Some(2));
        assert_eq!(row_at(area, 3, 0, 9), None);
    }

    #[test]
    fn row_at_ignores_the_bottom_border() {
        let area = Rect::new(0, 0, 80, 5);
        // Border, header, two data rows, border.
        assert_eq!(row_at(area, 10, 0, 3), Some(1));
        assert_eq!(row_at(area, 10, 0, 4), None);
    }

    #[test]
    fn scrolled_table_maps_clicks_to_the_drawn_rows() {
        let mut store = CargoStore::default();
        for _ in 0..10 {
            store.add(new_cargo(CargoType::Maritime, "2024-01-05", "2024-01-10"));
        }
        let page_size = PageSize::new(10).expect("positive");
        // Room for three data rows; selecting the last one scrolls the table.
        let (rendered, offset) = render_sized(&store, "", page_size, 9, 6);
        assert_eq!(offset, 7);
        assert!(rendered.contains("M001"));
        assert!(!rendered.contains("M010"));

        let area = Rect::new(0, 0, 100, 6);
        // First drawn data row is page row 7 (M003).
        assert_eq!(row_at(area, 10, offset, 2), Some(7));
        assert_eq!(row_at(area, 10, offset, 4), Some(9));
        assert_eq!(row_at(area, 10, offset, 5), None);
    }
}
