//! Pagination bar: one button per page, the current one highlighted.

use super::styles::{TableStyles, MUTED_TEXT};
use crate::table::PaginationControls;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn bar_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Area inside the bar's border where buttons are laid out.
///
/// Mouse hit testing must use the same rectangle as rendering.
pub fn controls_area(area: Rect) -> Rect {
    bar_block().inner(area)
}

/// Render the bar. With no pages only the border and a hint are drawn.
pub fn render_pagination_bar(
    frame: &mut Frame,
    area: Rect,
    controls: &PaginationControls,
    styles: &TableStyles,
) {
    let inner = controls_area(area);
    let title = match controls.active() {
        Some(active) => format!(" Page {active} of {} ", controls.len()),
        None => " Pages ".to_string(),
    };
    frame.render_widget(bar_block().title(title), area);

    if controls.is_empty() {
        frame.render_widget(Paragraph::new(Span::styled("no pages", MUTED_TEXT)), inner);
        return;
    }

    // Buttons past the right edge are not drawn; the title still gives the count.
    for (control, (_, rect)) in controls.iter().zip(controls.layout(inner)) {
        let label = Span::styled(control.label(), styles.page_control(control.active));
        frame.render_widget(Paragraph::new(label), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PageNumber, PageSize};
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(controls: &PaginationControls, width: u16) -> Terminal<TestBackend> {
        let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let mut terminal = Terminal::new(TestBackend::new(width, 3)).expect("test terminal");
        terminal
            .draw(|frame| render_pagination_bar(frame, frame.area(), controls, &styles))
            .expect("draw");
        terminal
    }

    fn page(n: usize) -> PageNumber {
        PageNumber::new(n).expect("non-zero")
    }

    #[test]
    fn seven_rows_render_three_buttons() {
        let controls = PaginationControls::build(7, PageSize::default(), page(2));
        let terminal = draw(&controls, 30);
        insta::assert_snapshot!(terminal.backend(), @r#"
        "┌ Page 2 of 3 ───────────────┐"
        "│ 1   2   3                  │"
        "└────────────────────────────┘"
        "#);
    }

    #[test]
    fn active_button_uses_active_style() {
        let controls = PaginationControls::build(7, PageSize::default(), page(2));
        let terminal = draw(&controls, 30);
        let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let buffer = terminal.backend().buffer();

        // " 2 " starts one gap after " 1 " inside the border.
        let active_cell = buffer.cell((6, 1)).expect("cell in range");
        assert_eq!(active_cell.symbol(), "2");
        assert_eq!(active_cell.modifier, styles.page_control(true).add_modifier);
        let inactive_cell = buffer.cell((2, 1)).expect("cell in range");
        assert_eq!(inactive_cell.symbol(), "1");
        assert_ne!(inactive_cell.modifier, active_cell.modifier);
    }

    #[test]
    fn empty_set_renders_no_buttons() {
        let controls = PaginationControls::build(0, PageSize::default(), PageNumber::FIRST);
        let terminal = draw(&controls, 30);
        let row: String = (1..29)
            .filter_map(|x| terminal.backend().buffer().cell((x, 1)))
            .map(|c| c.symbol().to_string())
            .collect();
        assert_eq!(row.trim(), "no pages");
    }

    #[test]
    fn overflowing_buttons_are_cut_but_title_keeps_count() {
        let controls = PaginationControls::build(60, PageSize::default(), page(3));
        let terminal = draw(&controls, 20);
        let buffer = terminal.backend().buffer();
        let line = |y: u16| -> String {
            (0..20)
                .filter_map(|x| buffer.cell((x, y)))
                .map(|c| c.symbol().to_string())
                .collect()
        };
        assert!(line(0).contains("Page 3 of 20"), "title was {:?}", line(0));
        assert!(line(1).contains(" 4 "));
        assert!(!line(1).contains(" 5 "));
    }

    #[test]
    fn controls_area_is_inside_border() {
        assert_eq!(controls_area(Rect::new(0, 10, 30, 3)), Rect::new(1, 11, 28, 1));
    }
}
