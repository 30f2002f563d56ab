//! Pagination control bar.
//!
//! One control per page, labelled with its 1-based number. At most one
//! control is active: exactly one when there is at least one page, none
//! when the filtered set is empty.

use super::{page_count, PageNumber, PageSize};
use ratatui::layout::Rect;

/// Horizontal gap between two controls, in cells.
pub const CONTROL_GAP: u16 = 1;

/// A single page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    /// Page this control activates.
    pub number: PageNumber,
    /// Whether this is the page being shown.
    pub active: bool,
}

impl PageControl {
    /// Text drawn for the control, e.g. `" 3 "`.
    pub fn label(&self) -> String {
        format!(" {} ", self.number)
    }

    /// Width of `label()` in cells.
    pub fn width(&self) -> u16 {
        u16::try_from(self.label().len()).unwrap_or(u16::MAX)
    }
}

/// The ordered set of page controls for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationControls {
    controls: Vec<PageControl>,
}

impl PaginationControls {
    /// Build `ceil(total / page_size)` controls with `current` active.
    ///
    /// If `current` is past the last page, the last page is marked active
    /// instead so the bar never shows zero active controls for a non-empty
    /// set.
    pub fn build(total: usize, page_size: PageSize, current: PageNumber) -> Self {
        let count = page_count(total, page_size);
        let active = current.get().min(count);
        let controls = (1..=count)
            .filter_map(PageNumber::new)
            .map(|number| PageControl {
                number,
                active: number.get() == active,
            })
            .collect();
        Self { controls }
    }

    /// Currently active page, `None` when there are no pages.
    pub fn active(&self) -> Option<PageNumber> {
        self.controls.iter().find(|c| c.active).map(|c| c.number)
    }

    /// Number of active controls (0 or 1).
    pub fn active_count(&self) -> usize {
        self.controls.iter().filter(|c| c.active).count()
    }

    /// Controls in page order.
    pub fn iter(&self) -> impl Iterator<Item = &PageControl> {
        self.controls.iter()
    }

    /// Number of controls (= number of pages).
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether there are no pages at all.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Screen rectangles of each control when drawn left to right from
    /// `area.x`, one row tall. Controls that do not fit are omitted.
    pub fn layout(&self, area: Rect) -> Vec<(PageNumber, Rect)> {
        let mut x = area.x;
        let right = area.x.saturating_add(area.width);
        let mut rects = Vec::with_capacity(self.controls.len());

        for control in &self.controls {
            let width = control.width();
            if x.saturating_add(width) > right {
                break;
            }
            rects.push((control.number, Rect::new(x, area.y, width, 1)));
            x = x.saturating_add(width).saturating_add(CONTROL_GAP);
        }
        rects
    }

    /// Page whose control covers screen cell `(column, row)`, if any.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<PageNumber> {
        self.layout(area)
            .into_iter()
            .find(|(_, rect)| {
                row == rect.y && column >= rect.x && column < rect.x.saturating_add(rect.width)
            })
            .map(|(number, _)| number)
    }
}
