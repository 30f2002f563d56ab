//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the search input widget in lines (border + text).
///
/// Always reserved so the table does not jump when the box opens.
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the pagination bar in lines (border + buttons).
pub const PAGINATION_BAR_HEIGHT: u16 = 3;

/// Height of the status line in lines.
///
/// Single line for the last info/alert message and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Column widths of the cargo table, in `ROW_HEADERS` order.
pub const TABLE_COLUMN_WIDTHS: [u16; 7] = [6, 12, 11, 11, 13, 8, 20];

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for form and details popups.
pub const FORM_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for form and details popups.
pub const FORM_POPUP_HEIGHT_PERCENT: u16 = 70;
