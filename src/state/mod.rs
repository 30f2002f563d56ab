//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod modal_handler;
pub mod search;
pub mod table_handler;

// Re-export for convenience
pub use app_state::{AppState, Modal, Settings, StatusKind, StatusLine};
pub use modal_handler::{
    cancel_modal, delete_cargo, handle_modal_key, map_click, submit_add_cargo,
    submit_edit_cargo, submit_product,
};
pub use search::{
    activate_search_input, apply_search, cancel_search, handle_search_key, live_term, submit_search,
    SearchState,
};
pub use table_handler::handle_table_action;
