//! Table-mode keyboard actions: row cursor, pagination, row actions.

use crate::form::{AddCargoForm, EditCargoForm, ProductForm};
use crate::model::KeyAction;
use crate::state::search::{activate_search_input, cancel_search};
use crate::state::{AppState, Modal};
use crate::table::PageNumber;
use tracing::debug;

/// Handle a table-mode action. Modal and search keys are routed elsewhere.
pub fn handle_table_action(state: &mut AppState, action: KeyAction) {
    match action {
        KeyAction::SelectNextRow => {
            let rows = state.table_view().rows.len();
            if state.selected_row + 1 < rows {
                state.selected_row += 1;
            }
        }
        KeyAction::SelectPrevRow => {
            state.selected_row = state.selected_row.saturating_sub(1);
        }
        KeyAction::NextPage => {
            state.next_page();
        }
        KeyAction::PrevPage => {
            state.prev_page();
        }
        KeyAction::SelectPage(number) => {
            if let Some(page) = PageNumber::new(number) {
                state.activate_page(page);
            }
        }
        KeyAction::StartSearch => activate_search_input(state),
        KeyAction::CancelSearch => cancel_search(state),
        KeyAction::AddCargo => {
            state.map.reset();
            state.modal = Modal::AddCargo(AddCargoForm::default());
        }
        KeyAction::EditCargo => {
            if let Some(cargo) = state.selected_cargo() {
                state.modal = Modal::EditCargo(EditCargoForm::from_cargo(cargo));
            }
        }
        KeyAction::ViewDetails => {
            if let Some(id) = state.selected_id() {
                state.modal = Modal::Details(id);
            }
        }
        KeyAction::DeleteCargo => {
            if let Some(id) = state.selected_id() {
                state.modal = Modal::ConfirmDelete(id);
            }
        }
        KeyAction::AddProduct => match state.selected_cargo() {
            Some(cargo) if cargo.accepts_products() => {
                state.modal = Modal::AddProduct(ProductForm::new(cargo.id().clone()));
            }
            Some(cargo) => {
                let message = format!(
                    "Cargo {} is not accepting products ({}, {}).",
                    cargo.id(),
                    cargo.state(),
                    cargo.aggregation().label()
                );
                state.alert(message);
            }
            None => {}
        },
        KeyAction::Help => state.modal = Modal::Help,
        KeyAction::Quit => state.should_quit = true,
    }
    debug!(?action, page = state.table.current_page().get(), "Table action handled");
}

#[cfg(test)]
#[path = "table_handler_tests.rs"]
mod tests;
