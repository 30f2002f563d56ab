//! Keyboard handling and submission for modals and forms.
//!
//! Form keys: Tab / Shift+Tab move between fields, Enter submits (or, on
//! the map click field, drops a point), Space or ←/→ cycle selectors,
//! Esc cancels. The edit form deletes its record with Ctrl+D.

use crate::form::{AddField, EditField, FieldOrder, TextField};
use crate::geocode::GeocodeRequest;
use crate::model::{AppError, CargoId, GeoPoint};
use crate::state::{AppState, Modal};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

/// Handle a key while a modal is open.
///
/// `today` feeds the optional past-departure check. Returns `true` if the
/// key was consumed (always, while a modal is open).
pub fn handle_modal_key(state: &mut AppState, key: KeyEvent, today: NaiveDate) -> bool {
    match &state.modal {
        Modal::None => false,
        Modal::Help | Modal::Details(_) => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
            ) {
                state.modal = Modal::None;
            }
            true
        }
        Modal::ConfirmDelete(id) => {
            let id = id.clone();
            state.modal = Modal::None;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                delete_cargo(state, &id);
            } else {
                state.info("Delete cancelled.");
            }
            true
        }
        Modal::AddCargo(_) => {
            handle_add_key(state, key, today);
            true
        }
        Modal::EditCargo(_) => {
            handle_edit_key(state, key);
            true
        }
        Modal::AddProduct(_) => {
            handle_product_key(state, key);
            true
        }
    }
}

/// Route a text-editing key to `field`. Returns `false` for other keys.
fn edit_text(field: &mut TextField, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        _ => return false,
    }
    true
}

/// Close the current modal. Cancelling the add form discards map picks.
pub fn cancel_modal(state: &mut AppState) {
    if matches!(state.modal, Modal::AddCargo(_)) {
        state.map.reset();
    }
    state.modal = Modal::None;
}

// ===== Add cargo =====

fn handle_add_key(state: &mut AppState, key: KeyEvent, today: NaiveDate) {
    let Modal::AddCargo(form) = &mut state.modal else {
        return;
    };

    match key.code {
        KeyCode::Esc => cancel_modal(state),
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter if form.focus == AddField::MapClick => {
            let raw = form.map_click.value().to_string();
            form.map_click.clear();
            click_map_text(state, &raw);
        }
        KeyCode::Enter => submit_add_cargo(state, today),
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if matches!(form.focus, AddField::Type | AddField::Criterion) =>
        {
            form.cycle_choice();
        }
        _ => {
            if let Some(field) = form.focused_text() {
                edit_text(field, key);
            }
        }
    }
}

/// Parse `"lat, lng"` typed into the map click field and register it.
fn click_map_text(state: &mut AppState, raw: &str) {
    match GeoPoint::parse(raw) {
        Ok(point) => map_click(state, point),
        Err(err) => state.alert(err.to_string()),
    }
}

/// Register a map click: first departure, then arrival.
///
/// Accepted clicks queue a reverse geocoding lookup when enabled. A third
/// click is refused with an alert.
pub fn map_click(state: &mut AppState, point: GeoPoint) {
    match state.map.click(point) {
        Ok(endpoint) => {
            if state.settings().geocoding {
                state.geocode_outbox.push(GeocodeRequest {
                    round: state.map.round(),
                    endpoint,
                    point,
                });
            }
            state.info(format!("{} point set to {}", capitalize(endpoint.name()), point));
        }
        Err(err) => state.alert(err.to_string()),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Validate the add form and store the new cargo.
///
/// On success the form closes, the map selection resets and the table
/// returns to page 1 so the new record (listed first) is visible. On
/// failure the form stays open and the alert lists every rejected field.
pub fn submit_add_cargo(state: &mut AppState, today: NaiveDate) {
    let Modal::AddCargo(form) = &state.modal else {
        return;
    };
    let reject_past = state.settings().reject_past_departure;

    match form.validate(&state.map, today, reject_past) {
        Ok(input) => {
            let id = state.store_mut().add(input).id().clone();
            state.modal = Modal::None;
            state.map.reset();
            state.table.reset_page();
            state.selected_row = 0;
            state.info(format!("Cargo {id} added."));
        }
        Err(errors) => {
            warn!(%errors, "Add cargo rejected");
            state.alert(AppError::from(errors).to_string());
        }
    }
}

// ===== Edit cargo =====

fn handle_edit_key(state: &mut AppState, key: KeyEvent) {
    let Modal::EditCargo(form) = &mut state.modal else {
        return;
    };

    match key.code {
        KeyCode::Esc => cancel_modal(state),
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => submit_edit_cargo(state),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let id = form.id().clone();
            state.modal = Modal::ConfirmDelete(id);
        }
        KeyCode::Char(' ') if form.focus == EditField::State => form.toggle_state(),
        _ => {
            edit_text(form.focused_text(), key);
        }
    }
}

/// Validate the edit form and apply it to its record.
pub fn submit_edit_cargo(state: &mut AppState) {
    let Modal::EditCargo(form) = &state.modal else {
        return;
    };
    let id = form.id().clone();

    let patch = match form.validate() {
        Ok(patch) => patch,
        Err(errors) => {
            warn!(%id, %errors, "Edit rejected");
            state.alert(AppError::from(errors).to_string());
            return;
        }
    };

    state.modal = Modal::None;
    match state.store_mut().update(&id, patch) {
        Ok(_) => state.info(format!("Cargo {id} updated.")),
        Err(err) => state.alert(AppError::from(err).to_string()),
    }
    state.clamp_selection();
}

/// Remove `id` from the store and return the table to page 1.
pub fn delete_cargo(state: &mut AppState, id: &CargoId) {
    match state.store_mut().remove(id) {
        Ok(removed) => {
            info!(id = %removed.id(), "Cargo deleted from UI");
            state.table.reset_page();
            state.selected_row = 0;
            state.info(format!("Cargo {id} deleted."));
        }
        Err(err) => state.alert(AppError::from(err).to_string()),
    }
}

// ===== Add product =====

fn handle_product_key(state: &mut AppState, key: KeyEvent) {
    let Modal::AddProduct(form) = &mut state.modal else {
        return;
    };

    match key.code {
        KeyCode::Esc => cancel_modal(state),
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => submit_product(state),
        _ => {
            edit_text(form.focused_text(), key);
        }
    }
}

/// Validate the product form and load the product into its cargo.
pub fn submit_product(state: &mut AppState) {
    let Modal::AddProduct(form) = &state.modal else {
        return;
    };
    let target = form.target().clone();

    let product = match form.validate() {
        Ok(product) => product,
        Err(errors) => {
            state.alert(AppError::from(errors).to_string());
            return;
        }
    };

    state.modal = Modal::None;
    match state.store_mut().add_product(&target, product) {
        Ok(outcome) if outcome.now_awaiting_dispatch => state.info(format!(
            "Product added to {target}; cargo is now awaiting dispatch."
        )),
        Ok(outcome) => state.info(format!(
            "Product added to {target} ({} loaded).",
            outcome.product_count
        )),
        Err(err) => state.alert(AppError::from(err).to_string()),
    }
}

#[cfg(test)]
#[path = "modal_handler_tests.rs"]
mod tests;
