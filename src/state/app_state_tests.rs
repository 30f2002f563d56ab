//! Tests for AppState.
//!
//! These tests verify pure state transitions without any TUI dependencies.

use super::*;
use crate::model::fixtures::new_cargo;
use crate::model::{CargoType, GeoPoint};

// ===== Test Helpers =====

fn with_records(count: usize) -> AppState {
    let mut state = AppState::default();
    for _ in 0..count {
        state
            .store_mut()
            .add(new_cargo(CargoType::Terrestrial, "2024-01-05", "2024-01-10"));
    }
    state
}

// ===== Settings =====

#[test]
fn settings_follow_resolved_config() {
    let mut config = ResolvedConfig::default();
    config.page_size = PageSize::new(5).expect("positive");
    config.search_min_chars = 2;
    config.reject_past_departure = true;
    config.geocoding.enabled = false;

    let settings = Settings::from(&config);
    assert_eq!(settings.page_size.get(), 5);
    assert_eq!(settings.search_min_chars, 2);
    assert!(settings.reject_past_departure);
    assert!(!settings.geocoding);

    let state = AppState::new(settings);
    assert_eq!(state.table.page_size().get(), 5);
}

// ===== Selection =====

#[test]
fn empty_state_has_no_selection() {
    let state = AppState::default();
    assert!(state.selected_cargo().is_none());
    assert!(state.selected_id().is_none());
    assert!(!state.modal.is_open());
}

#[test]
fn clamp_selection_after_shrinking_last_page() {
    let mut state = with_records(5);
    assert!(state.activate_page(PageNumber::clamped(2)));
    state.selected_row = 1;

    // Page 2 had T002 T001; dropping both leaves a single page.
    for id in ["T001", "T002"] {
        let id = CargoId::parse(id).expect("valid id");
        state.store_mut().remove(&id).expect("known id");
    }
    state.clamp_selection();

    assert_eq!(state.table.current_page().get(), 1);
    assert_eq!(state.selected_row, 1);
    assert_eq!(state.selected_id().map(|id| id.to_string()), Some("T004".into()));
}

#[test]
fn prev_page_on_first_page_is_refused() {
    let mut state = with_records(4);
    assert!(!state.prev_page());
    assert!(state.next_page());
    assert!(!state.next_page());
    assert!(state.prev_page());
}

#[test]
fn page_moves_return_the_row_cursor_to_the_top() {
    let mut state = with_records(7);
    state.selected_row = 2;
    assert!(state.next_page());
    assert_eq!(state.table.current_page().get(), 2);
    assert_eq!(state.selected_row, 0);

    state.selected_row = 1;
    assert!(state.prev_page());
    assert_eq!(state.table.current_page().get(), 1);
    assert_eq!(state.selected_row, 0);
}

#[test]
fn refused_page_move_keeps_the_row_cursor() {
    let mut state = with_records(2);
    state.selected_row = 1;
    assert!(!state.next_page());
    assert!(!state.prev_page());
    assert_eq!(state.selected_row, 1);
}

// ===== Status line =====

#[test]
fn latest_message_wins() {
    let mut state = AppState::default();
    state.info("saved");
    state.alert("broken");
    assert_eq!(
        state.status,
        Some(StatusLine {
            kind: StatusKind::Alert,
            text: "broken".into()
        })
    );
}

// ===== Geocode plumbing =====

#[test]
fn take_geocode_requests_empties_the_outbox() {
    let mut state = AppState::default();
    let point = GeoPoint::new(10.0, 20.0).expect("valid point");
    crate::state::map_click(&mut state, point);

    assert_eq!(state.take_geocode_requests().len(), 1);
    assert!(state.take_geocode_requests().is_empty());
}

#[test]
fn failed_lookup_keeps_coordinate_label() {
    let mut state = AppState::default();
    let point = GeoPoint::new(10.0, 20.0).expect("valid point");
    crate::state::map_click(&mut state, point);
    let request = state.take_geocode_requests().remove(0);

    state.apply_geocode_result(GeocodeResult {
        round: request.round,
        endpoint: request.endpoint,
        label: "10.00000, 20.00000".into(),
        resolved: false,
    });

    let departure = state.map.departure().expect("departure set");
    assert_eq!(departure.label, "10.00000, 20.00000");
    assert!(!departure.resolved);
}
