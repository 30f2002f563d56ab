//! Tests for modal keys and form submission.

use super::*;
use crate::form::{AddCargoForm, EditCargoForm, ProductForm};
use crate::geocode::GeocodeResult;
use crate::map::Endpoint;
use crate::model::fixtures::{date, new_cargo};
use crate::model::{Aggregation, CargoState, CargoType, StopCriterion};
use crate::state::{Settings, StatusKind};
use crate::table::PageNumber;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn today() -> NaiveDate {
    date("2024-01-01")
}

fn press(state: &mut AppState, code: KeyCode) {
    handle_modal_key(state, key(code), today());
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        press(state, KeyCode::Char(c));
    }
}

fn dakar() -> GeoPoint {
    GeoPoint::new(14.7167, -17.4677).expect("valid point")
}

fn marseille() -> GeoPoint {
    GeoPoint::new(43.2965, 5.3698).expect("valid point")
}

fn alert_text(state: &AppState) -> &str {
    match &state.status {
        Some(status) if status.kind == StatusKind::Alert => &status.text,
        other => panic!("alert expected, got {other:?}"),
    }
}

fn info_text(state: &AppState) -> &str {
    match &state.status {
        Some(status) if status.kind == StatusKind::Info => &status.text,
        other => panic!("info expected, got {other:?}"),
    }
}

/// Add form open with both dates filled and no map picks.
fn add_form(departure: &str, arrival: &str) -> AppState {
    let mut state = AppState::default();
    let form = AddCargoForm {
        departure: TextField::with_value(departure),
        arrival: TextField::with_value(arrival),
        ..AddCargoForm::default()
    };
    state.modal = Modal::AddCargo(form);
    state
}

fn with_cargo(cargo_type: CargoType) -> (AppState, CargoId) {
    let mut state = AppState::default();
    let id = state
        .store_mut()
        .add(new_cargo(cargo_type, "2024-01-05", "2024-01-10"))
        .id()
        .clone();
    (state, id)
}

// ===== Passive modals =====

#[test]
fn no_modal_means_key_not_consumed() {
    let mut state = AppState::default();
    assert!(!handle_modal_key(&mut state, key(KeyCode::Esc), today()));
}

#[test]
fn help_closes_on_escape_and_swallows_other_keys() {
    let mut state = AppState::default();
    state.modal = Modal::Help;

    assert!(handle_modal_key(&mut state, key(KeyCode::Char('j')), today()));
    assert!(matches!(state.modal, Modal::Help));

    press(&mut state, KeyCode::Esc);
    assert!(!state.modal.is_open());
}

// ===== Add cargo =====

#[test]
fn reversed_dates_are_rejected_and_nothing_is_stored() {
    let mut state = add_form("2024-01-10", "2024-01-05");
    map_click(&mut state, dakar());
    map_click(&mut state, marseille());

    press(&mut state, KeyCode::Enter);

    assert!(state.store().is_empty());
    assert!(matches!(state.modal, Modal::AddCargo(_)));
    assert_eq!(
        alert_text(&state),
        "Departure date must be before arrival date."
    );
}

#[test]
fn missing_map_points_are_rejected() {
    let mut state = add_form("2024-01-05", "2024-01-10");
    press(&mut state, KeyCode::Enter);

    assert!(state.store().is_empty());
    assert_eq!(
        alert_text(&state),
        "Please select departure and arrival points on the map."
    );
}

#[test]
fn valid_submission_adds_record_and_closes_form() {
    let mut state = add_form("2024-01-05", "2024-01-10");
    map_click(&mut state, dakar());
    map_click(&mut state, marseille());
    state.activate_page(PageNumber::FIRST);

    press(&mut state, KeyCode::Enter);

    assert_eq!(state.store().len(), 1);
    let cargo = &state.store().all()[0];
    assert_eq!(cargo.id().as_str(), "M001");
    assert_eq!(cargo.state(), CargoState::Open);
    assert_eq!(cargo.status(), "pending");
    assert_eq!(cargo.origin_label(), "14.71670, -17.46770");
    assert!(cargo.distance_km() > 4000.0);

    assert!(!state.modal.is_open());
    assert!(state.map.departure().is_none());
    assert_eq!(info_text(&state), "Cargo M001 added.");
}

#[test]
fn type_selector_cycles_with_space() {
    let mut state = add_form("2024-01-05", "2024-01-10");
    press(&mut state, KeyCode::Char(' '));
    map_click(&mut state, dakar());
    map_click(&mut state, marseille());
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.store().all()[0].cargo_type(), CargoType::Aerial);
}

#[test]
fn tab_moves_focus_and_text_goes_to_focused_field() {
    let mut state = AppState::default();
    state.modal = Modal::AddCargo(AddCargoForm::default());

    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "2024-02-01");
    press(&mut state, KeyCode::BackTab);
    type_text(&mut state, "x");

    let Modal::AddCargo(form) = &state.modal else {
        panic!("add form expected");
    };
    assert_eq!(form.focus, AddField::Type);
    assert_eq!(form.departure.value(), "2024-02-01");
}

#[test]
fn stop_criterion_is_stored_on_the_record() {
    let mut state = add_form("2024-01-05", "2024-01-10");
    if let Modal::AddCargo(form) = &mut state.modal {
        form.criterion = crate::form::CriterionKind::MaxProducts;
        form.criterion_value = TextField::with_value("2");
    }
    map_click(&mut state, dakar());
    map_click(&mut state, marseille());
    press(&mut state, KeyCode::Enter);

    assert_eq!(
        state.store().all()[0].stop_criterion(),
        Some(StopCriterion::MaxProducts(2))
    );
}

#[test]
fn past_departure_rejected_only_when_enabled() {
    let mut state = AppState::new(Settings {
        reject_past_departure: true,
        ..Settings::default()
    });
    state.modal = Modal::AddCargo(AddCargoForm {
        departure: TextField::with_value("2023-12-30"),
        arrival: TextField::with_value("2024-01-05"),
        ..AddCargoForm::default()
    });
    map_click(&mut state, dakar());
    map_click(&mut state, marseille());
    press(&mut state, KeyCode::Enter);
    assert_eq!(
        alert_text(&state),
        "Departure date cannot be earlier than today."
    );

    let mut lenient = add_form("2023-12-30", "2024-01-05");
    map_click(&mut lenient, dakar());
    map_click(&mut lenient, marseille());
    press(&mut lenient, KeyCode::Enter);
    assert_eq!(lenient.store().len(), 1);
}

#[test]
fn escape_discards_form_and_map_picks() {
    let mut state = add_form("2024-01-05", "2024-01-10");
    map_click(&mut state, dakar());

    press(&mut state, KeyCode::Esc);

    assert!(!state.modal.is_open());
    assert!(state.map.departure().is_none());
    assert!(state.store().is_empty());
}

// ===== Map clicks =====

#[test]
fn third_map_click_is_refused() {
    let mut state = AppState::default();
    map_click(&mut state, dakar());
    assert_eq!(info_text(&state), "Departure point set to 14.71670, -17.46770");
    map_click(&mut state, marseille());

    map_click(&mut state, GeoPoint::new(0.0, 0.0).expect("valid point"));

    assert_eq!(
        alert_text(&state),
        "Departure and arrival points are already selected."
    );
    let (departure, arrival) = state.map.points().expect("both picked");
    assert_eq!(departure.point, dakar());
    assert_eq!(arrival.point, marseille());
}

#[test]
fn typed_map_click_registers_point() {
    let mut state = AppState::default();
    state.modal = Modal::AddCargo(AddCargoForm {
        focus: AddField::MapClick,
        ..AddCargoForm::default()
    });

    type_text(&mut state, "48.8566, 2.3522");
    press(&mut state, KeyCode::Enter);

    let departure = state.map.departure().expect("departure picked");
    assert_eq!(departure.label, "48.85660, 2.35220");
    let Modal::AddCargo(form) = &state.modal else {
        panic!("add form stays open");
    };
    assert!(form.map_click.is_empty());
}

#[test]
fn malformed_typed_click_alerts() {
    let mut state = AppState::default();
    state.modal = Modal::AddCargo(AddCargoForm {
        focus: AddField::MapClick,
        ..AddCargoForm::default()
    });

    type_text(&mut state, "north");
    press(&mut state, KeyCode::Enter);

    assert!(state.map.departure().is_none());
    assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Alert));
}

#[test]
fn map_clicks_queue_geocode_requests_when_enabled() {
    let mut state = AppState::default();
    map_click(&mut state, dakar());
    map_click(&mut state, marseille());

    let requests = state.take_geocode_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].endpoint, Endpoint::Departure);
    assert_eq!(requests[1].endpoint, Endpoint::Arrival);
    assert!(state.take_geocode_requests().is_empty());
}

#[test]
fn map_clicks_queue_nothing_when_disabled() {
    let mut state = AppState::new(Settings {
        geocoding: false,
        ..Settings::default()
    });
    map_click(&mut state, dakar());
    assert!(state.take_geocode_requests().is_empty());
}

#[test]
fn resolved_label_replaces_coordinates() {
    let mut state = AppState::default();
    map_click(&mut state, dakar());
    let request = state.take_geocode_requests().remove(0);

    state.apply_geocode_result(GeocodeResult {
        round: request.round,
        endpoint: request.endpoint,
        label: "Dakar, Senegal".to_string(),
        resolved: true,
    });

    let departure = state.map.departure().expect("departure picked");
    assert_eq!(departure.label, "Dakar, Senegal");
    assert!(departure.resolved);
}

#[test]
fn stale_geocode_result_is_ignored() {
    let mut state = AppState::default();
    map_click(&mut state, dakar());
    let request = state.take_geocode_requests().remove(0);
    state.map.reset();
    map_click(&mut state, marseille());

    state.apply_geocode_result(GeocodeResult {
        round: request.round,
        endpoint: request.endpoint,
        label: "Dakar, Senegal".to_string(),
        resolved: true,
    });

    let departure = state.map.departure().expect("departure picked");
    assert_eq!(departure.label, "43.29650, 5.36980");
}

// ===== Edit and delete =====

#[test]
fn edit_submission_updates_record() {
    let (mut state, id) = with_cargo(CargoType::Terrestrial);
    let mut form = EditCargoForm::from_cargo(state.store().get(&id).expect("stored"));
    form.status = TextField::with_value("  at the depot ");
    form.focus = crate::form::EditField::State;
    state.modal = Modal::EditCargo(form);

    press(&mut state, KeyCode::Char(' '));
    press(&mut state, KeyCode::Enter);

    let cargo = state.store().get(&id).expect("still stored");
    assert_eq!(cargo.state(), CargoState::Closed);
    assert_eq!(cargo.status(), "at the depot");
    assert_eq!(info_text(&state), "Cargo T001 updated.");
    assert!(!state.modal.is_open());
}

#[test]
fn edit_with_reversed_dates_keeps_form_open() {
    let (mut state, id) = with_cargo(CargoType::Maritime);
    let mut form = EditCargoForm::from_cargo(state.store().get(&id).expect("stored"));
    form.arrival = TextField::with_value("2024-01-01");
    state.modal = Modal::EditCargo(form);

    press(&mut state, KeyCode::Enter);

    assert!(matches!(state.modal, Modal::EditCargo(_)));
    assert_eq!(
        state.store().get(&id).map(|c| c.arrival()),
        Some(date("2024-01-10"))
    );
    assert_eq!(
        alert_text(&state),
        "Departure date must be before arrival date."
    );
}

#[test]
fn ctrl_d_then_confirm_deletes() {
    let (mut state, id) = with_cargo(CargoType::Aerial);
    let form = EditCargoForm::from_cargo(state.store().get(&id).expect("stored"));
    state.modal = Modal::EditCargo(form);

    handle_modal_key(&mut state, ctrl('d'), today());
    assert!(matches!(&state.modal, Modal::ConfirmDelete(target) if *target == id));

    press(&mut state, KeyCode::Char('y'));
    assert!(state.store().is_empty());
    assert_eq!(info_text(&state), "Cargo A001 deleted.");
}

#[test]
fn any_other_key_cancels_delete() {
    let (mut state, id) = with_cargo(CargoType::Aerial);
    state.modal = Modal::ConfirmDelete(id);

    press(&mut state, KeyCode::Char('n'));

    assert_eq!(state.store().len(), 1);
    assert_eq!(info_text(&state), "Delete cancelled.");
}

#[test]
fn deleting_unknown_record_alerts() {
    let mut state = AppState::default();
    let id = CargoId::parse("M042").expect("valid id");

    delete_cargo(&mut state, &id);

    assert_eq!(alert_text(&state), "Record not found: M042");
}

// ===== Products =====

fn product_form(state: &mut AppState, target: &CargoId, label: &str, weight: &str) {
    let mut form = ProductForm::new(target.clone());
    form.label = TextField::with_value(label);
    form.weight = TextField::with_value(weight);
    state.modal = Modal::AddProduct(form);
}

#[test]
fn product_is_loaded_into_target() {
    let (mut state, id) = with_cargo(CargoType::Maritime);
    product_form(&mut state, &id, "Rice", "250");

    press(&mut state, KeyCode::Enter);

    let cargo = state.store().get(&id).expect("stored");
    assert_eq!(cargo.product_count(), 1);
    assert_eq!(cargo.total_weight_kg(), 250.0);
    assert_eq!(info_text(&state), "Product added to M001 (1 loaded).");
}

#[test]
fn weight_threshold_moves_cargo_to_awaiting_dispatch() {
    let (mut state, id) = with_cargo(CargoType::Maritime);
    product_form(&mut state, &id, "Steel", "5000");

    press(&mut state, KeyCode::Enter);

    let cargo = state.store().get(&id).expect("stored");
    assert_eq!(cargo.aggregation(), Aggregation::AwaitingDispatch);
    assert!(!cargo.accepts_products());
    assert_eq!(
        info_text(&state),
        "Product added to M001; cargo is now awaiting dispatch."
    );

    product_form(&mut state, &id, "Wood", "1");
    press(&mut state, KeyCode::Enter);
    assert_eq!(
        alert_text(&state),
        "Cargo M001 is not accepting products (open, awaiting dispatch)"
    );
}

#[test]
fn invalid_product_keeps_form_open() {
    let (mut state, id) = with_cargo(CargoType::Maritime);
    product_form(&mut state, &id, "", "-3");

    press(&mut state, KeyCode::Enter);

    assert!(matches!(state.modal, Modal::AddProduct(_)));
    assert_eq!(state.store().get(&id).map(|c| c.product_count()), Some(0));
}
