//! Edit-cargo form.

use super::{parse_date, FieldOrder, TextField};
use crate::model::{
    Cargo, CargoId, CargoPatch, CargoState, CargoType, ValidationError, ValidationErrors,
    DATE_FORMAT,
};

/// Focusable fields of the edit form. Id and type are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// Departure date.
    Departure,
    /// Arrival date.
    Arrival,
    /// Open/closed state.
    State,
    /// Free-text status.
    Status,
}

impl FieldOrder for EditField {
    const ORDER: &'static [Self] = &[
        EditField::Departure,
        EditField::Arrival,
        EditField::State,
        EditField::Status,
    ];
}

/// Edit form pre-filled from an existing record.
#[derive(Debug, Clone)]
pub struct EditCargoForm {
    id: CargoId,
    cargo_type: CargoType,
    /// Departure date text.
    pub departure: TextField,
    /// Arrival date text.
    pub arrival: TextField,
    /// State text (`open` / `closed`).
    pub state: TextField,
    /// Status text.
    pub status: TextField,
    /// Focused field.
    pub focus: EditField,
}

impl EditCargoForm {
    /// Form holding `cargo`'s current values.
    pub fn from_cargo(cargo: &Cargo) -> Self {
        Self {
            id: cargo.id().clone(),
            cargo_type: cargo.cargo_type(),
            departure: TextField::with_value(cargo.departure().format(DATE_FORMAT).to_string()),
            arrival: TextField::with_value(cargo.arrival().format(DATE_FORMAT).to_string()),
            state: TextField::with_value(cargo.state().label()),
            status: TextField::with_value(cargo.status()),
            focus: EditField::Departure,
        }
    }

    /// Record being edited.
    pub fn id(&self) -> &CargoId {
        &self.id
    }

    /// Its type, shown read-only.
    pub fn cargo_type(&self) -> CargoType {
        self.cargo_type
    }

    /// Text field under focus.
    pub fn focused_text(&mut self) -> &mut TextField {
        match self.focus {
            EditField::Departure => &mut self.departure,
            EditField::Arrival => &mut self.arrival,
            EditField::State => &mut self.state,
            EditField::Status => &mut self.status,
        }
    }

    /// Flip the state field between open and closed.
    ///
    /// Unrecognised text becomes `open`.
    pub fn toggle_state(&mut self) {
        let next = CargoState::parse(self.state.value())
            .map_or(CargoState::Open, CargoState::toggled);
        self.state = TextField::with_value(next.label());
    }

    /// Validate every field and build the patch.
    ///
    /// # Errors
    ///
    /// Every rejected field, in form order.
    pub fn validate(&self) -> Result<CargoPatch, ValidationErrors> {
        let mut errors = Vec::new();

        let departure = parse_date(self.departure.value());
        let arrival = parse_date(self.arrival.value());
        match (departure, arrival) {
            (Some(d), Some(a)) if d >= a => errors.push(ValidationError::DepartureNotBeforeArrival),
            (Some(_), Some(_)) => {}
            _ => errors.push(ValidationError::InvalidDates),
        }

        let state = CargoState::parse(self.state.value());
        if state.is_none() {
            errors.push(ValidationError::UnknownState(self.state.value().trim().to_string()));
        }

        let status = self.status.value().trim();
        if status.is_empty() {
            errors.push(ValidationError::EmptyStatus);
        }

        if let Some(errors) = ValidationErrors::from_vec(errors) {
            return Err(errors);
        }

        Ok(CargoPatch {
            departure,
            arrival,
            state,
            status: Some(status.to_string()),
        })
    }
}
