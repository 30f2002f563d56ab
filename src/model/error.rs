//! Error types for cargotrack.
//!
//! Every failure in this application is a user-input or lookup failure:
//! none of them is fatal to the session. Handlers return these errors and
//! the shell turns them into status-line alerts or inline field messages.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - anything a UI action can fail with
//!   - [`StoreError`] - lookups against the row store (unknown id, closed cargo)
//!   - [`ValidationErrors`] - one or more rejected form fields
//!   - `std::io::Error` - terminal failures (the only fatal kind)

use crate::model::cargo::{Aggregation, CargoState};
use crate::model::identifiers::CargoId;
use std::fmt;
use thiserror::Error;

/// Top-level error for UI actions.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation targeted a missing or locked record.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A form submission was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Terminal or TUI rendering error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures of row store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record carries this identifier.
    #[error("Record not found: {0}")]
    NotFound(CargoId),

    /// The record exists but is closed or already awaiting dispatch.
    #[error("Cargo {id} is not accepting products ({state}, {})", .aggregation.label())]
    NotAcceptingProducts {
        /// Target record.
        id: CargoId,
        /// Its open/closed flag.
        state: CargoState,
        /// Its aggregation phase.
        aggregation: Aggregation,
    },
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One of the dates does not parse as `YYYY-MM-DD`.
    #[error("Please enter valid dates.")]
    InvalidDates,

    /// Departure is on or after arrival.
    #[error("Departure date must be before arrival date.")]
    DepartureNotBeforeArrival,

    /// Departure lies in the past (only when the check is enabled).
    #[error("Departure date cannot be earlier than today.")]
    DepartureInPast,

    /// Departure and/or arrival point was not chosen on the map.
    #[error("Please select departure and arrival points on the map.")]
    MissingMapSelection,

    /// A stop criterion was chosen but its value is not a positive number.
    #[error("The criterion value must be positive.")]
    NonPositiveThreshold,

    /// The edit form's state field is neither open nor closed.
    #[error("State must be \"open\" or \"closed\", got {0:?}.")]
    UnknownState(String),

    /// The edit form's status field is blank.
    #[error("Status cannot be empty.")]
    EmptyStatus,

    /// The product form's label is blank.
    #[error("Product label cannot be empty.")]
    MissingProductLabel,

    /// The product weight is not a positive number.
    #[error("Product weight must be a positive number.")]
    NonPositiveWeight,
}

/// Every rejected field of one submission, in form order.
///
/// Never empty: validators only build this when something failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wrap a non-empty list of errors. Returns `None` for an empty list.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// The first failure, used for single-line alerts.
    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    /// All failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether `error` is among the failures.
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
