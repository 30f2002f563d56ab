//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod cargo;
pub mod error;
pub mod geo;
pub mod identifiers;
pub mod key_action;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export for convenience
pub use cargo::{
    cargo_matches, Aggregation, Cargo, CargoPatch, CargoState, CargoType, NewCargo, Product,
    ProductLimits, StopCriterion, DATE_FORMAT, DEFAULT_STATUS, ROW_CELL_COUNT, ROW_HEADERS,
};
pub use error::{AppError, StoreError, ValidationError, ValidationErrors};
pub use geo::{haversine_km, GeoPoint, InvalidPoint, EARTH_RADIUS_KM};
pub use identifiers::{CargoId, IdGenerator, InvalidCargoId};
pub use key_action::KeyAction;
