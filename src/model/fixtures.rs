//! Shared builders for unit tests.

use crate::model::cargo::{CargoType, NewCargo};
use crate::model::geo::GeoPoint;
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` literal.
pub(crate) fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date literal")
}

/// Validated input between Dakar and Marseille.
pub(crate) fn new_cargo(cargo_type: CargoType, departure: &str, arrival: &str) -> NewCargo {
    let origin = GeoPoint::new(14.7167, -17.4677).expect("valid point");
    let destination = GeoPoint::new(43.2965, 5.3698).expect("valid point");
    NewCargo {
        cargo_type,
        departure: date(departure),
        arrival: date(arrival),
        origin,
        destination,
        origin_label: "Dakar".to_string(),
        destination_label: "Marseille".to_string(),
        stop_criterion: None,
    }
}
