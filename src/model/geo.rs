//! Geographic points and great-circle distance.

use serde::Serialize;
use std::fmt;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in degrees.
///
/// NaN and out-of-range coordinates are rejected at construction so that
/// distance calculations never see them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Smart constructor: latitude in [-90, 90], longitude in [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidPoint> {
        if lat.is_nan() || lng.is_nan() {
            return Err(InvalidPoint::NotANumber);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidPoint::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidPoint::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Parse `"lat, lng"` (comma and/or whitespace separated).
    pub fn parse(raw: &str) -> Result<Self, InvalidPoint> {
        let mut parts = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty());

        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidPoint::Malformed(raw.to_string()));
        };

        let lat = lat
            .parse::<f64>()
            .map_err(|_| InvalidPoint::Malformed(raw.to_string()))?;
        let lng = lng
            .parse::<f64>()
            .map_err(|_| InvalidPoint::Malformed(raw.to_string()))?;

        Self::new(lat, lng)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Label used when no place name is available.
    pub fn coordinate_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Haversine great-circle distance between two points, in kilometers,
/// rounded to two decimal places.
pub fn haversine_km(start: GeoPoint, end: GeoPoint) -> f64 {
    let d_lat = (end.lat - start.lat).to_radians();
    let d_lng = (end.lng - start.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + start.lat.to_radians().cos() * end.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_to_cents(EARTH_RADIUS_KM * c)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reasons a coordinate pair is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidPoint {
    /// Latitude or longitude is NaN.
    #[error("Coordinates must be numbers")]
    NotANumber,
    /// Latitude outside [-90, 90].
    #[error("Latitude {0} is out of range")]
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180].
    #[error("Longitude {0} is out of range")]
    LongitudeOutOfRange(f64),
    /// Text is not a `lat, lng` pair.
    #[error("Expected \"lat, lng\", got {0:?}")]
    Malformed(String),
}
