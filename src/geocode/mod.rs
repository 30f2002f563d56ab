//! Reverse geocoding of map clicks.
//!
//! Each accepted map click asks a geocoding service for a place name. The
//! HTTP call runs on a background worker so the UI never blocks; results
//! come back over a channel and are applied on the next tick. Any failure
//! falls back to the coordinate label.

mod worker;

pub use worker::{GeocodeRequest, GeocodeResult, GeocodeWorker};

use crate::config::GeocodingConfig;
use crate::model::GeoPoint;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, warn};

/// Reverse geocoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Connection, timeout or transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("Geocoder answered HTTP {0}")]
    Status(u16),

    /// Body is not the expected JSON.
    #[error("Unreadable geocoder response: {0}")]
    Decode(String),

    /// Valid answer without a place name (e.g. open sea).
    #[error("No place name for this point")]
    NoName,
}

/// Turns coordinates into a human-readable place name.
pub trait ReverseGeocoder: Send {
    /// Place name for `point`.
    ///
    /// # Errors
    ///
    /// Any lookup failure; callers fall back to coordinates.
    fn reverse(&self, point: GeoPoint) -> Result<String, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

/// Extract `display_name` from a Nominatim-style JSON body.
///
/// # Errors
///
/// `Decode` for malformed JSON, `NoName` when the name is missing or blank.
pub fn parse_response(body: &str) -> Result<String, GeocodeError> {
    let response: ReverseResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;
    response
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(GeocodeError::NoName)
}

/// HTTP client for a Nominatim-compatible `/reverse` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Build a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// `GeocodeError::Client` if the TLS backend cannot be initialised.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodeError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn reverse(&self, point: GeoPoint) -> Result<String, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", point.lat().to_string()),
                ("lon", point.lng().to_string()),
            ])
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;
        parse_response(&body)
    }
}

/// Place name for `point`, retrying up to `retries` extra times.
///
/// Returns the label and whether it came from the geocoder. On failure the
/// label is the point's coordinates. Once `cancel` is set no further attempt
/// is made.
pub fn resolve_label(
    geocoder: &dyn ReverseGeocoder,
    point: GeoPoint,
    retries: u32,
    cancel: &AtomicBool,
) -> (String, bool) {
    let mut attempt = 0;
    loop {
        if cancel.load(Ordering::Relaxed) {
            debug!(%point, attempt, "Reverse geocode cancelled");
            return (point.coordinate_label(), false);
        }
        match geocoder.reverse(point) {
            Ok(name) => {
                debug!(%point, attempt, "Reverse geocode succeeded");
                return (name, true);
            }
            // A missing name will not appear on retry.
            Err(GeocodeError::NoName) => {
                debug!(%point, "No place name; using coordinates");
                return (point.coordinate_label(), false);
            }
            Err(err) if attempt < retries => {
                debug!(%point, attempt, error = %err, "Reverse geocode failed, retrying");
                attempt += 1;
            }
            Err(err) => {
                warn!(%point, error = %err, "Reverse geocode failed; using coordinates");
                return (point.coordinate_label(), false);
            }
        }
    }
}
