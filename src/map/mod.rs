//! Map point selection.
//!
//! The map itself is an external collaborator: it only hands over clicked
//! coordinates. `MapSelection` turns those clicks into a departure and an
//! arrival point, refuses a third click, and carries the place labels that
//! reverse geocoding fills in later.

use crate::model::GeoPoint;
use thiserror::Error;
use tracing::{debug, info};

/// Which of the two route points a click or label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// First click.
    Departure,
    /// Second click.
    Arrival,
}

impl Endpoint {
    /// Lowercase name used in labels and logs.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Departure => "departure",
            Endpoint::Arrival => "arrival",
        }
    }
}

/// A clicked point and its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedPoint {
    /// Clicked coordinates.
    pub point: GeoPoint,
    /// Place name, or the coordinates until a name arrives.
    pub label: String,
    /// Whether `label` came from the geocoder.
    pub resolved: bool,
}

impl PickedPoint {
    fn new(point: GeoPoint) -> Self {
        Self {
            point,
            label: point.coordinate_label(),
            resolved: false,
        }
    }
}

/// Refused map interactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// Both points are already set.
    #[error("Departure and arrival points are already selected.")]
    AlreadySelected,
}

/// Identifies one selection round; bumped on every reset so late geocoder
/// answers for a discarded point are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SelectionRound(u64);

/// Two-click departure/arrival state machine.
#[derive(Debug, Clone, Default)]
pub struct MapSelection {
    departure: Option<PickedPoint>,
    arrival: Option<PickedPoint>,
    round: SelectionRound,
}

impl MapSelection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click.
    ///
    /// The first click sets the departure, the second the arrival.
    ///
    /// # Errors
    ///
    /// `MapError::AlreadySelected` when both points are set; the selection
    /// is left unchanged.
    pub fn click(&mut self, point: GeoPoint) -> Result<Endpoint, MapError> {
        let endpoint = match (&self.departure, &self.arrival) {
            (None, _) => {
                self.departure = Some(PickedPoint::new(point));
                Endpoint::Departure
            }
            (Some(_), None) => {
                self.arrival = Some(PickedPoint::new(point));
                Endpoint::Arrival
            }
            (Some(_), Some(_)) => return Err(MapError::AlreadySelected),
        };
        debug!(endpoint = endpoint.name(), %point, "Map point selected");
        Ok(endpoint)
    }

    /// Store a geocoded label for `endpoint`.
    ///
    /// Returns `false` (and changes nothing) when `round` is stale or the
    /// point is no longer set.
    pub fn set_label(
        &mut self,
        round: SelectionRound,
        endpoint: Endpoint,
        label: impl Into<String>,
    ) -> bool {
        if round != self.round {
            debug!(endpoint = endpoint.name(), "Discarding stale geocode label");
            return false;
        }
        let slot = match endpoint {
            Endpoint::Departure => &mut self.departure,
            Endpoint::Arrival => &mut self.arrival,
        };
        match slot {
            Some(picked) => {
                picked.label = label.into();
                picked.resolved = true;
                true
            }
            None => false,
        }
    }

    /// Clear both points and start a new round.
    pub fn reset(&mut self) {
        self.departure = None;
        self.arrival = None;
        self.round = SelectionRound(self.round.0.wrapping_add(1));
        info!("Map selection reset");
    }

    /// Current round, to tag geocode requests with.
    pub fn round(&self) -> SelectionRound {
        self.round
    }

    /// Departure point, if clicked.
    pub fn departure(&self) -> Option<&PickedPoint> {
        self.departure.as_ref()
    }

    /// Arrival point, if clicked.
    pub fn arrival(&self) -> Option<&PickedPoint> {
        self.arrival.as_ref()
    }

    /// Both points, once selected.
    pub fn points(&self) -> Option<(&PickedPoint, &PickedPoint)> {
        self.departure.as_ref().zip(self.arrival.as_ref())
    }

    /// Whether both points are set.
    pub fn is_complete(&self) -> bool {
        self.points().is_some()
    }

    /// Whether the next click would be accepted.
    pub fn accepts_click(&self) -> bool {
        !self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).expect("valid point")
    }

    #[test]
    fn first_click_is_departure_second_is_arrival() {
        let mut map = MapSelection::new();
        assert_eq!(map.click(point(14.7, -17.4)), Ok(Endpoint::Departure));
        assert!(!map.is_complete());
        assert_eq!(map.click(point(43.3, 5.4)), Ok(Endpoint::Arrival));
        assert!(map.is_complete());
    }

    #[test]
    fn third_click_is_refused_and_keeps_points() {
        let mut map = MapSelection::new();
        map.click(point(1.0, 1.0)).expect("departure");
        map.click(point(2.0, 2.0)).expect("arrival");

        let err = map.click(point(3.0, 3.0)).expect_err("third click");
        assert_eq!(
            err.to_string(),
            "Departure and arrival points are already selected."
        );
        assert_eq!(map.arrival().map(|p| p.point), Some(point(2.0, 2.0)));
    }

    #[test]
    fn labels_start_as_coordinates() {
        let mut map = MapSelection::new();
        map.click(point(48.8566, 2.3522)).expect("departure");
        let departure = map.departure().expect("set");
        assert_eq!(departure.label, "48.85660, 2.35220");
        assert!(!departure.resolved);
    }

    #[test]
    fn set_label_fills_current_round() {
        let mut map = MapSelection::new();
        map.click(point(48.8566, 2.3522)).expect("departure");
        assert!(map.set_label(map.round(), Endpoint::Departure, "Paris"));
        assert_eq!(map.departure().map(|p| p.label.as_str()), Some("Paris"));
        assert!(!map.set_label(map.round(), Endpoint::Arrival, "Nowhere"));
    }

    #[test]
    fn reset_clears_points_and_discards_late_labels() {
        let mut map = MapSelection::new();
        map.click(point(1.0, 1.0)).expect("departure");
        let old_round = map.round();
        map.reset();
        assert!(map.departure().is_none());

        map.click(point(5.0, 5.0)).expect("departure");
        assert!(!map.set_label(old_round, Endpoint::Departure, "Stale"));
        assert_eq!(
            map.departure().map(|p| p.label.as_str()),
            Some("5.00000, 5.00000")
        );
        assert!(map.accepts_click());
    }
}
