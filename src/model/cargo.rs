//! Cargo records and their lifecycle.
//!
//! A `Cargo` is created from a validated `NewCargo`, mutated only through a
//! `CargoPatch` (dates, state, status) or by loading products, and removed
//! by identifier. Identity and type never change after creation.

use crate::model::geo::{haversine_km, GeoPoint};
use crate::model::identifiers::CargoId;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Date format used in forms and table cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Status label given to freshly created cargos.
pub const DEFAULT_STATUS: &str = "pending";

/// Number of text cells a cargo row exposes to the table.
pub const ROW_CELL_COUNT: usize = 7;

/// Column headers matching `Cargo::cells`.
pub const ROW_HEADERS: [&str; ROW_CELL_COUNT] = [
    "ID",
    "Type",
    "Departure",
    "Arrival",
    "Distance (km)",
    "State",
    "Status",
];

// ===== CargoType =====

/// Transport mode of a cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoType {
    /// Carried by sea.
    Maritime,
    /// Carried by road or rail.
    Terrestrial,
    /// Carried by air.
    Aerial,
}

impl CargoType {
    /// Every cargo type, in form display order.
    pub const ALL: [CargoType; 3] = [
        CargoType::Maritime,
        CargoType::Terrestrial,
        CargoType::Aerial,
    ];

    /// Identifier prefix: the type name's first letter, uppercased.
    pub fn prefix(self) -> char {
        match self {
            CargoType::Maritime => 'M',
            CargoType::Terrestrial => 'T',
            CargoType::Aerial => 'A',
        }
    }

    /// Reverse of `prefix`.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.prefix() == prefix)
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            CargoType::Maritime => "Maritime",
            CargoType::Terrestrial => "Terrestrial",
            CargoType::Aerial => "Aerial",
        }
    }

    /// Next type in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        match self {
            CargoType::Maritime => CargoType::Terrestrial,
            CargoType::Terrestrial => CargoType::Aerial,
            CargoType::Aerial => CargoType::Maritime,
        }
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ===== CargoState =====

/// Open/closed lifecycle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoState {
    /// Cargo can still be edited and loaded.
    #[default]
    Open,
    /// Cargo is closed; no more products are accepted.
    Closed,
}

impl CargoState {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            CargoState::Open => "open",
            CargoState::Closed => "closed",
        }
    }

    /// Parse a state label (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "open" | "ouvert" => Some(CargoState::Open),
            "closed" | "ferme" | "fermé" => Some(CargoState::Closed),
            _ => None,
        }
    }

    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            CargoState::Open => CargoState::Closed,
            CargoState::Closed => CargoState::Open,
        }
    }
}

impl fmt::Display for CargoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ===== Aggregation =====

/// Product aggregation phase. The only transition is
/// `Pending -> AwaitingDispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Accepting new products.
    #[default]
    Pending,
    /// Threshold reached; waiting to leave.
    AwaitingDispatch,
}

impl Aggregation {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Aggregation::Pending => "pending",
            Aggregation::AwaitingDispatch => "awaiting dispatch",
        }
    }
}

// ===== Stop criteria and product limits =====

/// Per-cargo threshold chosen at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCriterion {
    /// Stop accepting products once aggregate weight reaches this many kg.
    MaxWeightKg(f64),
    /// Stop accepting products once this many products are loaded.
    MaxProducts(u32),
}

impl fmt::Display for StopCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCriterion::MaxWeightKg(kg) => write!(f, "max weight {kg} kg"),
            StopCriterion::MaxProducts(n) => write!(f, "max {n} products"),
        }
    }
}

/// Default thresholds applied when a cargo has no stop criterion of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductLimits {
    /// Product count that ends aggregation.
    pub max_products: u32,
    /// Aggregate weight (kg) that ends aggregation.
    pub max_weight_kg: f64,
}

impl Default for ProductLimits {
    fn default() -> Self {
        Self {
            max_products: 10,
            max_weight_kg: 5000.0,
        }
    }
}

impl ProductLimits {
    /// Limits after applying a cargo's own criterion over these defaults.
    pub fn with_criterion(self, criterion: Option<StopCriterion>) -> Self {
        match criterion {
            Some(StopCriterion::MaxWeightKg(kg)) => Self {
                max_weight_kg: kg,
                ..self
            },
            Some(StopCriterion::MaxProducts(n)) => Self {
                max_products: n,
                ..self
            },
            None => self,
        }
    }
}

// ===== Product =====

/// One product loaded into a cargo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Product name.
    pub label: String,
    /// Weight in kg (always positive).
    pub weight_kg: f64,
    /// Free-text category (e.g. "chemical", "food").
    pub category: String,
    /// Free-text toxicity level.
    pub toxicity: String,
}

// ===== NewCargo / CargoPatch =====

/// Validated input for creating a cargo. Produced by the add-cargo form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCargo {
    /// Transport mode.
    pub cargo_type: CargoType,
    /// Departure date (strictly before `arrival`).
    pub departure: NaiveDate,
    /// Arrival date.
    pub arrival: NaiveDate,
    /// Origin point picked on the map.
    pub origin: GeoPoint,
    /// Destination point picked on the map.
    pub destination: GeoPoint,
    /// Place name (or coordinates) of the origin.
    pub origin_label: String,
    /// Place name (or coordinates) of the destination.
    pub destination_label: String,
    /// Optional per-cargo stop criterion.
    pub stop_criterion: Option<StopCriterion>,
}

/// Changes applied by the edit form. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CargoPatch {
    /// New departure date.
    pub departure: Option<NaiveDate>,
    /// New arrival date.
    pub arrival: Option<NaiveDate>,
    /// New open/closed state.
    pub state: Option<CargoState>,
    /// New status label.
    pub status: Option<String>,
}

// ===== Cargo =====

/// A shipment record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cargo {
    id: CargoId,
    cargo_type: CargoType,
    departure: NaiveDate,
    arrival: NaiveDate,
    origin: GeoPoint,
    destination: GeoPoint,
    origin_label: String,
    destination_label: String,
    distance_km: f64,
    state: CargoState,
    status: String,
    aggregation: Aggregation,
    stop_criterion: Option<StopCriterion>,
    products: Vec<Product>,
    total_weight_kg: f64,
    product_count: u32,
}

impl Cargo {
    /// Build a record from validated input and an already allocated id.
    pub(crate) fn new(id: CargoId, input: NewCargo) -> Self {
        let distance_km = haversine_km(input.origin, input.destination);
        Self {
            id,
            cargo_type: input.cargo_type,
            departure: input.departure,
            arrival: input.arrival,
            origin: input.origin,
            destination: input.destination,
            origin_label: input.origin_label,
            destination_label: input.destination_label,
            distance_km,
            state: CargoState::Open,
            status: DEFAULT_STATUS.to_string(),
            aggregation: Aggregation::Pending,
            stop_criterion: input.stop_criterion,
            products: Vec::new(),
            total_weight_kg: 0.0,
            product_count: 0,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> &CargoId {
        &self.id
    }

    /// Transport mode.
    pub fn cargo_type(&self) -> CargoType {
        self.cargo_type
    }

    /// Departure date.
    pub fn departure(&self) -> NaiveDate {
        self.departure
    }

    /// Arrival date.
    pub fn arrival(&self) -> NaiveDate {
        self.arrival
    }

    /// Origin point.
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Destination point.
    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// Origin place name.
    pub fn origin_label(&self) -> &str {
        &self.origin_label
    }

    /// Destination place name.
    pub fn destination_label(&self) -> &str {
        &self.destination_label
    }

    /// Great-circle distance between origin and destination.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Open/closed flag.
    pub fn state(&self) -> CargoState {
        self.state
    }

    /// Free-text workflow label.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Product aggregation phase.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Stop criterion chosen at creation.
    pub fn stop_criterion(&self) -> Option<StopCriterion> {
        self.stop_criterion
    }

    /// Loaded products, in loading order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sum of product weights.
    pub fn total_weight_kg(&self) -> f64 {
        self.total_weight_kg
    }

    /// Number of loaded products.
    pub fn product_count(&self) -> u32 {
        self.product_count
    }

    /// Whether `push_product` would be accepted.
    pub fn accepts_products(&self) -> bool {
        self.state == CargoState::Open && self.aggregation == Aggregation::Pending
    }

    /// Apply an edit. Only dates, state and status are mutable.
    pub(crate) fn apply(&mut self, patch: CargoPatch) {
        if let Some(departure) = patch.departure {
            self.departure = departure;
        }
        if let Some(arrival) = patch.arrival {
            self.arrival = arrival;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Load a product and update aggregates.
    ///
    /// Callers check `accepts_products` first. Returns `true` when this
    /// product moved the cargo to `AwaitingDispatch`.
    pub(crate) fn push_product(&mut self, product: Product, defaults: ProductLimits) -> bool {
        self.total_weight_kg += product.weight_kg;
        self.product_count += 1;
        self.products.push(product);

        let limits = defaults.with_criterion(self.stop_criterion);
        let full = self.product_count >= limits.max_products
            || self.total_weight_kg >= limits.max_weight_kg;

        if full && self.aggregation == Aggregation::Pending {
            self.aggregation = Aggregation::AwaitingDispatch;
            return true;
        }
        false
    }

    /// Text cells shown in the table, in `ROW_HEADERS` order.
    ///
    /// This is the record's text representation: search matches against
    /// exactly these strings.
    pub fn cells(&self) -> [String; ROW_CELL_COUNT] {
        [
            self.id.to_string(),
            self.cargo_type.label().to_string(),
            self.departure.format(DATE_FORMAT).to_string(),
            self.arrival.format(DATE_FORMAT).to_string(),
            format!("{:.2}", self.distance_km),
            self.state.label().to_string(),
            self.status.clone(),
        ]
    }
}

/// Case-insensitive "any visible cell contains `term_lower`" match.
///
/// `term_lower` must already be lowercased.
pub fn cargo_matches(cargo: &Cargo, term_lower: &str) -> bool {
    cargo
        .cells()
        .iter()
        .any(|cell| cell.to_lowercase().contains(term_lower))
}

#[cfg(test)]
#[path = "cargo_tests.rs"]
mod tests;
