//! Application state.
//!
//! AppState is the root state type: it owns the row store for the whole
//! session plus every piece of UI state. Handlers in the sibling modules
//! mutate it in response to one event at a time; rendering only reads it.

use crate::config::ResolvedConfig;
use crate::form::{AddCargoForm, EditCargoForm, ProductForm};
use crate::geocode::{GeocodeRequest, GeocodeResult};
use crate::map::MapSelection;
use crate::model::{cargo_matches, Cargo, CargoId, ProductLimits};
use crate::state::SearchState;
use crate::store::CargoStore;
use crate::table::{PageNumber, PageSize, PagedTable, TableView};

// ===== Modal =====

/// Overlay currently shown above the table. At most one at a time.
#[derive(Debug, Clone, Default)]
pub enum Modal {
    /// Table has focus.
    #[default]
    None,
    /// New cargo form.
    AddCargo(AddCargoForm),
    /// Edit form for one record.
    EditCargo(EditCargoForm),
    /// Product form for one record.
    AddProduct(ProductForm),
    /// Read-only details of one record.
    Details(CargoId),
    /// Delete confirmation for one record.
    ConfirmDelete(CargoId),
    /// Keyboard help.
    Help,
}

impl Modal {
    /// Whether any overlay is shown.
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }
}

// ===== Status line =====

/// Severity of the status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Confirmation of a completed action.
    Info,
    /// Rejected input or failed lookup.
    Alert,
}

/// One-line message under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Severity.
    pub kind: StatusKind,
    /// Text shown.
    pub text: String,
}

// ===== Settings =====

/// Behaviour knobs taken from the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Rows per page.
    pub page_size: PageSize,
    /// Live search threshold in characters.
    pub search_min_chars: usize,
    /// Default product thresholds.
    pub limits: ProductLimits,
    /// Refuse departure dates before today.
    pub reject_past_departure: bool,
    /// Queue reverse geocoding requests for map clicks.
    pub geocoding: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            search_min_chars: 3,
            limits: ProductLimits::default(),
            reject_past_departure: false,
            geocoding: true,
        }
    }
}

impl From<&ResolvedConfig> for Settings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            page_size: config.page_size,
            search_min_chars: config.search_min_chars,
            limits: config.limits,
            reject_past_departure: config.reject_past_departure,
            geocoding: config.geocoding.enabled,
        }
    }
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct AppState {
    store: CargoStore,
    settings: Settings,

    /// Filter + current page of the cargo table.
    pub table: PagedTable<Cargo>,

    /// Search box state.
    pub search: SearchState,

    /// Highlighted row, as an index into the current page.
    pub selected_row: usize,

    /// Overlay above the table.
    pub modal: Modal,

    /// Departure/arrival picks for the add form.
    pub map: MapSelection,

    /// Last message for the user.
    pub status: Option<StatusLine>,

    /// Geocode lookups waiting for the shell to dispatch.
    pub(crate) geocode_outbox: Vec<GeocodeRequest>,

    /// Set by the quit action.
    pub should_quit: bool,
}

impl AppState {
    /// Fresh session with an empty store.
    pub fn new(settings: Settings) -> Self {
        Self {
            store: CargoStore::new(settings.limits),
            settings,
            table: PagedTable::new(settings.page_size, cargo_matches),
            search: SearchState::Inactive,
            selected_row: 0,
            modal: Modal::None,
            map: MapSelection::new(),
            status: None,
            geocode_outbox: Vec::new(),
            should_quit: false,
        }
    }

    /// The row store.
    pub fn store(&self) -> &CargoStore {
        &self.store
    }

    /// Mutable access to the row store.
    pub fn store_mut(&mut self) -> &mut CargoStore {
        &mut self.store
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current page of the table, derived from the store right now.
    pub fn table_view(&self) -> TableView<'_, Cargo> {
        self.table.view(self.store.all())
    }

    /// Record under the row cursor, if the page is non-empty.
    pub fn selected_cargo(&self) -> Option<&Cargo> {
        self.table_view().rows.get(self.selected_row).copied()
    }

    /// Identifier of the record under the row cursor.
    pub fn selected_id(&self) -> Option<CargoId> {
        self.selected_cargo().map(|c| c.id().clone())
    }

    /// Show page `page` if it exists. The row cursor returns to the top.
    pub fn activate_page(&mut self, page: PageNumber) -> bool {
        let moved = self.table.activate(self.store.all(), page);
        self.page_moved(moved)
    }

    /// Show the following page, if any.
    pub fn next_page(&mut self) -> bool {
        let moved = self.table.next_page(self.store.all());
        self.page_moved(moved)
    }

    /// Show the preceding page, if any.
    pub fn prev_page(&mut self) -> bool {
        let moved = self.table.prev_page(self.store.all());
        self.page_moved(moved)
    }

    fn page_moved(&mut self, previous: Option<PageNumber>) -> bool {
        if previous.is_some() {
            self.selected_row = 0;
        }
        previous.is_some()
    }

    /// Keep the row cursor and page inside the current view.
    pub fn clamp_selection(&mut self) {
        self.table.clamp_page(self.store.all());
        let rows = self.table_view().rows.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Show an informational message.
    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    /// Show an alert.
    pub fn alert(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            kind: StatusKind::Alert,
            text: text.into(),
        });
    }

    /// Hand pending geocode requests to the shell.
    pub fn take_geocode_requests(&mut self) -> Vec<GeocodeRequest> {
        std::mem::take(&mut self.geocode_outbox)
    }

    /// Apply a finished lookup. Stale results are ignored, and failed
    /// lookups leave the coordinate label in place.
    pub fn apply_geocode_result(&mut self, result: GeocodeResult) {
        if result.resolved {
            self.map.set_label(result.round, result.endpoint, result.label);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
