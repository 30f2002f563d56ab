//! TUI rendering and terminal management (impure shell)

pub mod cargo_table;
pub mod constants;
mod help;
pub(crate) mod helpers;
pub mod layout;
mod modals;
pub mod pagination_bar;
mod search_input;
mod styles;

pub use help::render_help_overlay;
pub use helpers::{centered_rect, empty_line, key_value_line};
pub use layout::{calculate_areas, render_layout, ScreenAreas};
pub use modals::render_modal;
pub use search_input::SearchInput;
pub use styles::{ColorConfig, TableStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::geocode::{GeocodeWorker, NominatimGeocoder};
use crate::model::{AppError, KeyAction};
use crate::state::{
    apply_search, handle_modal_key, handle_search_key, handle_table_action, AppState, Settings,
};
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Today's date in the local time zone.
fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: TableStyles,
    /// Background reverse geocoder; `None` when disabled or unavailable.
    geocoder: Option<GeocodeWorker>,
    /// Regions of the last rendered frame (for mouse hit testing)
    last_areas: Option<ScreenAreas>,
    /// First page row drawn in the last frame's table.
    last_table_offset: usize,
    today: fn() -> NaiveDate,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and starts the
    /// geocoding worker when enabled.
    pub fn new(config: &ResolvedConfig, color: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let geocoder = if config.geocoding.enabled {
            match NominatimGeocoder::new(&config.geocoding) {
                Ok(client) => Some(GeocodeWorker::spawn(
                    Box::new(client),
                    config.geocoding.retries,
                )),
                Err(err) => {
                    warn!(error = %err, "Geocoder unavailable; map points keep coordinate labels");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            terminal,
            app_state: AppState::new(Settings::from(config)),
            key_bindings: KeyBindings::default(),
            styles: TableStyles::with_color_config(color),
            geocoder,
            last_areas: None,
            last_table_offset: 0,
            today: local_today,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Geocoding results are picked
    /// up on every timer tick.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const TICK_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
                self.pump_geocoder();
                self.draw()?;
            } else if self.pump_geocoder() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C quits from anywhere, forms included.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if handle_modal_key(&mut self.app_state, key, (self.today)()) {
            return false;
        }

        if handle_search_key(&mut self.app_state, key) {
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        handle_table_action(&mut self.app_state, action);
        self.app_state.should_quit
    }

    /// Handle a single mouse event
    ///
    /// Left click on a page button activates that page; left click on a row
    /// selects it. The wheel moves the row cursor. Ignored while a modal is
    /// open.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.app_state.modal.is_open() {
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                handle_table_action(&mut self.app_state, KeyAction::SelectNextRow);
            }
            MouseEventKind::ScrollUp => {
                handle_table_action(&mut self.app_state, KeyAction::SelectPrevRow);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(areas) = self.last_areas {
                    self.handle_click(areas, mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, areas: ScreenAreas, column: u16, row: u16) {
        let (clicked_page, clicked_row) = {
            let view = self.app_state.table_view();
            let controls_area = pagination_bar::controls_area(areas.pagination);
            let page = view.controls.hit_test(controls_area, column, row);
            let table_row = if contains(areas.table, column, row) {
                cargo_table::row_at(areas.table, view.rows.len(), self.last_table_offset, row)
            } else {
                None
            };
            (page, table_row)
        };

        if let Some(page) = clicked_page {
            debug!(page = page.get(), "Page control clicked");
            self.app_state.activate_page(page);
        } else if let Some(index) = clicked_row {
            self.app_state.selected_row = index;
        }
    }

    /// Hand queued lookups to the worker and apply finished ones.
    ///
    /// Returns true if any label changed.
    fn pump_geocoder(&mut self) -> bool {
        let requests = self.app_state.take_geocode_requests();
        let Some(worker) = &self.geocoder else {
            return false;
        };

        for request in requests {
            if !worker.submit(request) {
                warn!(endpoint = request.endpoint.name(), "Geocode worker not running");
            }
        }

        let results = worker.drain();
        let changed = !results.is_empty();
        for result in results {
            self.app_state.apply_geocode_result(result);
        }
        changed
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        self.last_areas = Some(calculate_areas(frame_area));

        let state = &self.app_state;
        let styles = &self.styles;
        let mut table_offset = 0;
        self.terminal.draw(|frame| {
            table_offset = render_layout(frame, state, styles);
        })?;
        self.last_table_offset = table_offset;

        Ok(())
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        geocoder: Option<GeocodeWorker>,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles: TableStyles::with_color_config(ColorConfig::from_env_and_args(true)),
            geocoder,
            last_areas: None,
            last_table_offset: 0,
            today: local_today,
        }
    }

    /// Fix "today" for past-departure checks.
    pub(crate) fn set_today(&mut self, today: fn() -> NaiveDate) {
        self.today = today;
    }

    /// Get reference to app state.
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Get mutable reference to app state.
    pub(crate) fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event.
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Dispatch queued geocode requests and apply whatever has arrived.
    pub(crate) fn pump_geocoder_test(&mut self) -> bool {
        self.pump_geocoder()
    }

    /// Block until the worker answers one request, then apply it.
    pub(crate) fn wait_for_geocode(&mut self, timeout: Duration) -> bool {
        let requests = self.app_state.take_geocode_requests();
        let Some(worker) = &self.geocoder else {
            return false;
        };
        for request in requests {
            worker.submit(request);
        }
        let Some(result) = worker.wait(timeout) else {
            return false;
        };
        self.app_state.apply_geocode_result(result);
        true
    }

    /// Render a single frame.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (for buffer inspection).
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application.
///
/// `initial_search` is applied as a submitted search before the first
/// frame. Logging must be initialized by caller before calling this
/// function. The terminal is restored even when the loop fails.
pub fn run(
    config: &ResolvedConfig,
    initial_search: Option<&str>,
    color: ColorConfig,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, color)?;

    if let Some(term) = initial_search {
        apply_search(&mut app.app_state, term);
    }
    info!(page_size = config.page_size.get(), "TUI started");

    let result = app.run();
    // Hand the terminal back before the geocode worker shuts down.
    let restored = restore_terminal();
    drop(app);

    restored?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
