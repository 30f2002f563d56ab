//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.

use crate::config::KeyBindings;
use crate::geocode::GeocodeWorker;
use crate::model::{CargoType, NewCargo};
use crate::state::{AppState, Settings};
use crate::view::helpers::buffer_to_string;
use crate::view::TuiApp;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Empty store, 80x24 terminal, geocoding off.
    pub fn new() -> Self {
        Self::with_settings(
            Settings {
                geocoding: false,
                ..Settings::default()
            },
            80,
            24,
        )
    }

    /// Empty store with explicit settings and terminal size.
    pub fn with_settings(settings: Settings, width: u16, height: u16) -> Self {
        Self::build(AppState::new(settings), width, height, None)
    }

    /// Harness whose map clicks are resolved by `worker`.
    pub fn with_geocoder(worker: GeocodeWorker) -> Self {
        Self::build(AppState::default(), 80, 24, Some(worker))
    }

    fn build(state: AppState, width: u16, height: u16, geocoder: Option<GeocodeWorker>) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        let app = TuiApp::new_for_test(terminal, state, KeyBindings::default(), geocoder);
        Self { app, running: true }
    }

    /// Insert records straight into the store, bypassing the form.
    pub fn seed(&mut self, records: impl IntoIterator<Item = NewCargo>) {
        for record in records {
            self.app.app_state_mut().store_mut().add(record);
        }
    }

    /// Fix "today" for the past-departure check.
    pub fn set_today(&mut self, today: fn() -> NaiveDate) {
        self.app.set_today(today);
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early if the app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text (sends individual character key events)
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Drive the add form the way a user would: open it, pick the type,
    /// fill both dates, type two map clicks, then submit.
    pub fn add_cargo_via_form(
        &mut self,
        cargo_type: CargoType,
        departure: &str,
        arrival: &str,
        points: [&str; 2],
    ) {
        self.send_key(KeyCode::Char('a'));

        let cycles = CargoType::ALL
            .iter()
            .position(|t| *t == cargo_type)
            .unwrap_or(0);
        for _ in 0..cycles {
            self.send_key(KeyCode::Char(' '));
        }

        self.send_key(KeyCode::Tab);
        self.type_text(departure);
        self.send_key(KeyCode::Tab);
        self.type_text(arrival);

        // Criterion, criterion value, map click.
        self.send_keys(&[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]);
        for point in points {
            self.type_text(point);
            self.send_key(KeyCode::Enter);
        }

        // Enter on the map field drops a point, so submit from the one before.
        self.send_key(KeyCode::BackTab);
        self.send_key(KeyCode::Enter);
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Ids on the current page, top to bottom.
    pub fn page_ids(&self) -> Vec<String> {
        self.state()
            .table_view()
            .rows
            .iter()
            .map(|cargo| cargo.id().to_string())
            .collect()
    }

    /// Text of the status line, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.state().status.as_ref().map(|s| s.text.as_str())
    }

    /// Check if app is still running (didn't crash/quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Wait for one geocode answer and apply it.
    pub fn wait_for_geocode(&mut self, timeout: std::time::Duration) -> bool {
        self.app.wait_for_geocode(timeout)
    }

    /// Render the current frame to a string, one terminal row per line.
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Send a left click at the given cell. Renders first so the layout is known.
    pub fn click_at(&mut self, column: u16, row: u16) {
        if !self.running {
            return;
        }

        let _ = self.app.render_test();
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }
}
