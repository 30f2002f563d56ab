//! Colors and text styles for the cargo table, pagination bar and modals.

use crate::model::{Aggregation, Cargo, CargoState};
use crate::state::StatusKind;
use ratatui::style::{Color, Modifier, Style};

/// Muted text for hints.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Section headers in the help overlay and details modal.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Field labels in forms and details.
pub const LABEL_TEXT: Style = Style::new().fg(Color::Gray);

/// Field values in forms and details.
pub const VALUE_TEXT: Style = Style::new().fg(Color::White);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TableStyles =====

/// Styles for the main screen.
///
/// With colors disabled, selection and the active page control fall back
/// to reverse video so they stay visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyles {
    header: Style,
    selected_row: Style,
    closed_row: Style,
    dispatch_row: Style,
    page_control: Style,
    active_page_control: Style,
    info: Style,
    alert: Style,
    focused_field: Style,
}

impl TableStyles {
    /// Default color scheme, honouring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let reverse = Style::default().add_modifier(Modifier::REVERSED);
        if config.colors_enabled() {
            Self {
                header: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                selected_row: Style::default().bg(Color::DarkGray),
                closed_row: Style::default().fg(Color::Red),
                dispatch_row: Style::default().fg(Color::Green),
                page_control: Style::default().fg(Color::Gray),
                active_page_control: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                info: Style::default().fg(Color::Green),
                alert: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                focused_field: Style::default().fg(Color::Yellow),
            }
        } else {
            Self {
                header: Style::default().add_modifier(Modifier::BOLD),
                selected_row: reverse,
                closed_row: Style::default(),
                dispatch_row: Style::default(),
                page_control: Style::default(),
                active_page_control: reverse,
                info: Style::default(),
                alert: Style::default().add_modifier(Modifier::BOLD),
                focused_field: Style::default().add_modifier(Modifier::UNDERLINED),
            }
        }
    }

    /// Column header row.
    pub fn header(&self) -> Style {
        self.header
    }

    /// Row under the cursor.
    pub fn selected_row(&self) -> Style {
        self.selected_row
    }

    /// Row style reflecting the cargo's lifecycle.
    pub fn row(&self, cargo: &Cargo) -> Style {
        match (cargo.state(), cargo.aggregation()) {
            (CargoState::Closed, _) => self.closed_row,
            (CargoState::Open, Aggregation::AwaitingDispatch) => self.dispatch_row,
            (CargoState::Open, Aggregation::Pending) => Style::default(),
        }
    }

    /// A pagination button.
    pub fn page_control(&self, active: bool) -> Style {
        if active {
            self.active_page_control
        } else {
            self.page_control
        }
    }

    /// Status line message.
    pub fn status(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => self.info,
            StatusKind::Alert => self.alert,
        }
    }

    /// Label of the focused form field.
    pub fn focused_field(&self) -> Style {
        self.focused_field
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
