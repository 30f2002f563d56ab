//! Modal overlays: add/edit/product forms, record details, delete prompt.

use super::constants::{FORM_POPUP_HEIGHT_PERCENT, FORM_POPUP_WIDTH_PERCENT};
use super::helpers::{centered_rect, empty_line, key_value_line};
use super::styles::{TableStyles, LABEL_TEXT, MUTED_TEXT, SECTION_HEADER, VALUE_TEXT};
use crate::form::{
    AddCargoForm, AddField, CriterionKind, EditCargoForm, EditField, ProductField, ProductForm,
    TextField,
};
use crate::map::{MapSelection, PickedPoint};
use crate::model::{Cargo, CargoId, ProductLimits, DATE_FORMAT};
use crate::state::{AppState, Modal};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the open modal, if any, above everything else.
pub fn render_modal(frame: &mut Frame, state: &AppState, styles: &TableStyles) {
    let (title, lines) = match &state.modal {
        Modal::None | Modal::Help => return,
        Modal::AddCargo(form) => (
            " New cargo ".to_string(),
            add_form_lines(form, &state.map, styles),
        ),
        Modal::EditCargo(form) => (
            format!(" Edit {} ", form.id()),
            edit_form_lines(form, styles),
        ),
        Modal::AddProduct(form) => (
            format!(" Add product to {} ", form.target()),
            product_form_lines(form, styles),
        ),
        Modal::Details(id) => (
            format!(" Cargo {id} "),
            details_lines(state.store().get(id), id, state.store().limits()),
        ),
        Modal::ConfirmDelete(id) => (" Delete ".to_string(), confirm_lines(id)),
    };

    let area = popup_area(frame.area(), &state.modal, lines.len());
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn popup_area(screen: Rect, modal: &Modal, content_lines: usize) -> Rect {
    let area = centered_rect(FORM_POPUP_WIDTH_PERCENT, FORM_POPUP_HEIGHT_PERCENT, screen);
    if matches!(modal, Modal::ConfirmDelete(_)) {
        let height = u16::try_from(content_lines + 2).unwrap_or(u16::MAX).min(area.height);
        let y = screen.y + screen.height.saturating_sub(height) / 2;
        return Rect { y, height, ..area };
    }
    area
}

// ===== Field rendering =====

const LABEL_WIDTH: usize = 16;

fn label_span(label: &str, focused: bool, styles: &TableStyles) -> Span<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let style = if focused { styles.focused_field() } else { LABEL_TEXT };
    Span::styled(format!("{marker}{label:<LABEL_WIDTH$}"), style)
}

/// Text input line; the focused one shows a block cursor.
fn text_line(label: &str, field: &TextField, focused: bool, styles: &TableStyles) -> Line<'static> {
    let mut spans = vec![label_span(label, focused, styles)];
    if focused {
        let before: String = field.value().chars().take(field.cursor()).collect();
        let mut rest = field.value().chars().skip(field.cursor());
        let at = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();
        spans.push(Span::styled(before, VALUE_TEXT));
        spans.push(Span::styled(at, VALUE_TEXT.add_modifier(Modifier::REVERSED)));
        spans.push(Span::styled(after, VALUE_TEXT));
    } else {
        spans.push(Span::styled(field.value().to_string(), VALUE_TEXT));
    }
    Line::from(spans)
}

/// Selector line: `< choice >`.
fn choice_line(label: &str, choice: &str, focused: bool, styles: &TableStyles) -> Line<'static> {
    Line::from(vec![
        label_span(label, focused, styles),
        Span::styled(format!("< {choice} >"), VALUE_TEXT),
    ])
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), MUTED_TEXT))
}

fn point_line(label: &str, picked: Option<&PickedPoint>) -> Line<'static> {
    let value = match picked {
        Some(picked) if picked.resolved => Span::styled(picked.label.clone(), VALUE_TEXT),
        Some(picked) => Span::styled(
            picked.label.clone(),
            VALUE_TEXT.add_modifier(Modifier::ITALIC),
        ),
        None => Span::styled("not selected".to_string(), MUTED_TEXT),
    };
    Line::from(vec![
        Span::styled(format!("  {label:<LABEL_WIDTH$}"), LABEL_TEXT),
        value,
    ])
}

// ===== Add / edit / product =====

fn add_form_lines(
    form: &AddCargoForm,
    map: &MapSelection,
    styles: &TableStyles,
) -> Vec<Line<'static>> {
    let focus = form.focus;
    let mut lines = vec![
        choice_line("Type", form.cargo_type.label(), focus == AddField::Type, styles),
        text_line("Departure date", &form.departure, focus == AddField::Departure, styles),
        text_line("Arrival date", &form.arrival, focus == AddField::Arrival, styles),
        choice_line("Stop criterion", form.criterion.label(), focus == AddField::Criterion, styles),
    ];
    if form.criterion != CriterionKind::None {
        lines.push(text_line(
            "Criterion value",
            &form.criterion_value,
            focus == AddField::CriterionValue,
            styles,
        ));
    }
    lines.extend([
        empty_line(),
        Line::from(Span::styled("Map", SECTION_HEADER)),
        text_line("Click (lat, lng)", &form.map_click, focus == AddField::MapClick, styles),
        point_line("Departure", map.departure()),
        point_line("Arrival", map.arrival()),
        empty_line(),
        hint_line("Dates as YYYY-MM-DD. Tab: next field, Enter: submit, Esc: cancel"),
    ]);
    lines
}

fn edit_form_lines(form: &EditCargoForm, styles: &TableStyles) -> Vec<Line<'static>> {
    let focus = form.focus;
    vec![
        key_value_line("  ID", form.id().to_string()),
        key_value_line("  Type", form.cargo_type().label()),
        empty_line(),
        text_line("Departure date", &form.departure, focus == EditField::Departure, styles),
        text_line("Arrival date", &form.arrival, focus == EditField::Arrival, styles),
        text_line("State", &form.state, focus == EditField::State, styles),
        text_line("Status", &form.status, focus == EditField::Status, styles),
        empty_line(),
        hint_line("Space on State toggles. Enter: save, Ctrl+d: delete, Esc: cancel"),
    ]
}

fn product_form_lines(form: &ProductForm, styles: &TableStyles) -> Vec<Line<'static>> {
    let focus = form.focus;
    vec![
        text_line("Label", &form.label, focus == ProductField::Label, styles),
        text_line("Weight (kg)", &form.weight, focus == ProductField::Weight, styles),
        text_line("Category", &form.category, focus == ProductField::Category, styles),
        text_line("Toxicity", &form.toxicity, focus == ProductField::Toxicity, styles),
        empty_line(),
        hint_line("Enter: add, Esc: cancel"),
    ]
}

// ===== Details / confirm =====

fn details_lines(
    cargo: Option<&Cargo>,
    id: &CargoId,
    defaults: ProductLimits,
) -> Vec<Line<'static>> {
    let Some(cargo) = cargo else {
        return vec![Line::from(Span::styled(
            format!("Record not found: {id}"),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
    };

    let limits = defaults.with_criterion(cargo.stop_criterion());
    let criterion = cargo
        .stop_criterion()
        .map_or_else(|| "default".to_string(), |c| c.to_string());

    let mut lines = vec![
        key_value_line("Type", cargo.cargo_type().label()),
        key_value_line("Departure", cargo.departure().format(DATE_FORMAT).to_string()),
        key_value_line("Arrival", cargo.arrival().format(DATE_FORMAT).to_string()),
        key_value_line("From", format!("{} ({})", cargo.origin_label(), cargo.origin())),
        key_value_line("To", format!("{} ({})", cargo.destination_label(), cargo.destination())),
        key_value_line("Distance", format!("{:.2} km", cargo.distance_km())),
        key_value_line("State", cargo.state().label()),
        key_value_line("Status", cargo.status().to_string()),
        key_value_line("Aggregation", cargo.aggregation().label()),
        key_value_line("Stop criterion", criterion),
        key_value_line(
            "Loaded",
            format!(
                "{}/{} products, {:.2}/{:.2} kg",
                cargo.product_count(),
                limits.max_products,
                cargo.total_weight_kg(),
                limits.max_weight_kg
            ),
        ),
        empty_line(),
        Line::from(Span::styled("Products", SECTION_HEADER)),
    ];

    if cargo.products().is_empty() {
        lines.push(hint_line("  none"));
    }
    for product in cargo.products() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", product.label), VALUE_TEXT),
            Span::styled(
                format!(
                    "{:.2} kg, category {}, toxicity {}",
                    product.weight_kg,
                    or_dash(&product.category),
                    or_dash(&product.toxicity)
                ),
                LABEL_TEXT,
            ),
        ]));
    }
    lines
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn confirm_lines(id: &CargoId) -> Vec<Line<'static>> {
    vec![
        Line::from(format!("Delete cargo {id}?")),
        hint_line("y: delete, any other key: cancel"),
    ]
}
