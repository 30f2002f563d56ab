//! Add-cargo form.

use super::{parse_date, FieldOrder, TextField};
use crate::map::MapSelection;
use crate::model::{CargoType, NewCargo, StopCriterion, ValidationError, ValidationErrors};
use chrono::NaiveDate;

/// Stop criterion picked in the form, before its value is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CriterionKind {
    /// Use the configured defaults.
    #[default]
    None,
    /// Stop at a maximum aggregate weight.
    MaxWeight,
    /// Stop at a maximum product count.
    MaxProducts,
}

impl CriterionKind {
    /// Label shown in the form.
    pub fn label(self) -> &'static str {
        match self {
            CriterionKind::None => "none",
            CriterionKind::MaxWeight => "max weight (kg)",
            CriterionKind::MaxProducts => "max products",
        }
    }

    /// Following choice, wrapping around.
    pub fn next(self) -> Self {
        match self {
            CriterionKind::None => CriterionKind::MaxWeight,
            CriterionKind::MaxWeight => CriterionKind::MaxProducts,
            CriterionKind::MaxProducts => CriterionKind::None,
        }
    }
}

/// Focusable fields of the add-cargo form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    /// Cargo type selector.
    Type,
    /// Departure date.
    Departure,
    /// Arrival date.
    Arrival,
    /// Stop criterion selector.
    Criterion,
    /// Stop criterion value.
    CriterionValue,
    /// Map click entry (`lat, lng`).
    MapClick,
}

impl FieldOrder for AddField {
    const ORDER: &'static [Self] = &[
        AddField::Type,
        AddField::Departure,
        AddField::Arrival,
        AddField::Criterion,
        AddField::CriterionValue,
        AddField::MapClick,
    ];
}

/// Raw add-cargo input.
///
/// The route points are not part of the form: they come from the map
/// selection passed to `validate`.
#[derive(Debug, Clone)]
pub struct AddCargoForm {
    /// Selected transport mode.
    pub cargo_type: CargoType,
    /// Departure date text.
    pub departure: TextField,
    /// Arrival date text.
    pub arrival: TextField,
    /// Selected stop criterion.
    pub criterion: CriterionKind,
    /// Stop criterion value text.
    pub criterion_value: TextField,
    /// Pending map click text.
    pub map_click: TextField,
    /// Focused field.
    pub focus: AddField,
}

impl Default for AddCargoForm {
    fn default() -> Self {
        Self {
            cargo_type: CargoType::Maritime,
            departure: TextField::default(),
            arrival: TextField::default(),
            criterion: CriterionKind::None,
            criterion_value: TextField::default(),
            map_click: TextField::default(),
            focus: AddField::Type,
        }
    }
}

impl AddCargoForm {
    /// Text field under focus, if the focused field takes text.
    pub fn focused_text(&mut self) -> Option<&mut TextField> {
        match self.focus {
            AddField::Departure => Some(&mut self.departure),
            AddField::Arrival => Some(&mut self.arrival),
            AddField::CriterionValue => Some(&mut self.criterion_value),
            AddField::MapClick => Some(&mut self.map_click),
            AddField::Type | AddField::Criterion => None,
        }
    }

    /// Advance the focused selector (type or criterion) to its next choice.
    pub fn cycle_choice(&mut self) {
        match self.focus {
            AddField::Type => self.cargo_type = self.cargo_type.next(),
            AddField::Criterion => self.criterion = self.criterion.next(),
            _ => {}
        }
    }

    /// Validate every field and build the cargo input.
    ///
    /// `today` and `reject_past` control the optional past-departure check.
    ///
    /// # Errors
    ///
    /// Every rejected field, in form order.
    pub fn validate(
        &self,
        map: &MapSelection,
        today: NaiveDate,
        reject_past: bool,
    ) -> Result<NewCargo, ValidationErrors> {
        let mut errors = Vec::new();

        let dates = match (parse_date(self.departure.value()), parse_date(self.arrival.value())) {
            (Some(departure), Some(arrival)) => {
                if departure >= arrival {
                    errors.push(ValidationError::DepartureNotBeforeArrival);
                } else if reject_past && departure < today {
                    errors.push(ValidationError::DepartureInPast);
                }
                Some((departure, arrival))
            }
            _ => {
                errors.push(ValidationError::InvalidDates);
                None
            }
        };

        let stop_criterion = match self.parse_criterion() {
            Ok(criterion) => criterion,
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let points = map.points();
        if points.is_none() {
            errors.push(ValidationError::MissingMapSelection);
        }

        if let Some(errors) = ValidationErrors::from_vec(errors) {
            return Err(errors);
        }

        match (dates, points) {
            (Some((departure, arrival)), Some((origin, destination))) => Ok(NewCargo {
                cargo_type: self.cargo_type,
                departure,
                arrival,
                origin: origin.point,
                destination: destination.point,
                origin_label: origin.label.clone(),
                destination_label: destination.label.clone(),
                stop_criterion,
            }),
            // Both are Some whenever no error was recorded.
            _ => Err(ValidationError::InvalidDates.into()),
        }
    }

    fn parse_criterion(&self) -> Result<Option<StopCriterion>, ValidationError> {
        let raw = self.criterion_value.value().trim();
        match self.criterion {
            CriterionKind::None => Ok(None),
            CriterionKind::MaxWeight => raw
                .parse::<f64>()
                .ok()
                .filter(|kg| kg.is_finite() && *kg > 0.0)
                .map(|kg| Some(StopCriterion::MaxWeightKg(kg)))
                .ok_or(ValidationError::NonPositiveThreshold),
            CriterionKind::MaxProducts => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| Some(StopCriterion::MaxProducts(n)))
                .ok_or(ValidationError::NonPositiveThreshold),
        }
    }
}
