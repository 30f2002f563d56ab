//! Add-product form.

use super::{FieldOrder, TextField};
use crate::model::{CargoId, Product, ValidationError, ValidationErrors};

/// Focusable fields of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    /// Product name.
    Label,
    /// Weight in kg.
    Weight,
    /// Category.
    Category,
    /// Toxicity level.
    Toxicity,
}

impl FieldOrder for ProductField {
    const ORDER: &'static [Self] = &[
        ProductField::Label,
        ProductField::Weight,
        ProductField::Category,
        ProductField::Toxicity,
    ];
}

/// Product input targeting one cargo.
#[derive(Debug, Clone)]
pub struct ProductForm {
    target: CargoId,
    /// Product name text.
    pub label: TextField,
    /// Weight text.
    pub weight: TextField,
    /// Category text.
    pub category: TextField,
    /// Toxicity text.
    pub toxicity: TextField,
    /// Focused field.
    pub focus: ProductField,
}

impl ProductForm {
    /// Empty form for loading into `target`.
    pub fn new(target: CargoId) -> Self {
        Self {
            target,
            label: TextField::default(),
            weight: TextField::default(),
            category: TextField::default(),
            toxicity: TextField::default(),
            focus: ProductField::Label,
        }
    }

    /// Cargo the product goes into.
    pub fn target(&self) -> &CargoId {
        &self.target
    }

    /// Text field under focus.
    pub fn focused_text(&mut self) -> &mut TextField {
        match self.focus {
            ProductField::Label => &mut self.label,
            ProductField::Weight => &mut self.weight,
            ProductField::Category => &mut self.category,
            ProductField::Toxicity => &mut self.toxicity,
        }
    }

    /// Validate and build the product.
    ///
    /// Category and toxicity are free text and may be blank.
    ///
    /// # Errors
    ///
    /// Blank label and/or a weight that is not a positive number.
    pub fn validate(&self) -> Result<Product, ValidationErrors> {
        let mut errors = Vec::new();

        let label = self.label.value().trim();
        if label.is_empty() {
            errors.push(ValidationError::MissingProductLabel);
        }

        let weight_kg = self
            .weight
            .value()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|kg| kg.is_finite() && *kg > 0.0);
        if weight_kg.is_none() {
            errors.push(ValidationError::NonPositiveWeight);
        }

        if let Some(errors) = ValidationErrors::from_vec(errors) {
            return Err(errors);
        }

        Ok(Product {
            label: label.to_string(),
            weight_kg: weight_kg.unwrap_or_default(),
            category: self.category.value().trim().to_string(),
            toxicity: self.toxicity.value().trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(label: &str, weight: &str) -> ProductForm {
        let mut form = ProductForm::new(CargoId::parse("M001").expect("valid id"));
        form.label = TextField::with_value(label);
        form.weight = TextField::with_value(weight);
        form
    }

    #[test]
    fn valid_product() {
        let mut form = form(" Rice ", "1200");
        form.category = TextField::with_value("food");
        let product = form.validate().expect("valid");
        assert_eq!(product.label, "Rice");
        assert_eq!(product.weight_kg, 1200.0);
        assert_eq!(product.category, "food");
        assert_eq!(product.toxicity, "");
    }

    #[test]
    fn blank_label_and_bad_weight_are_reported_together() {
        let errors = form("", "-3").validate().expect_err("invalid");
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::MissingProductLabel,
                ValidationError::NonPositiveWeight
            ]
        );
    }

    #[test]
    fn zero_weight_is_rejected() {
        assert!(form("Sand", "0").validate().is_err());
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = form("", "");
        for _ in 0..ProductField::ORDER.len() {
            form.focus = form.focus.next();
        }
        assert_eq!(form.focus, ProductField::Label);
        assert_eq!(form.target().as_str(), "M001");
    }
}
