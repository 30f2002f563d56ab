//! Cargo identifier newtype and per-type sequential generator.
//!
//! Identifiers are a one-letter type prefix followed by a zero-padded
//! sequence number (`M001`, `T012`, `A123`). Raw constructors are never
//! exported - use `IdGenerator::next` or `CargoId::parse`.

use crate::model::cargo::CargoType;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Minimum number of digits in the numeric part of an identifier.
const SEQUENCE_WIDTH: usize = 3;

/// Unique identifier for a cargo record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CargoId(String);

impl CargoId {
    /// Build an identifier from its type and sequence number.
    fn from_parts(cargo_type: CargoType, sequence: u32) -> Self {
        Self(format!(
            "{}{:0width$}",
            cargo_type.prefix(),
            sequence,
            width = SEQUENCE_WIDTH
        ))
    }

    /// Smart constructor: validates prefix letter and numeric suffix.
    ///
    /// Accepts exactly what `IdGenerator` produces: a known uppercase type
    /// prefix followed by at least three ASCII digits.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, InvalidCargoId> {
        let raw = raw.as_ref().trim();
        let mut chars = raw.chars();
        let prefix = chars.next().ok_or(InvalidCargoId::Empty)?;

        if CargoType::from_prefix(prefix).is_none() {
            return Err(InvalidCargoId::UnknownPrefix(prefix));
        }

        let digits = chars.as_str();
        if digits.len() < SEQUENCE_WIDTH || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidCargoId::BadSequence(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    /// The cargo type encoded in the prefix letter.
    pub fn cargo_type(&self) -> CargoType {
        self.0
            .chars()
            .next()
            .and_then(CargoType::from_prefix)
            .unwrap_or(CargoType::Maritime)
    }

    /// Numeric part of the identifier.
    pub fn sequence(&self) -> u32 {
        self.0[1..].parse().unwrap_or(0)
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CargoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-type sequential identifier generator.
///
/// Counters only ever increase. Deleting a record never hands its
/// identifier out again.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counters: HashMap<CargoType, u32>,
}

impl IdGenerator {
    /// Create a generator with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier for `cargo_type`.
    pub fn next(&mut self, cargo_type: CargoType) -> CargoId {
        let counter = self.counters.entry(cargo_type).or_insert(0);
        *counter += 1;
        CargoId::from_parts(cargo_type, *counter)
    }
}

// ===== Error Types =====

/// Reasons a string is not a valid cargo identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCargoId {
    /// Empty input.
    #[error("Cargo ID cannot be empty")]
    Empty,
    /// First letter does not name a cargo type.
    #[error("Unknown cargo type prefix '{0}'")]
    UnknownPrefix(char),
    /// Suffix is not a zero-padded number.
    #[error("Malformed cargo ID sequence: {0}")]
    BadSequence(String),
}

// ===== Tests =====
