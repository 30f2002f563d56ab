//! Form state and validation (pure).
//!
//! Each form holds raw text exactly as typed and turns it into a domain
//! value only on submit, returning every rejected field at once. Nothing
//! here touches the store or the terminal.

mod add_cargo;
mod edit_cargo;
mod product;

pub use add_cargo::{AddCargoForm, AddField, CriterionKind};
pub use edit_cargo::{EditCargoForm, EditField};
pub use product::{ProductField, ProductForm};

use chrono::NaiveDate;
use crate::model::DATE_FORMAT;

// ===== TextField =====

/// Single-line editable text with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in characters (0..=char count).
    cursor: usize,
}

impl TextField {
    /// Field pre-filled with `value`, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether the field holds no text.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert `c` at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    /// Cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Parse a `YYYY-MM-DD` field. Surrounding whitespace is ignored.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Cycle through a fixed field order.
pub trait FieldOrder: Copy + PartialEq + 'static {
    /// Every field, in focus order.
    const ORDER: &'static [Self];

    /// Following field, wrapping around.
    fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    /// Preceding field, wrapping around.
    fn prev(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}
