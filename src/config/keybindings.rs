//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions in table mode.
///
/// Forms and the search box take raw key input and bypass this table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Row selection
        keys.bind(KeyCode::Char('j'), none, KeyAction::SelectNextRow);
        keys.bind(KeyCode::Down, none, KeyAction::SelectNextRow);
        keys.bind(KeyCode::Char('k'), none, KeyAction::SelectPrevRow);
        keys.bind(KeyCode::Up, none, KeyAction::SelectPrevRow);

        // Pagination
        keys.bind(KeyCode::Char(']'), none, KeyAction::NextPage);
        keys.bind(KeyCode::Right, none, KeyAction::NextPage);
        keys.bind(KeyCode::PageDown, none, KeyAction::NextPage);
        keys.bind(KeyCode::Char('['), none, KeyAction::PrevPage);
        keys.bind(KeyCode::Left, none, KeyAction::PrevPage);
        keys.bind(KeyCode::PageUp, none, KeyAction::PrevPage);
        for (digit, page) in ('1'..='9').zip(1..) {
            keys.bind(KeyCode::Char(digit), none, KeyAction::SelectPage(page));
        }

        // Search
        keys.bind(KeyCode::Char('/'), none, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::StartSearch);
        keys.bind(KeyCode::Esc, none, KeyAction::CancelSearch);

        // Row actions
        keys.bind(KeyCode::Char('a'), none, KeyAction::AddCargo);
        keys.bind(KeyCode::Char('e'), none, KeyAction::EditCargo);
        keys.bind(KeyCode::Char('v'), none, KeyAction::ViewDetails);
        keys.bind(KeyCode::Enter, none, KeyAction::ViewDetails);
        keys.bind(KeyCode::Char('x'), none, KeyAction::DeleteCargo);
        keys.bind(KeyCode::Delete, none, KeyAction::DeleteCargo);
        keys.bind(KeyCode::Char('p'), none, KeyAction::AddProduct);

        // Application controls
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);

        keys
    }
}
