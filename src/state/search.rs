//! Search box state machine and handlers.
//!
//! The table filters live while the query is at least `search_min_chars`
//! long; shorter queries show every record. Enter applies the query
//! immediately whatever its length. Every change of the applied term
//! restarts the table at page 1.

use crate::form::TextField;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};

// ===== SearchState =====

/// Search box state. The applied term lives in the table itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    /// Search box not focused.
    #[default]
    Inactive,
    /// User is typing a query.
    Typing {
        /// Query being typed.
        input: TextField,
    },
}

impl SearchState {
    /// Query text while typing.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Typing { input } => Some(input.value()),
            SearchState::Inactive => None,
        }
    }
}

/// Term the table should filter by while `query` is being typed.
///
/// The query is trimmed the same way a submitted one is. Below `min_chars`
/// characters after trimming the full set is shown.
pub fn live_term(query: &str, min_chars: usize) -> &str {
    let query = query.trim();
    if query.chars().count() >= min_chars {
        query
    } else {
        ""
    }
}

/// Focus the search box, keeping the term already applied.
pub fn activate_search_input(state: &mut AppState) {
    let input = TextField::with_value(state.table.term());
    state.search = SearchState::Typing { input };
}

fn apply_term(state: &mut AppState, term: &str) {
    if state.table.term() != term {
        state.table.set_filter(term);
        state.selected_row = 0;
    }
}

fn refilter_live(state: &mut AppState) {
    let min_chars = state.settings().search_min_chars;
    let term = match &state.search {
        SearchState::Typing { input } => live_term(input.value(), min_chars).to_string(),
        SearchState::Inactive => return,
    };
    apply_term(state, &term);
}

/// Apply the typed query now, regardless of its length, and leave the box.
pub fn submit_search(state: &mut AppState) {
    if let SearchState::Typing { input } = &state.search {
        let term = input.value().trim().to_string();
        apply_term(state, &term);
    }
    state.search = SearchState::Inactive;
}

/// Apply `term` as a submitted search without opening the box.
pub fn apply_search(state: &mut AppState, term: &str) {
    state.search = SearchState::Inactive;
    apply_term(state, term.trim());
}

/// Clear the search and show every record.
pub fn cancel_search(state: &mut AppState) {
    state.search = SearchState::Inactive;
    apply_term(state, "");
}

/// Handle a key while the search box is focused.
///
/// Returns `true` if the key was consumed.
pub fn handle_search_key(state: &mut AppState, key: KeyEvent) -> bool {
    let SearchState::Typing { input } = &mut state.search else {
        return false;
    };

    match key.code {
        KeyCode::Esc => {
            cancel_search(state);
            return true;
        }
        KeyCode::Enter => {
            submit_search(state);
            return true;
        }
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return true,
    }

    refilter_live(state);
    true
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
