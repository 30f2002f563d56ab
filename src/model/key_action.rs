//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Text entry inside forms and the search box bypasses this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row selection
    /// Move the row cursor down within the current page. Default: j/↓
    SelectNextRow,
    /// Move the row cursor up within the current page. Default: k/↑
    SelectPrevRow,

    // Pagination
    /// Show the next page. Default: ]/→
    NextPage,
    /// Show the previous page. Default: [/←
    PrevPage,
    /// Jump to a page by number (1-9). Default: 1..9
    SelectPage(usize),

    // Search
    /// Focus the search box. Default: //Ctrl+f
    StartSearch,
    /// Clear the search and show every record. Default: Esc
    CancelSearch,

    // Row actions
    /// Open the add-cargo form. Default: a
    AddCargo,
    /// Open the edit form for the selected row. Default: e
    EditCargo,
    /// Show the details of the selected row. Default: v/Enter
    ViewDetails,
    /// Delete the selected row. Default: x/Delete
    DeleteCargo,
    /// Load a product into the selected row. Default: p
    AddProduct,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}
