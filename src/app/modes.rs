//! Input, page, layout, and load-status state types.
//!
//! These enums decide which keybindings are active and which body the renderer
//! draws:
//! - **Page**: landing screen or the results page
//! - **`InputMode`**: plain navigation, search entry, filters panel, or detail modal
//! - **`LayoutMode`**: card grid or table list
//! - **`LoadStatus`**: progress of the most recent list fetch

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query.
    Typing,
    /// Keystrokes move through the results; `/` returns to typing.
    Navigating,
}

/// Field focused in the advanced filters panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Genre,
    Year,
}

impl FilterField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Genre => Self::Year,
            Self::Year => Self::Genre,
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and single-key commands.
    Normal,
    /// Search bar active.
    Search(SearchFocus),
    /// Advanced filters panel open with the given field focused.
    Filters(FilterField),
    /// Book detail modal open.
    Modal,
}

/// Top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Landing,
    Results,
}

/// How results are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

impl LayoutMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Progress of the latest list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The request failed; the detail is shown dimmed under the error message.
    Failed(String),
}
