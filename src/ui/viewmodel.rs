//! Render-ready snapshots of application state.
//!
//! `AppState::compute_viewmodel` flattens the state into these types: strings
//! are already formatted, selection is already windowed, and highlight ranges are
//! already computed. Components only lay them out.

use crate::app::modes::FilterField;

/// Width of one grid card in columns.
pub const CARD_WIDTH: usize = 28;
/// Horizontal gap between grid cards.
pub const CARD_GAP: usize = 2;
/// Lines per grid card, not counting the blank line below it.
pub const CARD_HEIGHT: usize = 4;

/// Number of cards that fit side by side in `cols` columns (at least one).
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let usable = cols.saturating_sub(2) + CARD_GAP;
    let fit = usable / (CARD_WIDTH + CARD_GAP);
    if fit == 0 {
        1
    } else {
        fit
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub footer: FooterInfo,
    pub body: Body,
    /// Shown while searching or while a query is active.
    pub search_bar: Option<SearchBarInfo>,
    /// Results page only.
    pub category_bar: Option<CategoryBar>,
    /// Drawn over the body.
    pub filters_panel: Option<FiltersPanel>,
    /// Drawn over everything else.
    pub modal: Option<BookDetail>,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Landing(LandingInfo),
    /// Loading, empty, and error states.
    Message(EmptyState),
    List(Vec<DisplayItem>),
    Grid {
        items: Vec<DisplayItem>,
        columns: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Left side of the status line, e.g. "Showing 12 results".
    pub status: String,
    /// Right side of the status line: sort, layout, and theme.
    pub controls: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingInfo {
    pub title: String,
    pub tagline: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    pub is_error: bool,
}

/// One book as a table row or grid card.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub title: String,
    pub author: String,
    /// Empty when unknown.
    pub year: String,
    pub genre: String,
    /// Numeric rating or `"N/A"`.
    pub rating: String,
    pub stars: String,
    pub price: String,
    pub is_selected: bool,
    /// Search matches in `title`, as `(start, end)` character indices.
    pub title_ranges: Vec<(usize, usize)>,
    /// Search matches in `author`.
    pub author_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBar {
    /// "All Categories" followed by one label per category.
    pub labels: Vec<String>,
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiltersPanel {
    pub genre: String,
    pub year: String,
    pub focus: FilterField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub title: String,
    pub author_line: String,
    pub stars: String,
    pub rating: String,
    /// Label/value pairs for the fields the record has.
    pub metadata: Vec<(String, String)>,
    pub description: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fits_whole_cards_only() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(29), 1);
        assert_eq!(grid_columns(60), 2);
        assert_eq!(grid_columns(120), 4);
    }
}
