//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It keeps the
//! fetched collection in fetch order (`books`) apart from the derived, filtered,
//! and sorted `view`, so sorting or filtering never needs a round trip and
//! `Recent` can always return to fetch order.
//!
//! # State Components
//!
//! - **Collection**: `books` as last returned by the backend
//! - **Selections**: search query, category, genre, minimum year, sort key
//! - **Filter queue**: rebuilt from the selections before every fetch
//! - **Requests**: per-kind sequence numbers used to discard stale responses
//! - **Presentation**: page, input mode, layout, theme, selection, viewport
//!
//! # Example
//!
//! ```rust
//! use folio::api::Endpoint;
//! use folio::app::AppState;
//! use folio::ui::theme::{ThemeMode, ThemeSet};
//!
//! let mut state = AppState::new(Endpoint::default(), ThemeSet::default(), ThemeMode::Light);
//! state.search_query = "dune".into();
//! state.rebuild_filter_queue();
//! assert_eq!(state.filter_queue.len(), 1);
//! ```

use super::actions::Action;
use super::debounce::Debounce;
use super::modes::{FilterField, InputMode, LayoutMode, LoadStatus, Page, SearchFocus};
use crate::api::{BookQuery, Endpoint, RequestKind, RequestTag};
use crate::catalog::categories::{category_label, distinct_categories, distinct_genres};
use crate::catalog::search::match_ranges;
use crate::catalog::{sort_books, FilterQueue, Predicate, SortKey};
use crate::domain::Book;
use crate::ui::helpers::star_bar;
use crate::ui::theme::{Theme, ThemeMode, ThemeSet};
use crate::ui::viewmodel::{
    grid_columns, BookDetail, Body, CategoryBar, DisplayItem, EmptyState, FiltersPanel,
    FooterInfo, HeaderInfo, LandingInfo, SearchBarInfo, UIViewModel, CARD_HEIGHT,
};

const ALL_CATEGORIES: &str = "All Categories";
const ANY_GENRE: &str = "Any";

/// Editable copy of the advanced filters while the panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub genre: Option<String>,
    /// Raw digits typed into the year field.
    pub year: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Last fetched collection, in fetch order.
    pub books: Vec<Book>,
    /// `books` after the filter queue and sort key.
    pub view: Vec<Book>,

    pub filter_queue: FilterQueue,
    pub sort_key: SortKey,

    pub search_query: String,
    /// Active category (`type`), `None` for all.
    pub category: Option<String>,
    pub genre: Option<String>,
    pub min_year: Option<i64>,
    pub draft: FilterDraft,

    /// Every category seen so far, in first-seen order.
    pub categories: Vec<String>,
    /// Every genre seen so far, in first-seen order.
    pub genres: Vec<String>,

    pub page: Page,
    pub input_mode: InputMode,
    pub layout: LayoutMode,
    pub status: LoadStatus,
    /// Book shown in the detail modal.
    pub modal: Option<Book>,

    /// Index into `view`.
    pub selected_index: usize,

    pub themes: ThemeSet,
    pub theme_mode: ThemeMode,

    pub endpoint: Endpoint,
    pub debounce: Debounce,

    list_seq: u64,
    detail_seq: u64,

    /// Last rendered `(rows, cols)`, used for grid navigation.
    viewport: (usize, usize),
}

impl AppState {
    #[must_use]
    pub fn new(endpoint: Endpoint, themes: ThemeSet, theme_mode: ThemeMode) -> Self {
        Self {
            books: vec![],
            view: vec![],
            filter_queue: FilterQueue::new(),
            sort_key: SortKey::default(),
            search_query: String::new(),
            category: None,
            genre: None,
            min_year: None,
            draft: FilterDraft::default(),
            categories: vec![],
            genres: vec![],
            page: Page::Landing,
            input_mode: InputMode::Normal,
            layout: LayoutMode::default(),
            status: LoadStatus::Idle,
            modal: None,
            selected_index: 0,
            themes,
            theme_mode,
            endpoint,
            debounce: Debounce::default(),
            list_seq: 0,
            detail_seq: 0,
            viewport: (24, 80),
        }
    }

    /// Active palette.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.themes.get(self.theme_mode)
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    // ---- filters and fetching ----

    /// Clears the filter queue and re-adds one predicate per active selection.
    pub fn rebuild_filter_queue(&mut self) {
        self.filter_queue.clear();
        if !self.search_query.is_empty() {
            self.filter_queue.add(Predicate::Search(self.search_query.clone()));
        }
        if let Some(category) = &self.category {
            self.filter_queue.add(Predicate::Category(category.clone()));
        }
        if let Some(genre) = &self.genre {
            self.filter_queue.add(Predicate::Genre(genre.clone()));
        }
        if let Some(year) = self.min_year {
            self.filter_queue.add(Predicate::MinYear(year));
        }
    }

    /// Backend query matching the current selections.
    #[must_use]
    pub fn book_query(&self) -> BookQuery {
        BookQuery {
            query: self.search_query.clone(),
            genre: self.genre.clone(),
            year: self.min_year,
            kind: self.category.clone(),
        }
    }

    /// Rebuilds the queue and returns the list request that supersedes all earlier ones.
    pub fn begin_list_fetch(&mut self) -> Action {
        self.debounce.cancel();
        self.rebuild_filter_queue();
        self.list_seq += 1;
        self.status = LoadStatus::Loading;

        let url = self.endpoint.books_url(&self.book_query());
        tracing::debug!(seq = self.list_seq, url = %url, filters = self.filter_queue.len(), "fetching books");
        Action::FetchBooks {
            url,
            tag: RequestTag::new(RequestKind::List, self.list_seq),
        }
    }

    /// Returns the detail request for `id`, superseding any earlier one.
    pub fn begin_detail_fetch(&mut self, id: &str) -> Action {
        self.detail_seq += 1;
        let url = self.endpoint.book_url(id);
        tracing::debug!(seq = self.detail_seq, url = %url, "fetching book detail");
        Action::FetchBook {
            url,
            tag: RequestTag::new(RequestKind::Detail, self.detail_seq),
        }
    }

    /// Whether `tag` is the latest request issued for its kind.
    #[must_use]
    pub const fn is_current(&self, tag: RequestTag) -> bool {
        match tag.kind {
            RequestKind::List => tag.seq == self.list_seq,
            RequestKind::Detail => tag.seq == self.detail_seq,
        }
    }

    /// Replaces the collection with a fresh fetch and recomputes the view.
    pub fn receive_books(&mut self, books: Vec<Book>) {
        merge_distinct(&mut self.categories, distinct_categories(&books));
        merge_distinct(&mut self.genres, distinct_genres(&books));
        self.books = books;
        self.status = LoadStatus::Loaded;
        self.refresh_view();
    }

    /// Applies the filter queue and sort key to `books`.
    pub fn refresh_view(&mut self) {
        let _span = tracing::debug_span!("refresh_view",
            total = self.books.len(),
            filters = self.filter_queue.len(),
            sort = self.sort_key.label()
        )
        .entered();

        self.view = sort_books(self.filter_queue.apply(&self.books), self.sort_key);
        self.selected_index = if self.view.is_empty() {
            0
        } else {
            self.selected_index.min(self.view.len() - 1)
        };

        tracing::debug!(shown = self.view.len(), "view refreshed");
    }

    /// Steps the active category forward or back through "All" plus each known category.
    pub fn cycle_category(&mut self, forward: bool) {
        let slots = self.categories.len() + 1;
        let current = self
            .category
            .as_ref()
            .and_then(|c| self.categories.iter().position(|k| k == c))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.category = next.checked_sub(1).map(|i| self.categories[i].clone());
        self.selected_index = 0;
    }

    // ---- filters panel ----

    /// Opens the panel with the applied filters as the draft.
    pub fn open_filters(&mut self) {
        self.draft = FilterDraft {
            genre: self.genre.clone(),
            year: self.min_year.map(|y| y.to_string()).unwrap_or_default(),
        };
        self.input_mode = InputMode::Filters(FilterField::Genre);
    }

    /// Steps the draft genre through "Any" plus each known genre.
    pub fn cycle_draft_genre(&mut self, forward: bool) {
        let slots = self.genres.len() + 1;
        let current = self
            .draft
            .genre
            .as_ref()
            .and_then(|g| self.genres.iter().position(|k| k == g))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.draft.genre = next.checked_sub(1).map(|i| self.genres[i].clone());
    }

    /// Commits the draft; a year that does not parse clears the year filter.
    pub fn apply_draft(&mut self) {
        self.genre = self.draft.genre.clone();
        self.min_year = self.draft.year.parse().ok();
        if self.min_year.is_none() && !self.draft.year.is_empty() {
            tracing::debug!(year = %self.draft.year, "ignoring unparsable year");
        }
        self.input_mode = InputMode::Normal;
        self.selected_index = 0;
    }

    // ---- selection ----

    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.view.get(self.selected_index)
    }

    fn columns(&self) -> usize {
        match self.layout {
            LayoutMode::Grid => grid_columns(self.viewport.1),
            LayoutMode::List => 1,
        }
    }

    /// Moves down one row; the list wraps, the grid stops at the last row.
    pub fn move_selection_down(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let len = self.view.len();
        match self.layout {
            LayoutMode::List => self.selected_index = (self.selected_index + 1) % len,
            LayoutMode::Grid => {
                let next = self.selected_index + self.columns();
                if next < len {
                    self.selected_index = next;
                }
            }
        }
    }

    /// Moves up one row; the list wraps, the grid stops at the first row.
    pub fn move_selection_up(&mut self) {
        if self.view.is_empty() {
            return;
        }
        match self.layout {
            LayoutMode::List => {
                self.selected_index = self
                    .selected_index
                    .checked_sub(1)
                    .unwrap_or(self.view.len() - 1);
            }
            LayoutMode::Grid => {
                if let Some(prev) = self.selected_index.checked_sub(self.columns()) {
                    self.selected_index = prev;
                }
            }
        }
    }

    /// Moves one card left or right in the grid. No-op in the list.
    pub fn move_selection_sideways(&mut self, right: bool) {
        if self.layout != LayoutMode::Grid || self.view.is_empty() {
            return;
        }
        if right {
            self.selected_index = (self.selected_index + 1).min(self.view.len() - 1);
        } else {
            self.selected_index = self.selected_index.saturating_sub(1);
        }
    }

    // ---- view model ----

    /// Computes the renderable snapshot for a `rows` × `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let on_results = self.page == Page::Results;

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            body: if on_results {
                self.compute_body(rows, cols)
            } else {
                Body::Landing(Self::compute_landing())
            },
            search_bar: self.compute_search_bar(),
            category_bar: on_results.then(|| self.compute_category_bar()),
            filters_panel: self.compute_filters_panel(),
            modal: self.modal.as_ref().map(compute_detail),
        }
    }

    fn compute_landing() -> LandingInfo {
        LandingInfo {
            title: "Folio".to_string(),
            tagline: "Browse, search, and filter the book catalog".to_string(),
            hints: vec![
                "Enter  browse all books".to_string(),
                "/      search by title or author".to_string(),
                "t      switch light/dark theme".to_string(),
                "q      close".to_string(),
            ],
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = match &self.status {
            LoadStatus::Idle | LoadStatus::Loading => "Loading books…".to_string(),
            LoadStatus::Failed(_) => "Error loading books".to_string(),
            LoadStatus::Loaded => format!("Showing {} results", self.view.len()),
        };
        let controls = format!(
            "sort: {}  view: {}  theme: {}",
            self.sort_key.label(),
            self.layout.label(),
            self.theme_mode.as_str()
        );

        HeaderInfo {
            title: " Folio ".to_string(),
            status,
            controls,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.page, self.input_mode) {
            (_, InputMode::Modal) => "o: open in store  Esc/q: close",
            (_, InputMode::Filters(_)) => {
                "Tab: next field  ←/→: genre  0-9: year  Enter: apply  Esc: cancel"
            }
            (_, InputMode::Search(SearchFocus::Typing)) => {
                "Type to search  Enter/↓: results  Esc: clear search"
            }
            (_, InputMode::Search(SearchFocus::Navigating)) => {
                "j/k: move  Enter: details  /: edit query  Esc: clear search"
            }
            (Page::Landing, InputMode::Normal) => "Enter/b: browse  /: search  t: theme  q: quit",
            (Page::Results, InputMode::Normal) => {
                "hjkl: move  Enter: details  /: search  f: filters  [ ]: category  s: sort  v: view  t: theme  r: refresh  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let is_focused = self.input_mode == InputMode::Search(SearchFocus::Typing);
        let visible = matches!(self.input_mode, InputMode::Search(_)) || !self.search_query.is_empty();
        visible.then(|| SearchBarInfo {
            query: self.search_query.clone(),
            is_focused,
        })
    }

    fn compute_category_bar(&self) -> CategoryBar {
        let mut labels = Vec::with_capacity(self.categories.len() + 1);
        labels.push(ALL_CATEGORIES.to_string());
        labels.extend(self.categories.iter().map(|c| category_label(c)));

        let active = self
            .category
            .as_ref()
            .and_then(|c| self.categories.iter().position(|k| k == c))
            .map_or(0, |i| i + 1);

        CategoryBar { labels, active }
    }

    fn compute_filters_panel(&self) -> Option<FiltersPanel> {
        let InputMode::Filters(focus) = self.input_mode else {
            return None;
        };
        Some(FiltersPanel {
            genre: self.draft.genre.clone().unwrap_or_else(|| ANY_GENRE.to_string()),
            year: self.draft.year.clone(),
            focus,
        })
    }

    fn compute_body(&self, rows: usize, cols: usize) -> Body {
        match &self.status {
            LoadStatus::Failed(detail) => {
                return Body::Message(EmptyState {
                    message: "Error loading books. Please try again later.".to_string(),
                    subtitle: detail.clone(),
                    is_error: true,
                });
            }
            LoadStatus::Idle | LoadStatus::Loading if self.books.is_empty() => {
                return Body::Message(EmptyState {
                    message: "Loading books…".to_string(),
                    subtitle: self.endpoint.base_url().to_string(),
                    is_error: false,
                });
            }
            _ => {}
        }

        if self.view.is_empty() {
            return Body::Message(EmptyState {
                message: "No books found matching your criteria.".to_string(),
                subtitle: "Adjust the search, category, or filters and try again.".to_string(),
                is_error: false,
            });
        }

        let available = self.calculate_available_rows(rows);
        match self.layout {
            LayoutMode::List => {
                let (start, end) = window(self.selected_index, available, self.view.len());
                Body::List(self.display_items(start, end))
            }
            LayoutMode::Grid => {
                let columns = grid_columns(cols);
                let card_rows = ((available + 1) / (CARD_HEIGHT + 1)).max(1);
                let total_rows = (self.view.len() + columns - 1) / columns;
                let (first_row, last_row) =
                    window(self.selected_index / columns, card_rows, total_rows);
                let start = first_row * columns;
                let end = (last_row * columns).min(self.view.len());
                Body::Grid {
                    items: self.display_items(start, end),
                    columns,
                }
            }
        }
    }

    fn display_items(&self, start: usize, end: usize) -> Vec<DisplayItem> {
        let highlight = !self.search_query.is_empty();

        self.view[start..end]
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                let title = book.display_title().to_string();
                let author = book.display_author().to_string();
                let (title_ranges, author_ranges) = if highlight {
                    (
                        match_ranges(&title, &self.search_query),
                        match_ranges(&author, &self.search_query),
                    )
                } else {
                    (vec![], vec![])
                };

                DisplayItem {
                    title,
                    author,
                    year: book.year.map(|y| y.to_string()).unwrap_or_default(),
                    genre: book.genre.clone().unwrap_or_default(),
                    rating: book.rating_label(),
                    stars: star_bar(book.clamped_rating()),
                    price: book.price.clone().unwrap_or_default(),
                    is_selected: start + offset == self.selected_index,
                    title_ranges,
                    author_ranges,
                }
            })
            .collect()
    }

    /// Rows left for the body after header, category bar, search bar, table
    /// header, and footer.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = 7;
        if self.compute_search_bar().is_some() {
            chrome += 3;
        }
        if self.layout == LayoutMode::List {
            chrome += 1;
        }
        total_rows.saturating_sub(chrome)
    }
}

/// Visible `[start, end)` of `len` items, `capacity` at a time, centered on `selected`.
fn window(selected: usize, capacity: usize, len: usize) -> (usize, usize) {
    let capacity = capacity.max(1);
    let mut start = selected.saturating_sub(capacity / 2);
    let end = (start + capacity).min(len);
    if end - start < capacity {
        start = end.saturating_sub(capacity);
    }
    (start, end)
}

fn merge_distinct(known: &mut Vec<String>, found: Vec<String>) {
    for value in found {
        if !known.contains(&value) {
            known.push(value);
        }
    }
}

fn compute_detail(book: &Book) -> BookDetail {
    let mut metadata = Vec::new();
    let mut field = |label: &str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            metadata.push((label.to_string(), value));
        }
    };
    field("Genre", book.genre.clone());
    field("Category", book.kind.as_deref().map(category_label));
    field("Year", book.year.map(|y| y.to_string()));
    field("Pages", book.pages.map(|p| p.to_string()));
    field("ISBN", book.isbn.clone());
    field("Price", book.price.clone());
    field("Reviews", book.reviews.map(|r| r.to_string()));

    BookDetail {
        title: book.display_title().to_string(),
        author_line: format!("By {}", book.display_author()),
        stars: star_bar(book.clamped_rating()),
        rating: book.rating_label(),
        metadata,
        description: book
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "No description available.".to_string()),
        link: book.store_link(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book(id: &str, title: &str, kind: &str) -> Book {
        Book {
            id: Some(id.into()),
            title: Some(title.into()),
            kind: Some(kind.into()),
            ..Book::default()
        }
    }

    fn state() -> AppState {
        AppState::new(Endpoint::default(), ThemeSet::default(), ThemeMode::Light)
    }

    #[test]
    fn queue_follows_selections() {
        let mut state = state();
        state.rebuild_filter_queue();
        assert!(state.filter_queue.is_empty());

        state.search_query = "dune".into();
        state.category = Some("novel".into());
        state.min_year = Some(1960);
        state.rebuild_filter_queue();
        let mut expected = FilterQueue::new();
        expected.add(Predicate::Search("dune".into()));
        expected.add(Predicate::Category("novel".into()));
        expected.add(Predicate::MinYear(1960));
        assert_eq!(state.filter_queue, expected);
    }

    #[test]
    fn list_fetch_url_carries_selections() {
        let mut state = state();
        state.genre = Some("Fantasy".into());
        let Action::FetchBooks { url, tag } = state.begin_list_fetch() else {
            panic!("expected a list fetch");
        };
        assert_eq!(url, "http://localhost:5000/books?genre=Fantasy");
        assert!(state.is_current(tag));
        assert_eq!(state.status, LoadStatus::Loading);
    }

    #[test]
    fn newer_requests_make_older_ones_stale() {
        let mut state = state();
        let Action::FetchBooks { tag: first, .. } = state.begin_list_fetch() else {
            panic!("expected a list fetch");
        };
        let Action::FetchBooks { tag: second, .. } = state.begin_list_fetch() else {
            panic!("expected a list fetch");
        };
        assert!(!state.is_current(first));
        assert!(state.is_current(second));

        let Action::FetchBook { tag: detail, .. } = state.begin_detail_fetch("x") else {
            panic!("expected a detail fetch");
        };
        assert!(state.is_current(detail));
        assert!(state.is_current(second));
    }

    #[test]
    fn categories_accumulate_across_fetches() {
        let mut state = state();
        state.receive_books(vec![book("1", "A", "novel"), book("2", "B", "comic")]);
        state.receive_books(vec![book("3", "C", "novel")]);
        assert_eq!(state.categories, vec!["novel", "comic"]);

        state.cycle_category(true);
        assert_eq!(state.category.as_deref(), Some("novel"));
        state.cycle_category(true);
        state.cycle_category(true);
        assert_eq!(state.category, None);
        state.cycle_category(false);
        assert_eq!(state.category.as_deref(), Some("comic"));
    }

    #[test]
    fn draft_year_must_parse() {
        let mut state = state();
        state.open_filters();
        state.draft.year = "19x".into();
        state.apply_draft();
        assert_eq!(state.min_year, None);

        state.open_filters();
        state.draft.year = "1990".into();
        state.apply_draft();
        assert_eq!(state.min_year, Some(1990));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn grid_navigation_moves_by_rows() {
        let mut state = state();
        state.set_viewport(24, 92);
        state.receive_books((0..7).map(|i| book(&i.to_string(), "T", "k")).collect());

        state.move_selection_down();
        assert_eq!(state.selected_index, 3);
        state.move_selection_down();
        assert_eq!(state.selected_index, 6);
        state.move_selection_down();
        assert_eq!(state.selected_index, 6);
        state.move_selection_sideways(false);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn list_navigation_wraps() {
        let mut state = state();
        state.layout = LayoutMode::List;
        state.receive_books(vec![book("1", "A", "k"), book("2", "B", "k")]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let mut state = state();
        state.page = Page::Results;
        state.receive_books(vec![]);

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.status, "Showing 0 results");
        let Body::Message(message) = vm.body else {
            panic!("expected a message body");
        };
        assert_eq!(message.message, "No books found matching your criteria.");
        assert!(!message.is_error);
    }

    #[test]
    fn windows_stay_full_near_the_end() {
        assert_eq!(window(0, 5, 3), (0, 3));
        assert_eq!(window(9, 4, 10), (6, 10));
        assert_eq!(window(4, 4, 10), (2, 6));
    }

    #[test]
    fn detail_lists_only_present_fields() {
        let detail = compute_detail(&Book {
            title: Some("Dune".into()),
            author: Some("Frank Herbert".into()),
            year: Some(1965),
            rating: Some(4.5),
            ..Book::default()
        });
        assert_eq!(detail.author_line, "By Frank Herbert");
        assert_eq!(detail.stars, "★★★★◐");
        assert_eq!(detail.metadata, vec![("Year".to_string(), "1965".to_string())]);
        assert_eq!(detail.description, "No description available.");
    }
}
