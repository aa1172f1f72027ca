//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place state changes. It matches on the event,
//! mutates [`AppState`], and returns whether to re-render plus the side effects
//! to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `KeyLeft`, `KeyRight`, `Browse`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`
//! - **Catalog**: `CycleSort`, `NextCategory`, `PrevCategory`, `Refresh`, filters panel events
//! - **Presentation**: `ToggleLayout`, `ToggleTheme`, `OpenSelected`, `CloseModal`, `OpenLink`
//! - **Host**: `DebounceElapsed`, `WebResponse`, `PermissionsResult`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use folio::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(render);
//! assert!(actions.iter().any(|a| matches!(a, Action::FetchBooks { .. })));
//! # Ok::<(), folio::FolioError>(())
//! ```

use super::modes::{FilterField, InputMode, LoadStatus, Page, SearchFocus};
use crate::api::{decode_book, decode_books, RequestKind, RequestTag};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::storage::THEME_KEY;
use crate::ui::theme::ThemeMode;
use crate::worker::{WorkerMessage, WorkerResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyDown,
    KeyUp,
    /// Previous card (grid only).
    KeyLeft,
    /// Next card (grid only).
    KeyRight,
    /// Hides the plugin.
    CloseFocus,

    /// Leaves the landing page for the results page.
    Browse,

    /// Enters search with typing focus, leaving the landing page if needed.
    SearchMode,
    /// Returns focus to the query while searching.
    FocusSearchBar,
    /// Moves focus from the query to the results.
    FocusResults,
    /// Clears the query, leaves search, and refetches.
    ExitSearch,
    /// Query character while typing, or a year digit in the filters panel.
    Char(char),
    Backspace,

    /// Opens the detail modal for the selected book.
    OpenSelected,
    CloseModal,
    /// Opens the modal book's store link.
    OpenLink,

    ToggleLayout,
    ToggleTheme,
    CycleSort,
    NextCategory,
    PrevCategory,
    /// Refetches with the current selections.
    Refresh,

    OpenFilters,
    /// Switches between the genre and year fields.
    FilterNextField,
    FilterNextGenre,
    FilterPrevGenre,
    ApplyFilters,
    /// Closes the panel without applying the draft.
    DiscardFilters,

    /// The debounce timer elapsed.
    DebounceElapsed,

    /// A web request finished.
    WebResponse {
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },

    /// The user answered the permission prompt.
    PermissionsResult { granted: bool },

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Reserved for failures the shim should log; none of the current transitions fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::KeyLeft => {
            state.move_selection_sideways(false);
            Ok((true, vec![]))
        }
        Event::KeyRight => {
            state.move_selection_sideways(true);
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Browse => {
            if state.page == Page::Results {
                return Ok((false, vec![]));
            }
            state.page = Page::Results;
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.page = Page::Results;
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = if state.search_query.is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            if state.search_query.is_empty() {
                state.debounce.cancel();
                return Ok((true, vec![]));
            }
            state.search_query.clear();
            state.selected_index = 0;
            Ok((true, vec![state.begin_list_fetch()]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, "search query updated");
                Ok((true, vec![schedule_search(state)]))
            }
            InputMode::Filters(FilterField::Year) if c.is_ascii_digit() => {
                state.draft.year.push(*c);
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                if state.search_query.pop().is_none() {
                    return Ok((false, vec![]));
                }
                Ok((true, vec![schedule_search(state)]))
            }
            InputMode::Filters(FilterField::Year) => Ok((state.draft.year.pop().is_some(), vec![])),
            _ => Ok((false, vec![])),
        },
        Event::OpenSelected => {
            let Some(book) = state.selected_book().cloned() else {
                tracing::debug!("no book selected");
                return Ok((false, vec![]));
            };

            match book.id.as_deref() {
                Some(id) => Ok((false, vec![state.begin_detail_fetch(id)])),
                None => {
                    tracing::debug!(title = %book.display_title(), "opening modal from local record");
                    state.modal = Some(book);
                    state.input_mode = InputMode::Modal;
                    Ok((true, vec![]))
                }
            }
        }
        Event::CloseModal => {
            if state.modal.take().is_none() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::OpenLink => Ok((
            false,
            state
                .modal
                .as_ref()
                .map(|book| Action::OpenLink { url: book.store_link() })
                .into_iter()
                .collect(),
        )),
        Event::ToggleLayout => {
            state.layout = state.layout.toggle();
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.theme_mode = state.theme_mode.toggle();
            tracing::debug!(theme = state.theme_mode.as_str(), "theme toggled");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::save_preference(
                    THEME_KEY.to_string(),
                    state.theme_mode.as_str().to_string(),
                ))],
            ))
        }
        Event::CycleSort => {
            state.sort_key = state.sort_key.next();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::NextCategory | Event::PrevCategory => {
            let before = state.category.clone();
            state.cycle_category(matches!(event, Event::NextCategory));
            if state.category == before {
                return Ok((false, vec![]));
            }
            tracing::debug!(category = ?state.category, "category changed");
            Ok((true, vec![state.begin_list_fetch()]))
        }
        Event::Refresh => Ok((true, vec![state.begin_list_fetch()])),
        Event::OpenFilters => {
            state.page = Page::Results;
            state.open_filters();
            Ok((true, vec![]))
        }
        Event::FilterNextField => {
            let InputMode::Filters(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Filters(field.next());
            Ok((true, vec![]))
        }
        Event::FilterNextGenre | Event::FilterPrevGenre => {
            if state.input_mode != InputMode::Filters(FilterField::Genre) {
                return Ok((false, vec![]));
            }
            state.cycle_draft_genre(matches!(event, Event::FilterNextGenre));
            Ok((true, vec![]))
        }
        Event::ApplyFilters => {
            if !matches!(state.input_mode, InputMode::Filters(_)) {
                return Ok((false, vec![]));
            }
            state.apply_draft();
            tracing::debug!(genre = ?state.genre, min_year = ?state.min_year, "filters applied");
            Ok((true, vec![state.begin_list_fetch()]))
        }
        Event::DiscardFilters => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::DebounceElapsed => {
            if !state.debounce.on_elapsed() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![state.begin_list_fetch()]))
        }
        Event::WebResponse { tag, status, body } => {
            if !state.is_current(*tag) {
                tracing::debug!(kind = ?tag.kind, seq = tag.seq, "discarding stale response");
                return Ok((false, vec![]));
            }
            match tag.kind {
                RequestKind::List => Ok((true, receive_list(state, *status, body))),
                RequestKind::Detail => Ok((receive_detail(state, *status, body), vec![])),
            }
        }
        Event::PermissionsResult { granted: true } => {
            tracing::debug!("permissions granted, loading preferences and catalog");
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::load_preferences()),
                    state.begin_list_fetch(),
                ],
            ))
        }
        Event::PermissionsResult { granted: false } => {
            tracing::warn!("web access denied");
            state.status = LoadStatus::Failed("Web access permission was denied".to_string());
            Ok((true, vec![Action::PostToWorker(WorkerMessage::load_preferences())]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::PreferencesLoaded { preferences } => {
                let saved = preferences.get(THEME_KEY).and_then(|v| ThemeMode::parse(v));
                match saved {
                    Some(mode) if mode != state.theme_mode => {
                        tracing::debug!(theme = mode.as_str(), "restoring saved theme");
                        state.theme_mode = mode;
                        Ok((true, vec![]))
                    }
                    _ => Ok((false, vec![])),
                }
            }
            WorkerResponse::PreferenceSaved { key } => {
                tracing::debug!(key = %key, "preference saved");
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("worker error: {message}");
                Ok((false, vec![]))
            }
        },
    }
}

/// Restarts the search debounce and returns the timer to schedule.
fn schedule_search(state: &mut AppState) -> Action {
    state.page = Page::Results;
    Action::ScheduleTimer {
        delay: state.debounce.trigger(),
    }
}

fn receive_list(state: &mut AppState, status: u16, body: &[u8]) -> Vec<Action> {
    match decode_books(status, body) {
        Ok(books) => {
            tracing::debug!(count = books.len(), "books received");
            state.receive_books(books);
        }
        Err(e) => {
            tracing::warn!(error = %e, "book list request failed");
            state.status = LoadStatus::Failed(e.to_string());
        }
    }
    vec![]
}

/// Opens the modal on success; failures leave everything as it was.
///
/// A lookup that completes while another overlay is open is dropped.
fn receive_detail(state: &mut AppState, status: u16, body: &[u8]) -> bool {
    if !matches!(state.input_mode, InputMode::Normal | InputMode::Search(_)) {
        tracing::debug!(mode = ?state.input_mode, "dropping book detail behind an open overlay");
        return false;
    }
    match decode_book(status, body) {
        Ok(book) => {
            state.modal = Some(book);
            state.input_mode = InputMode::Modal;
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, "book detail unavailable");
            false
        }
    }
}

/// Logs events without dumping response bodies.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::WebResponse { tag, status, body } => f
                .debug_struct("WebResponse")
                .field("tag", tag)
                .field("status", status)
                .field("body_len", &body.len())
                .finish(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use crate::domain::Book;
    use crate::ui::theme::ThemeSet;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn state() -> AppState {
        AppState::new(Endpoint::default(), ThemeSet::default(), ThemeMode::Light)
    }

    fn fetch_tag(actions: &[Action]) -> RequestTag {
        actions
            .iter()
            .find_map(|a| match a {
                Action::FetchBooks { tag, .. } | Action::FetchBook { tag, .. } => Some(*tag),
                _ => None,
            })
            .expect("a fetch action")
    }

    #[test]
    fn only_the_last_keystroke_fetches() {
        let mut state = state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('d')).unwrap();
        handle_event(&mut state, &Event::Char('u')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(matches!(
            &actions[..],
            [Action::FetchBooks { url, .. }] if url == "http://localhost:5000/books?q=du"
        ));
    }

    #[test]
    fn superseded_list_response_is_discarded() {
        let mut state = state();
        let (_, first) = handle_event(&mut state, &Event::Refresh).unwrap();
        let (_, second) = handle_event(&mut state, &Event::Refresh).unwrap();

        let stale = Event::WebResponse {
            tag: fetch_tag(&first),
            status: 200,
            body: br#"[{"title": "Old"}]"#.to_vec(),
        };
        let (render, _) = handle_event(&mut state, &stale).unwrap();
        assert!(!render);
        assert!(state.books.is_empty());
        assert_eq!(state.status, LoadStatus::Loading);

        let fresh = Event::WebResponse {
            tag: fetch_tag(&second),
            status: 200,
            body: br#"[{"title": "New", "type": "Novel"}]"#.to_vec(),
        };
        handle_event(&mut state, &fresh).unwrap();
        assert_eq!(state.view.len(), 1);
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.categories, vec!["Novel".to_string()]);
    }

    #[test]
    fn category_change_refetches_with_type() {
        let mut state = state();
        state.receive_books(vec![Book {
            kind: Some("Poetry".into()),
            ..Book::default()
        }]);
        let (_, actions) = handle_event(&mut state, &Event::NextCategory).unwrap();
        assert!(matches!(
            &actions[..],
            [Action::FetchBooks { url, .. }] if url == "http://localhost:5000/books?type=Poetry"
        ));

        let (_, actions) = handle_event(&mut state, &Event::NextCategory).unwrap();
        assert!(matches!(
            &actions[..],
            [Action::FetchBooks { url, .. }] if url == "http://localhost:5000/books"
        ));
    }

    #[test]
    fn typing_outside_search_is_ignored() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn year_field_accepts_digits_only() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenFilters).unwrap();
        handle_event(&mut state, &Event::FilterNextField).unwrap();
        for c in ['1', 'a', '9', '-'] {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.draft.year, "19");
    }

    #[test]
    fn discarding_filters_keeps_applied_ones() {
        let mut state = state();
        state.genres = vec!["Fantasy".into()];
        handle_event(&mut state, &Event::OpenFilters).unwrap();
        handle_event(&mut state, &Event::FilterNextGenre).unwrap();
        assert_eq!(state.draft.genre.as_deref(), Some("Fantasy"));
        handle_event(&mut state, &Event::DiscardFilters).unwrap();
        assert_eq!(state.genre, None);

        handle_event(&mut state, &Event::OpenFilters).unwrap();
        handle_event(&mut state, &Event::FilterPrevGenre).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ApplyFilters).unwrap();
        assert_eq!(state.genre.as_deref(), Some("Fantasy"));
        assert_eq!(fetch_tag(&actions).kind, RequestKind::List);
    }

    #[test]
    fn book_without_id_opens_locally() {
        let mut state = state();
        state.receive_books(vec![Book {
            title: Some("Emma".into()),
            ..Book::default()
        }]);
        let (render, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Modal);
    }

    #[test]
    fn failed_detail_lookup_is_silent() {
        let mut state = state();
        state.receive_books(vec![Book {
            id: Some("42".into()),
            ..Book::default()
        }]);
        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        let tag = fetch_tag(&actions);

        let response = Event::WebResponse {
            tag,
            status: 404,
            body: br#"{"error": "Book not found"}"#.to_vec(),
        };
        let (render, _) = handle_event(&mut state, &response).unwrap();
        assert!(!render);
        assert_eq!(state.modal, None);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn detail_response_opens_the_modal_and_link() {
        let mut state = state();
        state.receive_books(vec![Book {
            id: Some("7".into()),
            ..Book::default()
        }]);
        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        let response = Event::WebResponse {
            tag: fetch_tag(&actions),
            status: 200,
            body: br#"{"_id": "7", "title": "Dune", "author": "Frank Herbert"}"#.to_vec(),
        };
        handle_event(&mut state, &response).unwrap();
        assert_eq!(state.input_mode, InputMode::Modal);

        let (_, actions) = handle_event(&mut state, &Event::OpenLink).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenLink {
                url: "https://www.amazon.com/s?k=Dune%20Frank%20Herbert".into()
            }]
        );

        handle_event(&mut state, &Event::CloseModal).unwrap();
        assert_eq!(state.modal, None);
    }

    #[test]
    fn theme_toggle_is_persisted() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::SavePreference { key, value, .. })]
                if key == THEME_KEY && value == "dark"
        ));
    }

    #[test]
    fn saved_theme_is_restored() {
        let mut state = state();
        let preferences = BTreeMap::from([(THEME_KEY.to_string(), "dark".to_string())]);
        let event = Event::WorkerResponse(WorkerResponse::PreferencesLoaded { preferences });
        let (render, _) = handle_event(&mut state, &event).unwrap();
        assert!(render);
        assert_eq!(state.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn sort_change_resorts_without_refetching() {
        let mut state = state();
        state.receive_books(vec![
            Book { title: Some("b".into()), ..Book::default() },
            Book { title: Some("A".into()), ..Book::default() },
        ]);
        let (_, actions) = handle_event(&mut state, &Event::CycleSort).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.view[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn denied_permission_shows_the_error_state() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(matches!(state.status, LoadStatus::Failed(_)));
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::LoadPreferences { .. })]
        ));
    }

    #[test]
    fn superseded_detail_response_is_discarded() {
        let mut state = state();
        state.receive_books(vec![Book {
            id: Some("7".into()),
            ..Book::default()
        }]);
        let (_, first) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        let (_, second) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_ne!(fetch_tag(&first), fetch_tag(&second));

        let stale = Event::WebResponse {
            tag: fetch_tag(&first),
            status: 200,
            body: br#"{"_id": "7", "title": "Dune"}"#.to_vec(),
        };
        let (render, _) = handle_event(&mut state, &stale).unwrap();
        assert!(!render);
        assert_eq!(state.modal, None);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn detail_arriving_over_the_filters_panel_keeps_the_draft() {
        let mut state = state();
        state.receive_books(vec![Book {
            id: Some("7".into()),
            ..Book::default()
        }]);
        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        handle_event(&mut state, &Event::OpenFilters).unwrap();
        handle_event(&mut state, &Event::FilterNextField).unwrap();
        handle_event(&mut state, &Event::Char('2')).unwrap();

        let response = Event::WebResponse {
            tag: fetch_tag(&actions),
            status: 200,
            body: br#"{"_id": "7", "title": "Dune"}"#.to_vec(),
        };
        let (render, _) = handle_event(&mut state, &response).unwrap();
        assert!(!render);
        assert_eq!(state.modal, None);
        assert_eq!(state.input_mode, InputMode::Filters(FilterField::Year));
        assert_eq!(state.draft.year, "2");
    }
}
