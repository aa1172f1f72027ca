//! Drives the plugin state machine the way the host would: permissions, worker
//! replies, timers, and web responses all arrive as events.

use folio::api::RequestTag;
use folio::app::modes::{LoadStatus, Page};
use folio::ui::viewmodel::Body;
use folio::worker::{WorkerMessage, WorkerResponse};
use folio::{handle_event, initialize, Action, AppState, Config, Event, ThemeMode};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

const CATALOG: &[u8] = br#"[
    {"_id": "1", "title": "Dune", "author": "Frank Herbert", "genre": "Science Fiction", "year": 1965, "type": "novel"},
    {"_id": "2", "title": "Foundation", "author": "Isaac Asimov", "genre": "Science Fiction", "year": 1951, "type": "novel"},
    {"_id": "3", "title": "Ariel", "author": "Sylvia Plath", "genre": "Poetry", "year": 1965, "type": "poetry"}
]"#;

fn started() -> AppState {
    let config = Config {
        api_url: "http://books.test/".to_string(),
        ..Config::default()
    };
    initialize(&config)
}

fn list_fetch(actions: &[Action]) -> (String, RequestTag) {
    actions
        .iter()
        .find_map(|a| match a {
            Action::FetchBooks { url, tag } => Some((url.clone(), *tag)),
            _ => None,
        })
        .expect("a list fetch")
}

fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: &[u8]) {
    let event = Event::WebResponse {
        tag,
        status,
        body: body.to_vec(),
    };
    handle_event(state, &event).unwrap();
}

fn body_message(state: &AppState) -> (String, bool) {
    match state.compute_viewmodel(24, 100).body {
        Body::Message(empty) => (empty.message, empty.is_error),
        other => panic!("expected a message body, got {other:?}"),
    }
}

#[test]
fn startup_loads_preferences_then_the_catalog() {
    let mut state = started();
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

    assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::LoadPreferences { .. })));
    let (url, tag) = list_fetch(&actions);
    assert_eq!(url, "http://books.test/books");

    let saved = BTreeMap::from([("theme".to_string(), "dark".to_string())]);
    let event = Event::WorkerResponse(WorkerResponse::PreferencesLoaded { preferences: saved });
    handle_event(&mut state, &event).unwrap();
    assert_eq!(state.theme_mode, ThemeMode::Dark);

    respond(&mut state, tag, 200, CATALOG);
    assert_eq!(state.status, LoadStatus::Loaded);
    assert_eq!(state.categories, vec!["novel".to_string(), "poetry".to_string()]);
    assert_eq!(state.page, Page::Landing);

    handle_event(&mut state, &Event::Browse).unwrap();
    let vm = state.compute_viewmodel(24, 100);
    assert_eq!(vm.header.status, "Showing 3 results");
    assert!(matches!(vm.body, Body::Grid { ref items, .. } if items.len() == 3));
}

#[test]
fn debounced_search_fetches_once_and_filters_locally() {
    let mut state = started();
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let (_, initial) = list_fetch(&actions);

    handle_event(&mut state, &Event::SearchMode).unwrap();
    let mut timers = 0;
    for c in "dune".chars() {
        let (_, actions) = handle_event(&mut state, &Event::Char(c)).unwrap();
        timers += actions
            .iter()
            .filter(|a| matches!(a, Action::ScheduleTimer { .. }))
            .count();
    }
    assert_eq!(timers, 4);

    let mut fetches = Vec::new();
    for _ in 0..timers {
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        fetches.extend(actions);
    }
    assert_eq!(fetches.len(), 1);
    let (url, search) = list_fetch(&fetches);
    assert_eq!(url, "http://books.test/books?q=dune");

    // The initial load answering late must not overwrite the search results.
    respond(&mut state, initial, 200, CATALOG);
    assert!(state.books.is_empty());

    respond(&mut state, search, 200, CATALOG);
    let titles: Vec<_> = state.view.iter().filter_map(|b| b.title.as_deref()).collect();
    assert_eq!(titles, vec!["Dune"]);
}

#[test]
fn filters_and_category_shape_the_request() {
    let mut state = started();
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let (_, tag) = list_fetch(&actions);
    respond(&mut state, tag, 200, CATALOG);
    handle_event(&mut state, &Event::Browse).unwrap();

    handle_event(&mut state, &Event::OpenFilters).unwrap();
    handle_event(&mut state, &Event::FilterNextGenre).unwrap();
    handle_event(&mut state, &Event::FilterNextField).unwrap();
    for c in "1960".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    let (_, actions) = handle_event(&mut state, &Event::ApplyFilters).unwrap();
    let (url, tag) = list_fetch(&actions);
    assert_eq!(url, "http://books.test/books?genre=Science%20Fiction&year=1960");

    respond(&mut state, tag, 200, CATALOG);
    let titles: Vec<_> = state.view.iter().filter_map(|b| b.title.as_deref()).collect();
    assert_eq!(titles, vec!["Dune"]);

    let (_, actions) = handle_event(&mut state, &Event::NextCategory).unwrap();
    let (url, _) = list_fetch(&actions);
    assert_eq!(
        url,
        "http://books.test/books?genre=Science%20Fiction&year=1960&type=novel"
    );
}

#[test]
fn empty_and_failed_responses_render_their_states() {
    let mut state = started();
    handle_event(&mut state, &Event::Browse).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
    let (_, tag) = list_fetch(&actions);
    respond(&mut state, tag, 200, b"[]");
    assert_eq!(
        body_message(&state),
        ("No books found matching your criteria.".to_string(), false)
    );
    assert_eq!(state.compute_viewmodel(24, 100).header.status, "Showing 0 results");

    let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
    let (_, tag) = list_fetch(&actions);
    respond(&mut state, tag, 500, b"Internal Server Error");
    assert_eq!(
        body_message(&state),
        ("Error loading books. Please try again later.".to_string(), true)
    );
}
