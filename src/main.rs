//! Zellij plugin wrapper and entry point.
//!
//! Every host call lives here. Zellij events are mapped to library
//! [`Event`]s, passed to [`handle_event`], and the returned [`Action`]s are
//! executed against the host API.
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌───────────────────┐   │      web_request ──► catalog backend
//! │  │  State (plugin)   │───┼──►   set_timeout ──► debounce timer
//! │  └───────────────────┘   │      run_command ──► link opener
//! │          │ IPC           │
//! │          ▼               │
//! │  ┌───────────────────┐   │
//! │  │ Worker            │   │  ← preference file
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → per-mode mapping in [`State::map_key_event`]
//! - `Timer` → `Event::DebounceElapsed`
//! - `WebRequestResult` → `Event::WebResponse` when the context carries a request tag
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Landing page: `Enter`/`b` browse, `/` search, `t` theme, `q` quit.
//!
//! Results:
//! - `j`/`k`/`h`/`l` or arrows: Move (left/right in grid only)
//! - `Enter`: Details
//! - `/`: Search
//! - `f`: Filters panel
//! - `[`/`]` or `Tab`: Previous/next category
//! - `s`: Cycle sort
//! - `v`: Grid/list
//! - `t`: Light/dark
//! - `r`: Refetch
//! - `q`/`Esc`: Close
//!
//! `Ctrl+n`/`Ctrl+p` move in every mode except the overlays.

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use folio::api::RequestTag;
use folio::app::modes::{FilterField, Page};
use folio::worker::{FolioWorker, WorkerMessage, WorkerResponse};
use folio::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(Worker, folio_worker, FOLIO_WORKER);

const WORKER_NAME: &str = "folio";

struct State {
    app: folio::AppState,
    opener: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: folio::initialize(&config),
            opener: config.opener,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions, and subscribes to events.
    ///
    /// Nothing is fetched until web access is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        folio::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(api_url = %config.api_url, debounce = ?config.debounce, "parsed configuration");

        self.app = folio::initialize(&config);
        self.opener.clone_from(&config.opener);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _span = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                let Some(tag) = RequestTag::from_context(&context) else {
                    tracing::debug!("ignoring web result without a request tag");
                    return false;
                };
                Event::WebResponse { tag, status, body }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        folio::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press to an application event for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let mode = self.app.input_mode;
        let in_overlay = matches!(mode, InputMode::Modal | InputMode::Filters(_));

        if !in_overlay && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match mode {
            InputMode::Modal => Self::map_modal_key(key.bare_key),
            InputMode::Filters(field) => Self::map_filters_key(key.bare_key, field),
            InputMode::Search(SearchFocus::Typing) => Self::map_typing_key(key.bare_key),
            InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Char('/') => Some(Event::FocusSearchBar),
                other => Self::map_results_key(other),
            },
            InputMode::Normal => match self.app.page {
                Page::Landing => Self::map_landing_key(key.bare_key),
                Page::Results => Self::map_results_key(key.bare_key),
            },
        }
    }

    fn map_modal_key(key: BareKey) -> Option<Event> {
        match key {
            BareKey::Esc | BareKey::Char('q') => Some(Event::CloseModal),
            BareKey::Enter | BareKey::Char('o') => Some(Event::OpenLink),
            _ => None,
        }
    }

    fn map_filters_key(key: BareKey, field: FilterField) -> Option<Event> {
        Some(match key {
            BareKey::Esc => Event::DiscardFilters,
            BareKey::Enter => Event::ApplyFilters,
            BareKey::Tab | BareKey::Down | BareKey::Up => Event::FilterNextField,
            BareKey::Left | BareKey::Char('h') if field == FilterField::Genre => Event::FilterPrevGenre,
            BareKey::Right | BareKey::Char('l') if field == FilterField::Genre => Event::FilterNextGenre,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_typing_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter | BareKey::Down => Event::FocusResults,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_landing_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter | BareKey::Char('b') => Event::Browse,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_results_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::KeyLeft,
            BareKey::Right | BareKey::Char('l') => Event::KeyRight,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::OpenFilters,
            BareKey::Char('[') => Event::PrevCategory,
            BareKey::Char(']') | BareKey::Tab => Event::NextCategory,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('v') => Event::ToggleLayout,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::ScheduleTimer { delay } => set_timeout(delay.as_secs_f64()),
            Action::FetchBooks { url, tag } | Action::FetchBook { url, tag } => {
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], tag.to_context());
            }
            Action::OpenLink { url } => {
                tracing::debug!(opener = %self.opener, url = %url, "opening link");
                run_command(&[self.opener.as_str(), url.as_str()], BTreeMap::new());
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

/// Worker thread entry; the preference logic lives in [`FolioWorker`].
#[derive(Default, Serialize, Deserialize)]
struct Worker(FolioWorker);

impl ZellijWorker<'_> for Worker {
    fn on_message(&mut self, message: String, payload: String) {
        static TRACING: std::sync::Once = std::sync::Once::new();
        TRACING.call_once(|| folio::observability::init_tracing(&Config::default()));

        if let Some(reply) = self.0.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload: reply,
                worker_name: None,
            });
        }
    }
}
