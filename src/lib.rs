//! Folio: a Zellij plugin for browsing a remote book catalog.
//!
//! Folio fetches books from a small HTTP backend and lets the user:
//! - Search titles and authors as they type, debounced
//! - Narrow the list by category, genre, and minimum year
//! - Sort by fetch order, title, author, or year
//! - Switch between a card grid and a table
//! - Open a detail view with a store link
//! - Toggle a light or dark theme that persists across sessions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls only
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, debounce, request sequencing     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ API           │   │ Worker        │
//! │ (catalog/)    │   │ (api/)        │   │ (worker/)     │
//! │ - Search      │   │ - URLs        │   │ - Preferences │
//! │ - Filter queue│   │ - Tags        │   │ - Storage     │
//! │ - Sort engine │   │ - Decoding    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  UI (ui/), Domain (domain/), Infrastructure         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/folio.wasm" {
//!         api_url "http://localhost:5000"
//!         debounce_ms "300"
//!         theme "dark"
//!         opener "xdg-open"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use folio::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::SearchMode)?;
//! let (_, actions) = handle_event(&mut state, &Event::Char('d'))?;
//! assert!(matches!(actions[0], Action::ScheduleTimer { .. }));
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod api;
pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{Book, FolioError, Result};
pub use ui::{Theme, ThemeMode};

use api::request::DEFAULT_BASE_URL;
use api::Endpoint;
use app::Debounce;
use std::collections::BTreeMap;
use std::time::Duration;
use ui::ThemeSet;

/// Opener used when none is configured.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog backend base URL.
    pub api_url: String,

    /// Quiet period after the last keystroke before a search is sent.
    pub debounce: Duration,

    /// Theme used when no preference has been saved yet.
    pub theme: ThemeMode,

    /// TOML palette replacing the built-in light theme.
    pub light_theme_file: Option<String>,

    /// TOML palette replacing the built-in dark theme.
    pub dark_theme_file: Option<String>,

    /// Command that opens a URL, e.g. `xdg-open` or `open`.
    pub opener: String,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            debounce: app::debounce::DEFAULT_DELAY,
            theme: ThemeMode::default(),
            light_theme_file: None,
            dark_theme_file: None,
            opener: DEFAULT_OPENER.to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the Zellij configuration map, falling back to defaults for
    /// missing or malformed values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use folio::{Config, ThemeMode};
    ///
    /// let map = BTreeMap::from([
    ///     ("api_url".to_string(), "https://books.example/".to_string()),
    ///     ("debounce_ms".to_string(), "150".to_string()),
    ///     ("theme".to_string(), "dark".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://books.example/");
    /// assert_eq!(config.debounce, Duration::from_millis(150));
    /// assert_eq!(config.theme, ThemeMode::Dark);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let debounce = config
            .get("debounce_ms")
            .map_or(Ok(defaults.debounce), |v| parse_debounce(v))
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default debounce");
                defaults.debounce
            });

        let theme = config
            .get("theme")
            .map_or(Ok(defaults.theme), |v| parse_theme(v))
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default theme");
                defaults.theme
            });

        Self {
            api_url: text("api_url").unwrap_or(defaults.api_url),
            debounce,
            theme,
            light_theme_file: text("light_theme_file"),
            dark_theme_file: text("dark_theme_file"),
            opener: text("opener").unwrap_or(defaults.opener),
            trace_level: text("trace_level"),
        }
    }
}

fn parse_debounce(value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| FolioError::Config(format!("debounce_ms {value:?}: {e}")))
}

fn parse_theme(value: &str) -> Result<ThemeMode> {
    ThemeMode::parse(value)
        .ok_or_else(|| FolioError::Config(format!("theme {value:?} is neither light nor dark")))
}

/// Builds the initial state from configuration.
///
/// The state starts on the landing page with no books; the first fetch is
/// issued once the host grants web access.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, theme = config.theme.as_str(), "initializing folio");

    let themes = ThemeSet::load(
        config.light_theme_file.as_deref(),
        config.dark_theme_file.as_deref(),
    );
    let mut state = AppState::new(Endpoint::new(config.api_url.as_str()), themes, config.theme);
    state.debounce = Debounce::new(config.debounce);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn malformed_values_fall_back() {
        let map = BTreeMap::from([
            ("debounce_ms".to_string(), "soon".to_string()),
            ("theme".to_string(), "sepia".to_string()),
            ("opener".to_string(), "  ".to_string()),
        ]);
        let config = Config::from_zellij(&map);
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.opener, DEFAULT_OPENER);
    }

    #[test]
    fn malformed_values_are_config_errors() {
        assert!(matches!(parse_debounce("soon"), Err(FolioError::Config(_))));
        assert!(matches!(parse_theme("sepia"), Err(FolioError::Config(_))));
        assert_eq!(parse_debounce(" 120 ").unwrap(), Duration::from_millis(120));
    }

    #[test]
    fn initialize_applies_endpoint_and_debounce() {
        let config = Config {
            api_url: "https://books.example/".to_string(),
            debounce: Duration::from_millis(50),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.endpoint.base_url(), "https://books.example");
        assert_eq!(state.debounce.delay(), Duration::from_millis(50));
    }
}
