//! Light and dark palettes and ANSI escape sequence generation.
//!
//! Both built-in palettes are TOML documents compiled into the plugin. Either
//! can be replaced by a user file via the `light_theme_file` / `dark_theme_file`
//! options.
//!
//! # TOML Format
//!
//! ```toml
//! name = "folio-dark"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! accent = "#89b4fa"
//! search_bar_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! star_fg = "#f9e2af"
//! price_fg = "#a6e3a1"
//! ```

use crate::domain::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Light or dark appearance; the persisted preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored or configured value; anything unknown is `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color strings (e.g. `"#cdd6f4"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary metadata, error details.
    pub text_dim: String,
    pub border: String,

    /// Active category, focused panel field, links.
    pub accent: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    pub error_fg: String,

    pub star_fg: String,
    pub price_fg: String,
}

impl Theme {
    /// Loads the compiled-in palette for a mode.
    ///
    /// Falls back to a plain two-color palette if the embedded TOML is ever
    /// malformed, so rendering never fails.
    #[must_use]
    pub fn builtin(mode: ThemeMode) -> Self {
        let source = match mode {
            ThemeMode::Light => include_str!("../../themes/light.toml"),
            ThemeMode::Dark => include_str!("../../themes/dark.toml"),
        };

        toml::from_str(source).unwrap_or_else(|e| {
            tracing::error!(mode = mode.as_str(), error = %e, "built-in theme failed to parse");
            Self::plain(mode)
        })
    }

    fn plain(mode: ThemeMode) -> Self {
        let (fg, bg) = match mode {
            ThemeMode::Light => ("#000000", "#ffffff"),
            ThemeMode::Dark => ("#ffffff", "#000000"),
        };
        let fg = fg.to_string();
        Self {
            name: format!("plain-{}", mode.as_str()),
            colors: ThemeColors {
                header_fg: fg.clone(),
                header_bg: None,
                selection_fg: bg.to_string(),
                selection_bg: fg.clone(),
                text_normal: fg.clone(),
                text_dim: fg.clone(),
                border: fg.clone(),
                accent: fg.clone(),
                search_bar_border: fg.clone(),
                match_highlight_fg: bg.to_string(),
                match_highlight_bg: fg.clone(),
                empty_state_fg: fg.clone(),
                error_fg: fg.clone(),
                star_fg: fg.clone(),
                price_fg: fg,
            },
        }
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// [`FolioError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| FolioError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| FolioError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Converts `#rrggbb` to an RGB tuple; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeMode::Light)
    }
}

/// The light and dark palettes side by side, so toggling never reloads files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    light: Theme,
    dark: Theme,
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            light: Theme::builtin(ThemeMode::Light),
            dark: Theme::builtin(ThemeMode::Dark),
        }
    }
}

impl ThemeSet {
    /// Built-in palettes, each replaced by its override file when one loads.
    #[must_use]
    pub fn load(light_file: Option<&str>, dark_file: Option<&str>) -> Self {
        Self {
            light: Self::load_one(ThemeMode::Light, light_file),
            dark: Self::load_one(ThemeMode::Dark, dark_file),
        }
    }

    fn load_one(mode: ThemeMode, file: Option<&str>) -> Theme {
        let Some(file) = file else {
            return Theme::builtin(mode);
        };

        let path = crate::infrastructure::expand_tilde(file);
        Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(mode = mode.as_str(), theme_file = %path, error = %e, "using built-in theme");
            Theme::builtin(mode)
        })
    }

    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}
