//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which is normally the user's
//! home directory.

use std::path::PathBuf;

/// Preference file name inside [`get_data_dir`].
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Directory holding Folio's preference store and trace file.
///
/// Resolves to `~/.local/share/zellij/folio` on the host.
///
/// # Examples
///
/// ```
/// use folio::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/folio"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("folio")
}

/// Default location of the preference store.
#[must_use]
pub fn preferences_path() -> PathBuf {
    get_data_dir().join(PREFERENCES_FILE)
}

/// Maps a `~`-prefixed path into the sandbox.
///
/// # Examples
///
/// ```
/// use folio::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/folio.toml"), "/etc/folio.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
