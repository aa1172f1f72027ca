//! Storage record models for the preference store.
//!
//! Records carry bookkeeping the plugin never sees; the worker hands the plugin
//! plain `key → value` maps.

use serde::{Deserialize, Serialize};

/// Key under which the light/dark choice is stored.
pub const THEME_KEY: &str = "theme";

/// One persisted preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub key: String,
    pub value: String,

    /// Unix timestamp of the last write.
    pub updated_at: i64,
}

impl PreferenceRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::storage::PreferenceRecord;
    ///
    /// let record = PreferenceRecord::new("theme", "dark");
    /// assert_eq!(record.value, "dark");
    /// assert!(record.updated_at > 0);
    /// ```
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}
