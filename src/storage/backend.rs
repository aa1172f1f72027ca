//! Storage backend abstraction.
//!
//! The [`Storage`] trait covers exactly what the worker needs: read one
//! preference, write one, read them all.

use crate::domain::error::Result;
use crate::storage::models::PreferenceRecord;

/// Abstraction over persistent preference backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use folio::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/preferences.json"))?;
/// storage.set_preference("theme", "dark")?;
/// assert_eq!(storage.get_preference("theme")?.as_deref(), Some("dark"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Returns the stored value for `key`, `Ok(None)` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_preference(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any earlier value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn set_preference(&mut self, key: &str, value: &str) -> Result<()>;

    /// Returns every stored preference record.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn all_preferences(&self) -> Result<Vec<PreferenceRecord>>;
}
