//! JSON file-based preference store.
//!
//! The whole file is loaded once and kept in memory. Every write goes to a
//! temporary sibling first and is renamed over the target, so a crash never
//! leaves a half-written file behind.

use crate::domain::error::{FolioError, Result};
use crate::storage::backend::Storage;
use crate::storage::models::PreferenceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Format version for future migrations.
    version: u32,

    /// Preferences indexed by key.
    #[serde(default)]
    preferences: BTreeMap<String, PreferenceRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            preferences: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// `Send` but not `Sync`; it is owned by the single worker thread.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "preferences": {
///     "theme": { "key": "theme", "value": "dark", "updated_at": 1700000000 }
///   }
/// }
/// ```
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    /// Set when `data` has changes not yet on disk.
    dirty: bool,
}

impl JsonStorage {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store; nothing is written until the first
    /// preference is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but cannot be read or parsed.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(preference_count = data.preferences.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| FolioError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            preferences = data.preferences.len(),
            "loaded storage data"
        );
        Ok(data)
    }

    /// Writes the data to a temporary file and renames it over the target.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FolioError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let value = self.data.preferences.get(key).map(|r| r.value.clone());
        tracing::trace!(key = %key, found = value.is_some(), "preference lookup");
        Ok(value)
    }

    fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_preference", key = %key, value = %value).entered();

        if self.data.preferences.get(key).is_some_and(|r| r.value == value) {
            tracing::debug!("preference unchanged");
            return Ok(());
        }

        self.data
            .preferences
            .insert(key.to_string(), PreferenceRecord::new(key, value));
        self.dirty = true;
        self.save_to_file()
    }

    fn all_preferences(&self) -> Result<Vec<PreferenceRecord>> {
        let records: Vec<PreferenceRecord> = self.data.preferences.values().cloned().collect();
        tracing::debug!(count = records.len(), "retrieved preferences");
        Ok(records)
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preferences_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(storage.get_preference("theme").unwrap(), None);
        storage.set_preference("theme", "dark").unwrap();
        drop(storage);

        let storage = JsonStorage::new(path).unwrap();
        assert_eq!(storage.get_preference("theme").unwrap().as_deref(), Some("dark"));
        let all = storage.all_preferences().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].key, "theme");
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("preferences.json")).unwrap();
        storage.set_preference("theme", "dark").unwrap();
        storage.set_preference("theme", "light").unwrap();
        assert_eq!(storage.get_preference("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(storage.all_preferences().unwrap().len(), 1);
    }

    #[test]
    fn empty_store_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        drop(JsonStorage::new(path.clone()).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonStorage::new(path), Err(FolioError::Storage(_))));
    }
}
