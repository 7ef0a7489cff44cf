use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Error as SerdeError;

use crate::domain::app_state::Preferences;

/// Slot holding the user's preferences.
pub const PREFERENCES_KEY: &str = "preferences";

/// Durable text slots addressed by a fixed key.
///
/// A write replaces the whole slot; readers never observe a partial value.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, key: &str, text: &str) -> Result<(), PersistenceError>;
}

/// Stores each key as `<key>.json` inside one directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn slot_path(&self, key: &str) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let Some(path) = self.slot_path(key) else {
            return Ok(None);
        };
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, text: &str) -> Result<(), PersistenceError> {
        let path = self
            .slot_path(key)
            .ok_or(PersistenceError::StorageUnavailable)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, text)?;
        if let Err(err) = fs::rename(&staging, &path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                tracing::warn!(path = %staging.display(), error = %cleanup, "could not remove staging file");
            }
            return Err(err.into());
        }
        tracing::debug!(path = %path.display(), bytes = text.len(), "wrote storage slot");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to encode saved data: {0}")]
    Encode(#[from] SerdeError),
}

pub fn load_preferences(store: &impl KeyValueStore) -> Preferences {
    let text = match store.read(PREFERENCES_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return Preferences::default(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read preferences, using defaults");
            return Preferences::default();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "stored preferences are unreadable, using defaults");
        Preferences::default()
    })
}

pub fn save_preferences(
    store: &mut impl KeyValueStore,
    preferences: &Preferences,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(preferences)?;
    store.write(PREFERENCES_KEY, &json)
}

#[cfg(test)]
pub use memory::MemoryStore;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateStyle;

    #[test]
    fn file_store_round_trips_slots() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(Some(dir.path().join("nested")));

        assert_eq!(store.read("ledger").unwrap(), None);
        store.write("ledger", "[1,2,3]").unwrap();
        assert_eq!(store.read("ledger").unwrap().as_deref(), Some("[1,2,3]"));

        store.write("ledger", "[]").unwrap();
        assert_eq!(store.read("ledger").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("nested").join("ledger.json.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("ledger.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();
        let mut store = FileStore::new(Some(dir.path().to_path_buf()));

        assert!(matches!(store.write("ledger", "[]"), Err(PersistenceError::Io(_))));
        assert!(!dir.path().join("ledger.json.tmp").exists());
    }

    #[test]
    fn missing_root_reads_nothing_and_refuses_writes() {
        let mut store = FileStore::new(None);

        assert_eq!(store.read("ledger").unwrap(), None);
        assert!(matches!(
            store.write("ledger", "[]"),
            Err(PersistenceError::StorageUnavailable)
        ));
    }

    #[test]
    fn preferences_fall_back_to_defaults() {
        let corrupt = MemoryStore::with_slot(PREFERENCES_KEY, "{not json");
        assert_eq!(load_preferences(&corrupt), Preferences::default());
        assert_eq!(load_preferences(&MemoryStore::default()), Preferences::default());
    }

    #[test]
    fn preferences_survive_a_save() {
        let mut store = MemoryStore::default();
        let preferences = Preferences {
            date_style: DateStyle::Iso,
        };

        save_preferences(&mut store, &preferences).unwrap();
        assert_eq!(load_preferences(&store), preferences);
    }
}
