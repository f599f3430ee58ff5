//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use genr_core::storage::KeyValueStore;
use genr_core::{GenrError, Result};
use tracing::{debug, warn};

use super::atomic_json::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// All keys live in one JSON object file. Each `set`/`remove` is a locked
/// read-modify-write followed by an atomic replace.
///
/// A file that is not a JSON object of strings is moved aside and the store
/// continues empty.
pub struct JsonFileStore {
    file: AtomicJsonFile<Entries>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Opens the store at the default location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::paths::GenrPaths::store_file()?))
    }

    fn entries(&self) -> Result<Entries> {
        match self.file.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(e) if e.is_serialization() => {
                self.set_aside(&e)?;
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }

    fn modify(&self, f: impl Fn(&mut Entries)) -> Result<()> {
        match self.file.update(Entries::new(), &f) {
            Err(e) if e.is_serialization() => {
                self.set_aside(&e)?;
                self.file.update(Entries::new(), &f)
            }
            other => other,
        }
    }

    fn set_aside(&self, error: &GenrError) -> Result<()> {
        let moved = self.file.quarantine()?;
        warn!(
            error = %error,
            moved_to = %moved.display(),
            "Store file unreadable, moved aside and starting empty"
        );
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, bytes = value.len(), "Writing key");
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        debug!(key, "Removing key");
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
