//! File-backed state store.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{StateStore, StorageError};

/// Persists each key as a JSON file inside a data directory.
///
/// Writes land in a sibling temp file first and are renamed into place,
/// so an interrupted write cannot truncate previously saved state.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory the store writes into.
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Some(raw),
            Err(error) if error.kind() == ErrorKind::NotFound => None,
            Err(error) => {
                tracing::warn!(key, %error, "failed to read persisted state");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let staged = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&staged, value)?;
        fs::rename(&staged, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Err(error) = fs::remove_file(self.path_for(key)) {
            if error.kind() != ErrorKind::NotFound {
                tracing::warn!(key, %error, "failed to remove persisted state");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
