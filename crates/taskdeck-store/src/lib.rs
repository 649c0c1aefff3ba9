//! Durable key-value backends for taskdeck collections.
//!
//! Values are opaque strings; the application layer decides their format.

/// Error types for store operations.
pub mod error;
/// In-memory store used for tests and ephemeral sessions.
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage based on one `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;
        info!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidKey`] for empty keys or keys with characters
    /// other than ASCII alphanumerics, `-` and `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Read the value stored under `key`. A missing file yields `None`.
    ///
    /// # Errors
    /// Returns an error if the key is invalid or the file cannot be read.
    pub fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(key, bytes = contents.len(), "Loaded value");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(key, "No stored value");
                Ok(None)
            }
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Replace the value stored under `key`.
    ///
    /// The payload is written to a sibling temporary file first and then
    /// renamed over the target, so readers never observe a partial write.
    ///
    /// # Errors
    /// Returns an error if the key is invalid or any file operation fails.
    pub fn save(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let write_err = |source| StoreError::Write {
            path: tmp.clone(),
            source,
        };

        let mut file = fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(payload.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&tmp, &path).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(key, bytes = payload.len(), "Saved value");
        Ok(())
    }

    /// Delete the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the key is invalid or the file cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}
