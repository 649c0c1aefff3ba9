//! Error types for taskdeck store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key contains characters that cannot be used in a file name.
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    /// Reading a stored value failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a stored value failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Store was configured to reject writes.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
