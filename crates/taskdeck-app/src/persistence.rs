//! Load/save bridge between the task store and a durable key-value backend.

use std::fmt;
use std::rc::Rc;

use anyhow::Error;
use taskdeck_core::{Category, Task};
use taskdeck_store::{FileStore, MemoryStore, StoreError};
use thiserror::Error;

/// The two collections kept in durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// Sequence of tasks.
    Tasks,
    /// Sequence of categories.
    Categories,
}

impl CollectionKey {
    /// Storage key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Categories => "categories",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal storage abstraction required by the task store.
///
/// Payloads are serialized collections; the backend treats them as opaque text.
pub trait Persistence {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Read the serialized collection stored under `key`, if any.
    ///
    /// # Errors
    /// Returns a store-specific error when the value cannot be read.
    fn load(&self, key: CollectionKey) -> Result<Option<String>, Self::Error>;

    /// Replace the serialized collection stored under `key`.
    ///
    /// # Errors
    /// Returns a store-specific error when the value cannot be written.
    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), Self::Error>;
}

impl Persistence for FileStore {
    type Error = StoreError;

    fn load(&self, key: CollectionKey) -> Result<Option<String>, Self::Error> {
        Self::load(self, key.as_str())
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), Self::Error> {
        Self::save(self, key.as_str(), payload)
    }
}

impl Persistence for MemoryStore {
    type Error = StoreError;

    fn load(&self, key: CollectionKey) -> Result<Option<String>, Self::Error> {
        Self::load(self, key.as_str())
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), Self::Error> {
        Self::save(self, key.as_str(), payload)
    }
}

impl<S: Persistence + ?Sized> Persistence for &S {
    type Error = S::Error;

    fn load(&self, key: CollectionKey) -> Result<Option<String>, Self::Error> {
        (**self).load(key)
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), Self::Error> {
        (**self).save(key, payload)
    }
}

impl<S: Persistence + ?Sized> Persistence for Rc<S> {
    type Error = S::Error;

    fn load(&self, key: CollectionKey) -> Result<Option<String>, Self::Error> {
        (**self).load(key)
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), Self::Error> {
        (**self).save(key, payload)
    }
}

/// Failure converting a collection to or from its stored form.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Collection could not be serialized.
    #[error("failed to encode {key}: {source}")]
    Encode {
        /// Collection being encoded.
        key: CollectionKey,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
    /// Stored payload is not a valid collection.
    #[error("failed to decode {key}: {source}")]
    Decode {
        /// Collection being decoded.
        key: CollectionKey,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize tasks as an ordered JSON array of flat records.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|source| CodecError::Encode {
        key: CollectionKey::Tasks,
        source,
    })
}

/// Parse a stored task array.
///
/// # Errors
/// Returns an error if the payload is not a valid task array.
pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(payload).map_err(|source| CodecError::Decode {
        key: CollectionKey::Tasks,
        source,
    })
}

/// Serialize categories as an ordered JSON array.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode_categories(categories: &[Category]) -> Result<String, CodecError> {
    serde_json::to_string(categories).map_err(|source| CodecError::Encode {
        key: CollectionKey::Categories,
        source,
    })
}

/// Parse a stored category array.
///
/// # Errors
/// Returns an error if the payload is not a valid category array.
pub fn decode_categories(payload: &str) -> Result<Vec<Category>, CodecError> {
    serde_json::from_str(payload).map_err(|source| CodecError::Decode {
        key: CollectionKey::Categories,
        source,
    })
}
