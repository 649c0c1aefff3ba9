use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::{StoreError, validate_key};

/// Volatile store keeping values in a map.
///
/// Writes can be made to fail with [`MemoryStore::fail_writes`] to exercise
/// error paths of callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    #[must_use]
    pub fn with_value(self, key: &str, payload: &str) -> Self {
        self.values.borrow_mut().insert(key.to_owned(), payload.to_owned());
        self
    }

    /// Make every following [`MemoryStore::save`] fail (or succeed again).
    pub fn fail_writes(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the key is invalid.
    pub fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.borrow().get(key).cloned())
    }

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the key is invalid or writes were set to fail.
    pub fn save(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.failing.get() {
            return Err(StoreError::Unavailable(format!("write to {key} rejected")));
        }
        self.values.borrow_mut().insert(key.to_owned(), payload.to_owned());
        Ok(())
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// True when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_writes_keep_previous_value() {
        let store = MemoryStore::new().with_value("tasks", "[]");
        store.fail_writes(true);
        assert!(matches!(store.save("tasks", "[1]"), Err(StoreError::Unavailable(_))));
        assert_eq!(store.load("tasks").ok().flatten().as_deref(), Some("[]"));

        store.fail_writes(false);
        assert!(store.save("tasks", "[1]").is_ok());
        assert_eq!(store.load("tasks").ok().flatten().as_deref(), Some("[1]"));
    }

    #[test]
    fn missing_keys_load_as_none() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.load("categories").ok().flatten(), None);
    }
}
