//! Key/value storage adapters.
//!
//! - [`MemoryStore`]: a `HashMap` behind a mutex.  Can be told to reject
//!   writes, which is how tests reproduce a full or read-only store.
//! - [`UnavailableStore`]: every call fails, like `localStorage` inside a
//!   sandboxed frame.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::application::toggle_state::{KeyValueStore, StorageError};

/// In-memory [`KeyValueStore`].
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    /// When `true`, `set` returns `StorageError::WriteRejected`.
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `key = value`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    /// Current value of `key`, bypassing the trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::WriteRejected("memory store is read-only".into()));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A [`KeyValueStore`] that cannot be reached at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}
