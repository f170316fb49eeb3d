//! PersistedToggleState: the enabled flag and its best-effort persistence.
//!
//! # Storage is a capability, not a guarantee
//!
//! Browser storage can be unavailable (restricted browsing contexts, quota
//! errors, sandboxed iframes).  The widget must keep working regardless, so
//! every storage failure here is logged at `debug!` and swallowed:
//!
//! | Situation                    | `load()` | `toggle()`                       |
//! |------------------------------|----------|----------------------------------|
//! | key absent                   | `false`  | flips and persists               |
//! | value not `"true"`/`"false"` | `false`  | flips and persists               |
//! | read fails                   | `false`  | n/a                              |
//! | write fails                  | n/a      | flips in memory, write is lost   |
//!
//! The current flag is published on a `tokio::sync::watch` channel so other
//! components (the presence check) can read it without sharing the whole
//! state object.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Error type for key/value storage access.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage cannot be reached at all in this context.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Storage is reachable but refused the write (quota, read-only).
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// Durable string key/value storage.
///
/// The browser implementation wraps `localStorage`; in-memory and
/// always-failing implementations live in `infrastructure::storage`.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Reads `key`.  `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The enabled/disabled flag, mirrored into a [`KeyValueStore`].
pub struct PersistedToggleState {
    store: Arc<dyn KeyValueStore>,
    key: String,
    enabled: watch::Sender<bool>,
}

impl PersistedToggleState {
    /// Creates the state with the flag off.  Nothing is read until
    /// [`load`](Self::load) is called.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let (enabled, _) = watch::channel(false);
        Self {
            store,
            key: key.into(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled.borrow()
    }

    /// Receiver that always sees the current flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.enabled.subscribe()
    }

    /// Reads the persisted flag.
    ///
    /// Returns `false` when the key is absent, unparsable, or storage fails.
    /// Does not change the in-memory flag; activation of a restored "on"
    /// state is the bootstrapper's decision.
    pub fn load(&self) -> bool {
        match self.store.get(&self.key) {
            Ok(Some(value)) => match value.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    debug!(key = %self.key, value = other, "unparsable persisted flag; treating as off");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                debug!(key = %self.key, "persisted flag unreadable: {e}");
                false
            }
        }
    }

    /// Flips the flag, persists it best-effort, and returns the new value.
    pub fn toggle(&self) -> bool {
        let mut now = false;
        self.enabled.send_modify(|enabled| {
            *enabled = !*enabled;
            now = *enabled;
        });
        self.persist(now);
        now
    }

    /// Sets the in-memory flag without writing storage.
    ///
    /// Used when re-activating a flag that was just read from storage.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.send_replace(enabled);
    }

    fn persist(&self, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = self.store.set(&self.key, value) {
            debug!(key = %self.key, "could not persist auto-resize flag: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "vnc_autoresize";

    fn state_with(store: MockKeyValueStore) -> PersistedToggleState {
        PersistedToggleState::new(Arc::new(store), KEY)
    }

    #[test]
    fn test_load_returns_true_for_persisted_true() {
        // Arrange
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == KEY)
            .returning(|_| Ok(Some("true".to_string())));

        // Act / Assert
        assert!(state_with(store).load());
    }

    #[test]
    fn test_load_returns_false_when_absent() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        assert!(!state_with(store).load());
    }

    #[test]
    fn test_load_returns_false_for_unparsable_value() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("yes please".to_string())));
        assert!(!state_with(store).load());
    }

    #[test]
    fn test_load_swallows_storage_failure() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::Unavailable("sandboxed".to_string())));
        assert!(!state_with(store).load());
    }

    #[test]
    fn test_load_does_not_change_in_memory_flag() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("true".to_string())));
        let state = state_with(store);

        assert!(state.load());
        assert!(!state.is_enabled());
    }

    #[test]
    fn test_toggle_flips_and_persists_each_value() {
        // Arrange: expect "true" then "false" under the fixed key.
        let mut store = MockKeyValueStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_set()
            .withf(|key, value| key == KEY && value == "true")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_set()
            .withf(|key, value| key == KEY && value == "false")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        let state = state_with(store);

        // Act / Assert
        assert!(state.toggle());
        assert!(!state.toggle());
        assert!(!state.is_enabled());
    }

    #[test]
    fn test_toggle_takes_effect_even_when_write_fails() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .returning(|_, _| Err(StorageError::WriteRejected("quota".to_string())));
        let state = state_with(store);

        assert!(state.toggle());
        assert!(state.is_enabled());
    }

    #[test]
    fn test_subscribers_observe_toggles() {
        let mut store = MockKeyValueStore::new();
        store.expect_set().returning(|_, _| Ok(()));
        let state = state_with(store);
        let rx = state.subscribe();

        state.toggle();

        assert!(*rx.borrow());
    }

    #[test]
    fn test_set_enabled_does_not_write_storage() {
        // No expectations: any call to the mock would panic.
        let state = state_with(MockKeyValueStore::new());

        state.set_enabled(true);

        assert!(state.is_enabled());
    }
}
