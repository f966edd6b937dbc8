//! Key-value persistence boundary.
//!
//! Everything wellspring persists is a string stored under a string key: the
//! serialized entry lists and one locator per audio reference. This module
//! defines the [`KeyValueStore`] trait that the repositories are written
//! against, plus an in-memory implementation. The on-disk implementation
//! lives in [`sqlite`].
//!
//! # Module Structure
//!
//! - `sqlite`: SQLite-backed store with a connection pool and
//!   transactional batch writes

pub mod sqlite;

use crate::errors::StoreError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

pub use sqlite::SqliteStore;

/// A store shared by every component of a [`Companion`](crate::Companion).
pub type SharedStore = Arc<dyn KeyValueStore>;

/// String key/value persistence.
///
/// Implementations take `&self` and handle their own interior mutability so
/// a single store can back several repositories at once.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Writes every pair in order.
    ///
    /// The default implementation issues one `set` per pair and gives no
    /// atomicity across keys: a failure part-way leaves the earlier pairs
    /// written. Stores with a transactional primitive override this so the
    /// batch lands entirely or not at all.
    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// A volatile store backed by a `HashMap`.
///
/// Used for tests and for previewing the app without touching disk.
///
/// # Examples
///
/// ```
/// use wellspring::store::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("greeting", "hello").unwrap();
/// assert_eq!(store.get("greeting").unwrap(), Some("hello".to_string()));
/// assert_eq!(store.get("missing").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every key currently held, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let values = self.values.read().map_err(poisoned)?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Writing {} bytes under key {}", value.len(), key);
        let mut values = self.values.write().map_err(poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(poisoned)?;
        values.remove(key);
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StoreError> {
        // One write guard for the whole batch, so it applies atomically.
        let mut values = self.values.write().map_err(poisoned)?;
        for (key, value) in pairs {
            values.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Store doubles for exercising failure paths.

    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Wraps a [`MemoryStore`] and fails reads or writes on demand.
    ///
    /// `fail_key` restricts failures to one key so the default, non-atomic
    /// `set_many` can be observed failing half-way.
    #[derive(Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
        fail_key: RwLock<Option<String>>,
    }

    impl FlakyStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        pub fn fail_only_key(&self, key: &str) {
            *self.fail_key.write().unwrap() = Some(key.to_string());
            self.fail_writes(true);
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Backend(format!("injected read failure for {}", key)));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                let only = self.fail_key.read().unwrap().clone();
                if only.as_deref().map_or(true, |k| k == key) {
                    return Err(StoreError::Backend(format!("injected failure for {}", key)));
                }
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FlakyStore;
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Removing again is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_memory_store_set_many_and_keys() {
        let store = MemoryStore::new();
        store.set_many(&[("b", "2"), ("a", "1")]).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_default_set_many_is_not_atomic() {
        let store = FlakyStore::new();
        store.fail_only_key("second");

        let result = store.set_many(&[("first", "1"), ("second", "2")]);
        assert!(result.is_err());
        assert_eq!(store.get("first").unwrap(), Some("1".to_string()));
        assert_eq!(store.get("second").unwrap(), None);
    }

    #[test]
    fn test_shared_store_is_object_safe() {
        let shared: SharedStore = Arc::new(MemoryStore::new());
        shared.set("x", "y").unwrap();
        assert_eq!(shared.get("x").unwrap().as_deref(), Some("y"));
    }
}
