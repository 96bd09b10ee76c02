//! Key/value persistence abstraction.
//!
//! The catalog only needs a synchronous string store with `get` and `set`.
//! The browser build plugs in `localStorage`; tests and native hosts use the
//! in-memory or file-backed stores.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Failure reported by a key/value backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached (e.g. storage disabled in the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write (e.g. quota exceeded).
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// Synchronous string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S> KeyValueStore for Rc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.inner.write() {
            map.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StorageError::Unavailable("in-memory store lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Unavailable("in-memory store lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
