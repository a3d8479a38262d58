//! Raw string key-value backends.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::CacheError;

/// A string key-value store scoped to one origin.
///
/// Implementations are single-threaded: the widget runs on the browser's UI
/// thread and never shares a store across threads.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }
}

/// In-memory store used for native builds and tests.
///
/// Clones share the same underlying map, so a test can keep a handle to the
/// backend after handing a clone to a [`Cache`](crate::Cache).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser `localStorage` for the current origin.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the window's `localStorage`.
    ///
    /// Fails when there is no window or storage is disabled (private mode
    /// in some browsers, sandboxed iframes).
    pub fn open() -> Result<Self, CacheError> {
        let window =
            web_sys::window().ok_or_else(|| CacheError::OpenError("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::OpenError(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::OpenError("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage
            .get_item(key)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }
}
