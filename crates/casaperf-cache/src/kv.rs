//! JSON-encoding wrapper over a raw key-value backend.

use crate::store::KeyValueStore;
use crate::CacheError;
use serde::Serialize;

/// JSON cache over a [`KeyValueStore`].
///
/// Values are written as JSON text. Reads hand back the stored text so
/// callers can recover what they can from data written by other versions.
#[derive(Debug, Clone)]
pub struct Cache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap an existing backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the raw stored text, `None` if the key is absent.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Serialize `value` and store it, replacing whatever was there.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("casaperf_cart_v1", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        tracing::trace!(key, bytes = text.len(), "cache write");
        self.store.set(key, &text)
    }
}
