//! Storage error types.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore) or while
/// encoding values for one.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend is unavailable (no window, storage disabled).
    #[error("Storage unavailable: {0}")]
    OpenError(String),

    /// A value could not be encoded to or decoded from JSON.
    #[error("JSON error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The backend rejected a read or write, e.g. quota exceeded.
    #[error("Storage access failed: {0}")]
    StoreError(String),
}
