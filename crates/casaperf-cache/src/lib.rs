//! Type-safe key-value persistence layer for the Casaperf widget.
//!
//! Provides a small, ergonomic API for keeping data in the browser's
//! origin-scoped `localStorage` with automatic JSON serialization. Native
//! builds use an in-memory backend so the same code runs under `cargo test`.
//!
//! # Example
//!
//! ```rust
//! use casaperf_cache::{Cache, KeyValueStore, MemoryStore};
//!
//! let backend = MemoryStore::new();
//! let cache = Cache::new(backend.clone());
//!
//! cache.set("casaperf_cart_v1", &[1, 2, 3]).unwrap();
//! assert_eq!(backend.get("casaperf_cart_v1").unwrap().as_deref(), Some("[1,2,3]"));
//! assert_eq!(cache.get_raw("missing").unwrap(), None);
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore};
}
