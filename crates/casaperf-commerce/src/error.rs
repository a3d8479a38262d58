//! Commerce error types.
//!
//! None of these reach the shopper: the cart and search operations absorb
//! them into defaults. They exist so storage and catalog problems can be
//! logged and asserted on in tests.

use casaperf_cache::CacheError;
use thiserror::Error;

/// Errors that can occur while loading or saving commerce data.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Underlying key-value store failed.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Stored or embedded JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted cart data had an unexpected shape.
    #[error("Invalid cart data: {0}")]
    InvalidCartData(String),

    /// Product catalog could not be parsed.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Catalog(e.to_string())
    }
}
