//! Widget state: the owned cart, the search index and transient UI flags.

use std::collections::BTreeSet;

use casaperf_cache::{Cache, KeyValueStore};
use casaperf_commerce::cart::{CartRepository, CartStore};
use casaperf_commerce::catalog::Product;
use casaperf_commerce::search::SearchIndex;

use crate::config::WidgetConfig;

/// Transient UI state. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Whether the cart drawer is open.
    pub cart_open: bool,
    /// Indices of the open navigation dropdowns, in document order.
    ///
    /// Dropdowns toggle independently. The page may also open one in its own
    /// markup, so the browser layer resyncs this set before dropdown events.
    pub open_dropdowns: BTreeSet<usize>,
    /// Last query typed in the search input.
    pub query: String,
    /// Results currently listed under the search input.
    pub results: Vec<Product>,
}

/// Everything a command handler may read or mutate.
pub struct WidgetState<S: KeyValueStore> {
    pub cart: CartStore<S>,
    pub search: SearchIndex,
    pub ui: UiState,
    pub config: WidgetConfig,
}

impl<S: KeyValueStore> WidgetState<S> {
    /// Load the cart persisted in `store` and index the embedded catalog.
    pub fn open(store: S, config: WidgetConfig) -> Self {
        Self::with_index(store, config, SearchIndex::embedded())
    }

    /// Like [`open`](Self::open) with a caller-provided index.
    pub fn with_index(store: S, config: WidgetConfig, search: SearchIndex) -> Self {
        let repository = CartRepository::with_key(Cache::new(store), config.storage_key.clone());
        Self {
            cart: CartStore::new(repository),
            search,
            ui: UiState::default(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casaperf_cache::MemoryStore;

    #[test]
    fn test_open_uses_configured_key() {
        let backend = MemoryStore::new();
        backend
            .set("other_cart", r#"[{"title":"A","price":10,"qty":2,"img":""}]"#)
            .unwrap();

        let config = WidgetConfig {
            storage_key: "other_cart".to_string(),
            ..Default::default()
        };
        let state = WidgetState::open(backend, config);

        assert_eq!(state.cart.item_count(), 2);
        assert_eq!(state.cart.repository().key(), "other_cart");
        assert_eq!(state.ui, UiState::default());
        assert_eq!(state.search.catalog().len(), 7);
    }

    #[test]
    fn test_open_on_empty_store() {
        let state = WidgetState::open(MemoryStore::new(), WidgetConfig::default());
        assert!(state.cart.is_empty());
        assert!(!state.ui.cart_open);
    }
}
