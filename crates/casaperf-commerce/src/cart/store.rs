//! The owned cart store.

use casaperf_cache::KeyValueStore;
use tracing::{debug, warn};

use crate::cart::line_item::{parse_quantity, CartItem};
use crate::cart::repository::CartRepository;
use crate::money::Money;

/// In-memory cart backed by a [`CartRepository`].
///
/// Constructed once per page, loading whatever was persisted. Every
/// operation is total: bad input is clamped or defaulted, and a failed
/// write is logged while the in-memory cart stays authoritative. Each
/// mutation is followed by a full save.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    items: Vec<CartItem>,
    repository: CartRepository<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store, loading the persisted cart.
    pub fn new(repository: CartRepository<S>) -> Self {
        let items = repository.load();
        Self { items, repository }
    }

    /// Add one unit of `title`.
    ///
    /// An existing item gains one unit; otherwise a new item with quantity 1
    /// is appended. Returns the item's new quantity.
    pub fn add_item(
        &mut self,
        title: impl Into<String>,
        price: impl Into<Money>,
        image_url: impl Into<String>,
    ) -> u32 {
        let title = title.into();
        let quantity = match self.items.iter_mut().find(|i| i.title == title) {
            Some(existing) => {
                existing.increment();
                existing.quantity
            }
            None => {
                let item = CartItem::new(title.clone(), price.into(), image_url);
                let quantity = item.quantity;
                self.items.push(item);
                quantity
            }
        };

        debug!(%title, quantity, "item added");
        self.persist();
        quantity
    }

    /// Remove `title` from the cart.
    ///
    /// Returns whether an item was removed. The cart is saved either way.
    pub fn remove_item(&mut self, title: &str) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.title != title);
        let removed = self.items.len() < len_before;

        debug!(%title, removed, "item removed");
        self.persist();
        removed
    }

    /// Set the quantity of `title` from user-entered text.
    ///
    /// Non-numeric text and values below 1 become 1. Returns `false`, without
    /// saving, when no item has that title.
    pub fn set_quantity(&mut self, title: &str, raw: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.title == title) else {
            debug!(%title, "quantity change for unknown item ignored");
            return false;
        };

        item.quantity = parse_quantity(raw);
        debug!(%title, quantity = item.quantity, "quantity set");
        self.persist();
        true
    }

    /// Sum of price × quantity over all items.
    pub fn subtotal(&self) -> Money {
        Money::sum(self.items.iter().map(CartItem::total))
    }

    /// Total number of units (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get an item by title.
    pub fn get_item(&self, title: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.title == title)
    }

    /// The repository this store saves to.
    pub fn repository(&self) -> &CartRepository<S> {
        &self.repository
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.items) {
            warn!(error = %e, "failed to persist cart");
        }
    }
}
