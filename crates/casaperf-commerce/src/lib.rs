//! Cart, catalog and search logic for the Casaperf widget.
//!
//! Everything here is presentation-free and runs natively under test:
//!
//! - **Cart**: line items, the owned [`CartStore`](cart::CartStore), and the
//!   repository that persists it under one storage key
//! - **Catalog**: the embedded, read-only product list
//! - **Search**: accent-insensitive substring matching over the catalog
//! - **Reconcile**: deriving add-to-cart data from product-card markup
//!
//! # Example
//!
//! ```rust
//! use casaperf_cache::{Cache, MemoryStore};
//! use casaperf_commerce::prelude::*;
//!
//! let repository = CartRepository::new(Cache::new(MemoryStore::new()));
//! let mut cart = CartStore::new(repository);
//!
//! cart.add_item("Azzaro The Most Wanted Parfum", 1290.0, "");
//! cart.add_item("Azzaro The Most Wanted Parfum", 1290.0, "");
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.subtotal().display(), "2\u{202f}580 DH");
//!
//! let index = SearchIndex::embedded();
//! assert_eq!(index.search("wanted").len(), 1);
//! ```

pub mod error;
pub mod money;
pub mod reconcile;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use money::{CurrencyFormat, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::money::{CurrencyFormat, Money};

    // Cart
    pub use crate::cart::{CartItem, CartRepository, CartStore, CART_KEY};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Search
    pub use crate::search::{normalize, SearchIndex, SubmitOutcome};

    // Reconcile
    pub use crate::reconcile::{
        resolve_add_to_cart, AddToCartRequest, CardAttributes, PricingVariant, TriggerAttributes,
    };
}
