//! Shopping cart module.
//!
//! Contains the line item type, the persisted cart repository and the
//! owned cart store every mutation goes through.

mod line_item;
mod repository;
mod store;

pub use line_item::{clamp_quantity, parse_quantity, CartItem, MIN_QUANTITY};
pub use repository::{CartRepository, CART_KEY};
pub use store::CartStore;
