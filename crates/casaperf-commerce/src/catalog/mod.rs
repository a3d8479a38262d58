//! Catalog module.
//!
//! The searchable product list, embedded at build time.

mod product;

pub use product::{Catalog, Product};
