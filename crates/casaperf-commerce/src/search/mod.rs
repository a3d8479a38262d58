//! Search module.
//!
//! Accent- and case-insensitive substring search over the catalog.

mod index;
mod normalize;

pub use index::{SearchIndex, SubmitOutcome};
pub use normalize::normalize;
