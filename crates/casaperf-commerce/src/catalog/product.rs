//! Product and catalog types.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CommerceError;

const EMBEDDED_CATALOG: &str = include_str!("../../catalog.toml");

/// A product the search bar can find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also what queries are matched against.
    pub name: String,
    /// Product page, relative to the site root.
    pub url: String,
    /// Category tag shown next to the name (e.g. "Homme").
    pub tag: String,
}

impl Product {
    pub fn new(name: impl Into<String>, url: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            tag: tag.into(),
        }
    }
}

/// A fixed, ordered list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "product", default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog from TOML (`[[product]]` tables).
    pub fn from_toml(source: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(source)?)
    }

    /// The catalog shipped with the widget.
    ///
    /// Falls back to an empty catalog, with a warning, if the embedded file
    /// does not parse.
    pub fn embedded() -> Self {
        Self::from_toml(EMBEDDED_CATALOG).unwrap_or_else(|e| {
            warn!(error = %e, "embedded catalog is invalid, search disabled");
            Self::default()
        })
    }

    /// Products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
