//! In-memory search index over the catalog.

use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::search::normalize;

/// What an explicit search submission resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome<'a> {
    /// The query normalizes to nothing; the submission is ignored.
    Empty,
    /// Go to this product. `exact` is set when the whole name matched.
    Navigate { product: &'a Product, exact: bool },
    /// Nothing in the catalog contains the query.
    NotFound,
}

/// Catalog plus the normalized form of each product name.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    catalog: Catalog,
    keys: Vec<String>,
}

impl SearchIndex {
    /// Index `catalog`, normalizing every name once.
    pub fn new(catalog: Catalog) -> Self {
        let keys = catalog
            .products()
            .iter()
            .map(|p| normalize(&p.name))
            .collect();
        Self { catalog, keys }
    }

    /// Index over the embedded catalog.
    pub fn embedded() -> Self {
        Self::new(Catalog::embedded())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Products whose name contains `query`, in catalog order.
    ///
    /// Matching ignores case, accents and surrounding whitespace. A query
    /// that normalizes to nothing matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let matches: Vec<&Product> = self
            .entries()
            .filter(|(key, _)| key.contains(needle.as_str()))
            .map(|(_, product)| product)
            .collect();
        debug!(query = %needle, matches = matches.len(), "search");
        matches
    }

    /// Resolve an explicit form submission.
    ///
    /// Prefers a product whose whole name equals the query, then the first
    /// product containing it.
    pub fn submit(&self, query: &str) -> SubmitOutcome<'_> {
        let needle = normalize(query);
        if needle.is_empty() {
            return SubmitOutcome::Empty;
        }

        if let Some((_, product)) = self.entries().find(|(key, _)| *key == needle) {
            return SubmitOutcome::Navigate {
                product,
                exact: true,
            };
        }

        match self.entries().find(|(key, _)| key.contains(needle.as_str())) {
            Some((_, product)) => SubmitOutcome::Navigate {
                product,
                exact: false,
            },
            None => SubmitOutcome::NotFound,
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.catalog.products())
    }
}
