//! Persisted cart storage.

use casaperf_cache::{Cache, KeyValueStore};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cart::line_item::{clamp_quantity, parse_quantity, CartItem};
use crate::error::CommerceError;
use crate::money::Money;
use crate::reconcile::coerce_price;

/// Storage key the cart lives under.
pub const CART_KEY: &str = "casaperf_cart_v1";

/// Reads and writes the whole cart under one key.
///
/// There is no merge or partial write: every save replaces what was stored,
/// so the last writer wins.
#[derive(Debug, Clone)]
pub struct CartRepository<S: KeyValueStore> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartRepository<S> {
    /// Repository over `cache` using [`CART_KEY`].
    pub fn new(cache: Cache<S>) -> Self {
        Self::with_key(cache, CART_KEY)
    }

    /// Repository over `cache` using a custom key.
    pub fn with_key(cache: Cache<S>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored cart, treating anything unreadable as empty.
    pub fn load(&self) -> Vec<CartItem> {
        match self.try_load() {
            Ok(items) => {
                debug!(key = %self.key, items = items.len(), "cart loaded");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable cart");
                Vec::new()
            }
        }
    }

    /// Load the stored cart, reporting why it could not be read.
    ///
    /// A missing key is an empty cart, not an error. Array elements are
    /// sanitized one by one: entries that are not objects are dropped, a
    /// missing title becomes empty (shown with the default title), prices and
    /// quantities are coerced into range, and repeated titles are merged by
    /// adding their quantities.
    pub fn try_load(&self) -> Result<Vec<CartItem>, CommerceError> {
        let raw = match self.cache.get_raw(&self.key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Value>(&raw)? {
            Value::Array(entries) => Ok(sanitize(entries)),
            other => Err(CommerceError::InvalidCartData(format!(
                "expected an array, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Overwrite the stored cart with `items`.
    pub fn save(&self, items: &[CartItem]) -> Result<(), CommerceError> {
        self.cache.set(&self.key, items)?;
        debug!(key = %self.key, items = items.len(), "cart saved");
        Ok(())
    }
}

fn sanitize(entries: Vec<Value>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(entries.len());

    for entry in entries {
        let Value::Object(fields) = entry else {
            continue;
        };
        let item = item_from_fields(&fields);

        match items.iter_mut().find(|i| i.title == item.title) {
            Some(existing) => {
                let merged = i64::from(existing.quantity) + i64::from(item.quantity);
                existing.quantity = clamp_quantity(merged);
            }
            None => items.push(item),
        }
    }

    items
}

fn item_from_fields(fields: &Map<String, Value>) -> CartItem {
    let title = match fields.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };

    let price = match fields.get("price") {
        Some(Value::Number(n)) => n.as_f64().map(Money::from_decimal).unwrap_or_default(),
        Some(Value::String(s)) => coerce_price(s),
        _ => Money::zero(),
    };

    let quantity = match fields.get("qty") {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(q) => clamp_quantity(q),
            None => n.as_f64().map_or(1, |q| clamp_quantity(q as i64)),
        },
        Some(Value::String(s)) => parse_quantity(s),
        _ => 1,
    };

    let image_url = fields
        .get("img")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    CartItem {
        title,
        price,
        quantity,
        image_url,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casaperf_cache::MemoryStore;
    use proptest::prelude::*;

    fn repository() -> (MemoryStore, CartRepository<MemoryStore>) {
        let backend = MemoryStore::new();
        let repo = CartRepository::new(Cache::new(backend.clone()));
        (backend, repo)
    }

    #[test]
    fn test_missing_key_is_empty() {
        let (_, repo) = repository();
        assert!(repo.try_load().unwrap().is_empty());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (backend, repo) = repository();
        let mut item = CartItem::new("Product A", Money::from_decimal(119.0), "a.jpg");
        item.set_quantity(2);
        let items = vec![item, CartItem::new("Product B", Money::from_decimal(45.5), "")];

        repo.save(&items).unwrap();
        assert!(backend.get(CART_KEY).unwrap().is_some());
        assert_eq!(repo.load(), items);
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let (backend, repo) = repository();
        backend.set(CART_KEY, "[{\"title\": ").unwrap();

        assert!(matches!(repo.try_load(), Err(CommerceError::Serialization(_))));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_non_array_loads_empty() {
        let (backend, repo) = repository();
        backend.set(CART_KEY, "{\"title\": \"A\"}").unwrap();

        assert!(matches!(repo.try_load(), Err(CommerceError::InvalidCartData(_))));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_reads_stored_format() {
        let (backend, repo) = repository();
        backend
            .set(
                CART_KEY,
                r#"[{"title":"Azzaro The Most Wanted Parfum","price":1290,"qty":2,"img":"azzaro.jpg"}]"#,
            )
            .unwrap();

        let items = repo.load();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Azzaro The Most Wanted Parfum");
        assert_eq!(items[0].price, Money::from_decimal(1290.0));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].image_url, "azzaro.jpg");
    }

    #[test]
    fn test_sanitizes_entries() {
        let (backend, repo) = repository();
        backend
            .set(
                CART_KEY,
                r#"[
                    42,
                    {"price": 10, "qty": 1},
                    {"title": "A", "price": "119", "qty": 0},
                    {"title": "B", "price": null, "qty": "3"},
                    {"title": "C", "price": -5, "qty": 2.9},
                    {"title": "A", "price": 119, "qty": 4}
                ]"#,
            )
            .unwrap();

        let items = repo.load();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["", "A", "B", "C"]);

        assert_eq!(items[0].price, Money::from_decimal(10.0));
        assert_eq!(items[1].price, Money::from_decimal(119.0));
        assert_eq!(items[1].quantity, 5);
        assert_eq!(items[2].price, Money::zero());
        assert_eq!(items[2].quantity, 3);
        assert_eq!(items[3].price, Money::zero());
        assert_eq!(items[3].quantity, 2);
        assert_eq!(items[3].image_url, "");
    }

    #[test]
    fn test_untitled_entries_are_kept() {
        let (backend, repo) = repository();
        backend
            .set(
                CART_KEY,
                r#"[{"price":250,"qty":2,"img":"x.jpg"},{"title":null,"price":250},{"title":7,"price":1}]"#,
            )
            .unwrap();

        let items = repo.load();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].image_url, "x.jpg");
        assert_eq!(items[1].title, "7");
    }

    #[test]
    fn test_large_stored_quantity_survives_reload() {
        let (backend, repo) = repository();
        backend
            .set(CART_KEY, r#"[{"title":"A","price":10,"qty":20000,"img":""}]"#)
            .unwrap();

        let items = repo.load();
        assert_eq!(items[0].quantity, 20_000);

        repo.save(&items).unwrap();
        assert_eq!(repo.load(), items);
    }

    #[test]
    fn test_custom_key() {
        let backend = MemoryStore::new();
        let repo = CartRepository::with_key(Cache::new(backend.clone()), "other_cart");
        repo.save(&[CartItem::new("A", Money::zero(), "")]).unwrap();

        assert_eq!(repo.key(), "other_cart");
        assert!(backend.get("other_cart").unwrap().is_some());
        assert!(backend.get(CART_KEY).unwrap().is_none());
    }

    proptest! {
        #[test]
        fn prop_persist_reload_roundtrip(
            entries in proptest::collection::vec(
                ("[A-Za-z ]{1,12}", 0u32..500_000, 1u32..=u32::MAX, "[a-z./]{0,10}"),
                0..8,
            )
        ) {
            let (_, repo) = repository();
            let mut items: Vec<CartItem> = Vec::new();
            for (title, centimes, qty, img) in entries {
                if items.iter().any(|i| i.title == title) {
                    continue;
                }
                let mut item = CartItem::new(title, Money::new(i64::from(centimes)), img);
                item.set_quantity(i64::from(qty));
                items.push(item);
            }

            repo.save(&items).unwrap();
            prop_assert_eq!(repo.load(), items);
        }
    }
}
