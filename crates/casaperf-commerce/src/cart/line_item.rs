//! Cart line items.

use crate::money::Money;
use crate::reconcile::parse_int_prefix;
use serde::{Deserialize, Serialize};

/// Smallest quantity a line item can hold.
pub const MIN_QUANTITY: u32 = 1;

/// A line item in the cart.
///
/// The title is the item's identity: a cart never holds two items with the
/// same title. Field names on the wire match the stored format
/// (`title`, `price`, `qty`, `img`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product title, unique within the cart.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Quantity, never below `MIN_QUANTITY`.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Thumbnail URL, possibly empty.
    #[serde(rename = "img", default)]
    pub image_url: String,
}

impl CartItem {
    /// Create a new line item with quantity 1.
    pub fn new(title: impl Into<String>, price: Money, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            quantity: MIN_QUANTITY,
            image_url: image_url.into(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn total(&self) -> Money {
        self.price.multiply(self.quantity)
    }

    /// Set the quantity. Values below 1 become 1.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = clamp_quantity(quantity);
    }

    /// Add one to the quantity.
    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}

/// Raise a raw quantity to at least `MIN_QUANTITY`, saturating at `u32::MAX`.
pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(i64::from(MIN_QUANTITY))).unwrap_or(u32::MAX)
}

/// Parse user-entered quantity text.
///
/// Reads a leading integer (`"3.7"` is 3, `"12abc"` is 12); text without one
/// and values below 1 become 1.
pub fn parse_quantity(raw: &str) -> u32 {
    parse_int_prefix(raw).map_or(MIN_QUANTITY, clamp_quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item() {
        let item = CartItem::new("Product A", Money::from_decimal(119.0), "");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.total(), Money::from_decimal(119.0));
    }

    #[test]
    fn test_total_scales_with_quantity() {
        let mut item = CartItem::new("Product A", Money::from_decimal(119.0), "");
        item.set_quantity(3);
        assert_eq!(item.total(), Money::from_decimal(357.0));
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut item = CartItem::new("Product A", Money::zero(), "");
        item.set_quantity(0);
        assert_eq!(item.quantity, 1);
        item.set_quantity(-7);
        assert_eq!(item.quantity, 1);
        item.set_quantity(20_000);
        assert_eq!(item.quantity, 20_000);
    }

    #[test]
    fn test_large_quantities_are_kept() {
        let mut item = CartItem::new("Product A", Money::zero(), "");
        item.set_quantity(9999);
        item.increment();
        assert_eq!(item.quantity, 10_000);

        item.set_quantity(i64::MAX);
        assert_eq!(item.quantity, u32::MAX);
        item.increment();
        assert_eq!(item.quantity, u32::MAX);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("4"), 4);
        assert_eq!(parse_quantity(" 3.7"), 3);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-2"), 1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("12345"), 12_345);
        assert_eq!(parse_quantity("99999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_wire_field_names() {
        let item = CartItem::new("Product A", Money::from_decimal(119.0), "a.jpg");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["title"], "Product A");
        assert_eq!(json["price"], 119.0);
        assert_eq!(json["qty"], 1);
        assert_eq!(json["img"], "a.jpg");
    }
}
