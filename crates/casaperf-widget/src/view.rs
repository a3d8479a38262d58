//! View models for the cart drawer and the search dropdown.
//!
//! Built from state without touching the DOM, so everything a shopper sees
//! can be checked natively. The `dom` module only commits these to the page.

use casaperf_cache::KeyValueStore;
use casaperf_commerce::cart::CartStore;
use casaperf_commerce::catalog::Product;

use crate::config::WidgetConfig;

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    /// Stored title, used to address the item from row controls.
    pub key: String,
    /// Title shown to the shopper.
    pub title: String,
    pub image_src: String,
    /// Unit price, formatted.
    pub price_label: String,
    pub quantity: u32,
}

/// The cart drawer, header badge included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDrawerView {
    pub rows: Vec<CartRowView>,
    pub subtotal_label: String,
    /// Total units, as shown in the header badge.
    pub badge_label: String,
    pub is_empty: bool,
}

impl CartDrawerView {
    pub fn build<S: KeyValueStore>(cart: &CartStore<S>, config: &WidgetConfig) -> Self {
        let rows = cart
            .items()
            .iter()
            .map(|item| CartRowView {
                key: item.title.clone(),
                title: fallback(&item.title, &config.default_title),
                image_src: fallback(&item.image_url, &config.placeholder_image),
                price_label: item.price.format(&config.currency),
                quantity: item.quantity,
            })
            .collect();

        Self {
            rows,
            subtotal_label: cart.subtotal().format(&config.currency),
            badge_label: cart.item_count().to_string(),
            is_empty: cart.is_empty(),
        }
    }
}

/// One entry of the search dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultView {
    pub name: String,
    pub url: String,
    pub tag: String,
}

/// The search dropdown. Hidden whenever it has no entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultsView {
    pub visible: bool,
    pub items: Vec<SearchResultView>,
}

impl SearchResultsView {
    pub fn build(results: &[Product]) -> Self {
        let items: Vec<SearchResultView> = results
            .iter()
            .map(|p| SearchResultView {
                name: p.name.clone(),
                url: p.url.clone(),
                tag: p.tag.clone(),
            })
            .collect();
        Self {
            visible: !items.is_empty(),
            items,
        }
    }
}

/// Display value for a quantity input while the shopper is typing.
///
/// Numeric text below 1 becomes `"1"`. Empty or non-numeric text is left
/// alone so the shopper can keep editing; it is clamped on commit.
pub fn clamp_live_quantity(raw: &str) -> Option<&'static str> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value < 1.0 => Some("1"),
        _ => None,
    }
}

fn fallback(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
