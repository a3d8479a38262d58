//! Widget configuration.
//!
//! Every field has a default matching the storefront's markup, so a page
//! needs no configuration at all. A page can override any subset by
//! embedding TOML in `<script type="application/toml" id="casaperf-config">`.

use casaperf_commerce::cart::CART_KEY;
use casaperf_commerce::CurrencyFormat;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::WidgetError;

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Storage key the cart is persisted under.
    pub storage_key: String,

    /// Price display format.
    pub currency: CurrencyFormat,

    /// Thumbnail shown for items without an image.
    pub placeholder_image: String,

    /// Title used when none can be resolved.
    pub default_title: String,

    /// Checkout page opened by non-link checkout controls.
    pub checkout_url: String,

    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    pub log_level: String,

    /// Shopper-facing text.
    pub texts: Texts,

    /// Selectors for the page elements the widget reads and writes.
    pub hooks: DomHooks,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_KEY.to_string(),
            currency: CurrencyFormat::default(),
            placeholder_image: "https://via.placeholder.com/64?text=Parfum".to_string(),
            default_title: "Produit".to_string(),
            checkout_url: "commande.html".to_string(),
            log_level: "info".to_string(),
            texts: Texts::default(),
            hooks: DomHooks::default(),
        }
    }
}

impl WidgetConfig {
    /// Parse a configuration, filling omitted fields with defaults.
    pub fn from_toml(source: &str) -> Result<Self, WidgetError> {
        Ok(toml::from_str(source)?)
    }

    /// Parsed log level; unknown names fall back to `INFO`.
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

/// Shopper-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Texts {
    /// Toast shown after adding to the cart.
    pub added_to_cart: String,
    /// Alert prefix when a submitted search finds nothing.
    pub not_found_prefix: String,
    /// Between the price and the quantity input in a cart row.
    pub quantity_separator: String,
    /// Accessible label of the quantity input.
    pub quantity_label: String,
    /// Accessible label of the remove button.
    pub remove_label: String,
    /// Tooltip of the remove button.
    pub remove_title: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            added_to_cart: "✅ Ajouté au panier".to_string(),
            not_found_prefix: "Aucun parfum trouvé pour : ".to_string(),
            quantity_separator: " — Qté ".to_string(),
            quantity_label: "Quantité".to_string(),
            remove_label: "Supprimer l'article".to_string(),
            remove_title: "Supprimer".to_string(),
        }
    }
}

/// CSS selectors and class names the widget relies on.
///
/// The widget never owns this markup. When a selector matches nothing on a
/// page, the step that needs it is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomHooks {
    pub cart_items: String,
    pub subtotal: String,
    pub cart_count: String,
    pub cart_drawer: String,
    pub cart_button: String,
    pub add_button: String,
    pub product_card: String,
    pub active_variant: String,
    pub card_title: String,
    pub card_price: String,
    pub card_image: String,
    pub checkout: String,
    pub dropdown: String,
    pub dropdown_toggle: String,
    pub search_form: String,
    pub search_input: String,
    pub search_results: String,
    /// Body class marking the drawer as open.
    pub cart_open_class: String,
    /// Class marking a dropdown as open.
    pub dropdown_open_class: String,
    /// Script element holding page configuration.
    pub config_script: String,
}

impl Default for DomHooks {
    fn default() -> Self {
        Self {
            cart_items: "#cartItems".to_string(),
            subtotal: "#subtotal".to_string(),
            cart_count: "#cartCount".to_string(),
            cart_drawer: ".cart-drawer".to_string(),
            cart_button: ".cart-btn".to_string(),
            add_button: ".add-btn".to_string(),
            product_card: ".project-card".to_string(),
            active_variant: ".opt-btn.active".to_string(),
            card_title: ".project-title span".to_string(),
            card_price: ".price".to_string(),
            card_image: ".project-image img".to_string(),
            checkout: "#checkoutBtn".to_string(),
            dropdown: ".has-dropdown".to_string(),
            dropdown_toggle: ".nav-link".to_string(),
            search_form: "#searchForm".to_string(),
            search_input: "#searchInput".to_string(),
            search_results: "#searchResults".to_string(),
            cart_open_class: "cart-open".to_string(),
            dropdown_open_class: "open".to_string(),
            config_script: "#casaperf-config".to_string(),
        }
    }
}

impl DomHooks {
    /// Selector for a toggle inside a dropdown.
    pub fn dropdown_toggle_selector(&self) -> String {
        format!("{} {}", self.dropdown, self.dropdown_toggle)
    }
}
