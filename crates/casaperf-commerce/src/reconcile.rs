//! Best-effort reconciliation of add-to-cart data from page markup.
//!
//! An add-to-cart trigger normally carries `data-title`, `data-price` and
//! `data-img`. Older product pages omit some of them, in which case the
//! values are derived from the enclosing product card: its active pricing
//! variant, its variant data attributes, and finally its visible text.
//!
//! Number parsing here follows the browser's lenient prefix rules so that a
//! page that works in one place works in the other: `"119 DH"` is 119,
//! `"12abc"` is 12, and anything without a leading number is invalid.

use crate::money::Money;

/// Which price a product card is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricingVariant {
    /// Full bottle.
    #[default]
    Original,
    /// Decanted sample.
    Decant,
}

impl PricingVariant {
    /// Parse the active toggle's `data-type`. Anything but `"decant"` is
    /// the original bottle.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("decant") => PricingVariant::Decant,
            _ => PricingVariant::Original,
        }
    }
}

/// Data attributes found on the add-to-cart trigger itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerAttributes {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl TriggerAttributes {
    /// All three attributes are present and non-empty.
    pub fn is_complete(&self) -> bool {
        non_empty(&self.title).is_some()
            && non_empty(&self.price).is_some()
            && non_empty(&self.image).is_some()
    }
}

/// What could be read from the product card enclosing a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardAttributes {
    /// `data-type` of the active pricing toggle, if any.
    pub active_variant: Option<String>,
    pub original_name: Option<String>,
    pub decant_name: Option<String>,
    pub original_price: Option<String>,
    pub decant_price: Option<String>,
    /// `data-img` on the card.
    pub image: Option<String>,
    /// Text content of the card title.
    pub title_text: Option<String>,
    /// Text content of the visible price.
    pub price_text: Option<String>,
    /// `src` of the card image.
    pub image_src: Option<String>,
}

/// A fully resolved add-to-cart request.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCartRequest {
    pub title: String,
    pub price: Money,
    pub image_url: String,
}

/// Resolve the item a trigger adds to the cart.
///
/// When the trigger is missing any attribute and a card is available, all
/// three values are taken from the card: the name and price for the active
/// variant, falling back to the title text, the visible price text, and the
/// card image. Otherwise the trigger's own attributes are used. The title
/// falls back to `default_title` and the price to zero.
pub fn resolve_add_to_cart(
    trigger: &TriggerAttributes,
    card: Option<&CardAttributes>,
    default_title: &str,
) -> AddToCartRequest {
    if let (false, Some(card)) = (trigger.is_complete(), card) {
        return resolve_from_card(card, default_title);
    }

    AddToCartRequest {
        title: non_empty(&trigger.title).unwrap_or(default_title).to_string(),
        price: non_empty(&trigger.price).map(coerce_price).unwrap_or_default(),
        image_url: non_empty(&trigger.image).unwrap_or_default().to_string(),
    }
}

fn resolve_from_card(card: &CardAttributes, default_title: &str) -> AddToCartRequest {
    let variant = PricingVariant::from_attr(card.active_variant.as_deref());
    let (name, price) = match variant {
        PricingVariant::Original => (&card.original_name, &card.original_price),
        PricingVariant::Decant => (&card.decant_name, &card.decant_price),
    };

    let title = non_empty(name)
        .map(str::to_string)
        .or_else(|| {
            card.title_text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| default_title.to_string());

    let price = match non_empty(price) {
        Some(attr) => coerce_price(attr),
        None => parse_price_text(card.price_text.as_deref().unwrap_or_default()),
    };

    let image_url = non_empty(&card.image)
        .or_else(|| non_empty(&card.image_src))
        .unwrap_or_default()
        .to_string();

    AddToCartRequest {
        title,
        price,
        image_url,
    }
}

/// Parse a visible price such as `"1 234,50 DH"`.
///
/// Keeps digits, `,`, `.` and whitespace; drops the whitespace; turns the
/// first `,` into a decimal point; then reads the longest decimal prefix.
/// Anything unreadable is zero.
pub fn parse_price_text(text: &str) -> Money {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = kept.replacen(',', ".", 1);
    parse_decimal_prefix(&normalized)
        .map(Money::from_decimal)
        .unwrap_or_default()
}

/// Coerce a price attribute to Money; unreadable or negative is zero.
pub fn coerce_price(raw: &str) -> Money {
    parse_decimal_prefix(raw)
        .map(Money::from_decimal)
        .unwrap_or_default()
}

/// Read a leading integer: optional whitespace, optional sign, digits.
///
/// Returns `None` when there are no digits. Values beyond `i64` saturate.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Read a leading decimal number: optional whitespace, optional sign,
/// digits with an optional fraction, and an optional exponent.
///
/// Returns `None` when the mantissa has no digits.
pub fn parse_decimal_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("119 DH"), Money::from_decimal(119.0));
        assert_eq!(parse_price_text("1 234,50 DH"), Money::from_decimal(1234.5));
        assert_eq!(parse_price_text("Prix : 89.90"), Money::from_decimal(89.9));
        assert_eq!(parse_price_text("1.234,50"), Money::from_decimal(1.234));
        assert_eq!(parse_price_text("sur demande"), Money::zero());
        assert_eq!(parse_price_text(""), Money::zero());
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("3"), Some(3));
        assert_eq!(parse_int_prefix("  12abc"), Some(12));
        assert_eq!(parse_int_prefix("3.7"), Some(3));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("+5"), Some(5));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_decimal_prefix() {
        assert_eq!(parse_decimal_prefix("119"), Some(119.0));
        assert_eq!(parse_decimal_prefix(" 119.5 DH"), Some(119.5));
        assert_eq!(parse_decimal_prefix(".5"), Some(0.5));
        assert_eq!(parse_decimal_prefix("5."), Some(5.0));
        assert_eq!(parse_decimal_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_decimal_prefix("2e"), Some(2.0));
        assert_eq!(parse_decimal_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_decimal_prefix("."), None);
        assert_eq!(parse_decimal_prefix("DH 119"), None);
    }

    #[test]
    fn test_coerce_price() {
        assert_eq!(coerce_price("119"), Money::from_decimal(119.0));
        assert_eq!(coerce_price("abc"), Money::zero());
        assert_eq!(coerce_price("-10"), Money::zero());
    }

    #[test]
    fn test_pricing_variant() {
        assert_eq!(PricingVariant::from_attr(Some("decant")), PricingVariant::Decant);
        assert_eq!(PricingVariant::from_attr(Some("original")), PricingVariant::Original);
        assert_eq!(PricingVariant::from_attr(Some("other")), PricingVariant::Original);
        assert_eq!(PricingVariant::from_attr(None), PricingVariant::Original);
    }

    #[test]
    fn test_complete_trigger_wins() {
        let trigger = TriggerAttributes {
            title: some("Rasasi Hawas Black"),
            price: some("450"),
            image: some("hawas.jpg"),
        };
        let card = CardAttributes {
            original_name: some("Ignored"),
            ..Default::default()
        };

        let request = resolve_add_to_cart(&trigger, Some(&card), "Produit");
        assert_eq!(request.title, "Rasasi Hawas Black");
        assert_eq!(request.price, Money::from_decimal(450.0));
        assert_eq!(request.image_url, "hawas.jpg");
    }

    #[test]
    fn test_incomplete_trigger_without_card() {
        let trigger = TriggerAttributes {
            title: None,
            price: some("abc"),
            image: None,
        };

        let request = resolve_add_to_cart(&trigger, None, "Produit");
        assert_eq!(request.title, "Produit");
        assert_eq!(request.price, Money::zero());
        assert_eq!(request.image_url, "");
    }

    #[test]
    fn test_card_decant_variant() {
        let card = CardAttributes {
            active_variant: some("decant"),
            original_name: some("Scandal 80ml"),
            decant_name: some("Scandal 10ml"),
            original_price: some("1290"),
            decant_price: some("190"),
            image: some("scandal.jpg"),
            ..Default::default()
        };

        let request = resolve_add_to_cart(&TriggerAttributes::default(), Some(&card), "Produit");
        assert_eq!(request.title, "Scandal 10ml");
        assert_eq!(request.price, Money::from_decimal(190.0));
        assert_eq!(request.image_url, "scandal.jpg");
    }

    #[test]
    fn test_card_text_fallbacks() {
        let card = CardAttributes {
            title_text: some("  Yves Saint Laurent Y  "),
            price_text: some("1 150,00 DH"),
            image_src: some("img/y.jpg"),
            ..Default::default()
        };

        let request = resolve_add_to_cart(&TriggerAttributes::default(), Some(&card), "Produit");
        assert_eq!(request.title, "Yves Saint Laurent Y");
        assert_eq!(request.price, Money::from_decimal(1150.0));
        assert_eq!(request.image_url, "img/y.jpg");
    }

    #[test]
    fn test_card_overrides_partial_trigger() {
        let trigger = TriggerAttributes {
            title: some("From trigger"),
            price: some("10"),
            image: None,
        };
        let card = CardAttributes {
            original_name: some("From card"),
            original_price: some("20"),
            ..Default::default()
        };

        let request = resolve_add_to_cart(&trigger, Some(&card), "Produit");
        assert_eq!(request.title, "From card");
        assert_eq!(request.price, Money::from_decimal(20.0));
    }

    #[test]
    fn test_empty_card_defaults() {
        let request = resolve_add_to_cart(
            &TriggerAttributes::default(),
            Some(&CardAttributes::default()),
            "Produit",
        );
        assert_eq!(request.title, "Produit");
        assert_eq!(request.price, Money::zero());
        assert_eq!(request.image_url, "");
    }
}
