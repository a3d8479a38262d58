//! Committing effects to the page.

use casaperf_cache::KeyValueStore;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use super::Page;
use crate::commands::{Effect, NavigationTarget};
use crate::config::Texts;
use crate::state::WidgetState;
use crate::view::{CartDrawerView, CartRowView, SearchResultsView};

/// Attribute carrying a cart row's stored title.
pub(super) const ROW_KEY_ATTR: &str = "data-key";
pub(super) const REMOVE_BUTTON: &str = "[data-action=\"remove\"]";
pub(super) const QUANTITY_INPUT: &str = "[data-action=\"quantity\"]";
pub(super) const RESULT_ITEM: &str = ".item";

const TOAST_FADE_MS: i32 = 400;

/// Apply `effects` in order. A failing effect is logged and skipped.
pub(super) fn apply<S: KeyValueStore>(
    page: &Page,
    state: &WidgetState<S>,
    effects: &[Effect],
    origin: Option<&Element>,
) {
    for effect in effects {
        if let Err(e) = apply_one(page, state, effect, origin) {
            warn!(?effect, error = ?e, "effect failed");
        }
    }
}

fn apply_one<S: KeyValueStore>(
    page: &Page,
    state: &WidgetState<S>,
    effect: &Effect,
    origin: Option<&Element>,
) -> Result<(), JsValue> {
    match effect {
        Effect::RememberTrigger(request) => {
            if let Some(trigger) = origin {
                trigger.set_attribute("data-title", &request.title)?;
                trigger.set_attribute("data-price", &request.price.to_decimal().to_string())?;
                trigger.set_attribute("data-img", &request.image_url)?;
            }
            Ok(())
        }
        Effect::RenderCart => {
            let view = CartDrawerView::build(&state.cart, &state.config);
            render_cart(page, &view, &state.config.texts)
        }
        Effect::SetCartOpen(open) => match page.document.body() {
            Some(body) => body
                .class_list()
                .toggle_with_force(&page.hooks.cart_open_class, *open)
                .map(|_| ()),
            None => Ok(()),
        },
        Effect::ShowToast(text) => show_toast(page, text),
        Effect::Navigate { url, target } => match target {
            NavigationTarget::SameTab => page.window.location().set_href(url),
            NavigationTarget::NewTab => page
                .window
                .open_with_url_and_target_and_features(url, "_blank", "noopener")
                .map(|_| ()),
        },
        Effect::Alert(message) => page.window.alert_with_message(message),
        Effect::SetDropdownOpen { index, open } => set_dropdown_open(page, *index, *open),
        Effect::RenderSearchResults => {
            render_search_results(page, &SearchResultsView::build(&state.ui.results))
        }
    }
}

/// Checkout links open in a new tab without an opener.
pub(super) fn prepare_checkout(page: &Page) {
    let Some(control) = page.query(&page.hooks.checkout) else {
        return;
    };
    if !control.tag_name().eq_ignore_ascii_case("a") {
        return;
    }
    let result = control
        .set_attribute("target", "_blank")
        .and_then(|_| control.set_attribute("rel", "noopener noreferrer"));
    if let Err(e) = result {
        warn!(error = ?e, "could not prepare checkout link");
    }
}

fn create(page: &Page, tag: &str, class: Option<&str>) -> Result<Element, JsValue> {
    let element = page.document.create_element(tag)?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    Ok(element)
}

fn set_style(element: &Element, properties: &[(&str, &str)]) -> Result<(), JsValue> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let style = html.style();
        for (name, value) in properties {
            style.set_property(name, value)?;
        }
    }
    Ok(())
}

fn render_cart(page: &Page, view: &CartDrawerView, texts: &Texts) -> Result<(), JsValue> {
    if let Some(list) = page.query(&page.hooks.cart_items) {
        list.set_text_content(None);
        for row in &view.rows {
            list.append_child(&cart_row(page, row, texts)?)?;
        }
    }
    if let Some(subtotal) = page.query(&page.hooks.subtotal) {
        subtotal.set_text_content(Some(&view.subtotal_label));
    }
    if let Some(badge) = page.query(&page.hooks.cart_count) {
        badge.set_text_content(Some(&view.badge_label));
    }
    debug!(rows = view.rows.len(), subtotal = %view.subtotal_label, "cart rendered");
    Ok(())
}

fn cart_row(page: &Page, row: &CartRowView, texts: &Texts) -> Result<Element, JsValue> {
    let item = create(page, "div", Some("cart-item"))?;
    item.set_attribute("role", "listitem")?;
    item.set_attribute(ROW_KEY_ATTR, &row.key)?;

    let thumb = create(page, "div", Some("thumb"))?;
    thumb.set_attribute("aria-hidden", "true")?;
    let image = create(page, "img", None)?;
    image.set_attribute("src", &row.image_src)?;
    image.set_attribute("alt", "")?;
    thumb.append_child(&image)?;

    let info = create(page, "div", Some("info"))?;
    let title = create(page, "div", Some("title"))?;
    title.set_text_content(Some(&row.title));
    set_style(&title, &[("font-weight", "600")])?;

    let details = create(page, "small", None)?;
    set_style(&details, &[("color", "#94A3B8")])?;
    let price = create(page, "span", None)?;
    price.set_text_content(Some(&format!("{}{}", row.price_label, texts.quantity_separator)));

    let quantity = create(page, "input", None)?;
    quantity.set_attribute("type", "number")?;
    quantity.set_attribute("min", "1")?;
    quantity.set_attribute("value", &row.quantity.to_string())?;
    quantity.set_attribute("inputmode", "numeric")?;
    quantity.set_attribute("aria-label", &texts.quantity_label)?;
    quantity.set_attribute("data-action", "quantity")?;
    set_style(&quantity, &[("width", "64px"), ("margin-left", "6px")])?;

    details.append_child(&price)?;
    details.append_child(&quantity)?;
    info.append_child(&title)?;
    info.append_child(&details)?;

    let remove = create(page, "button", Some("cart-close"))?;
    remove.set_attribute("type", "button")?;
    remove.set_attribute("aria-label", &texts.remove_label)?;
    remove.set_attribute("title", &texts.remove_title)?;
    remove.set_attribute("data-action", "remove")?;
    let icon = create(page, "i", Some("fas fa-trash"))?;
    icon.set_attribute("aria-hidden", "true")?;
    remove.append_child(&icon)?;

    item.append_child(&thumb)?;
    item.append_child(&info)?;
    item.append_child(&remove)?;
    Ok(item)
}

fn render_search_results(page: &Page, view: &SearchResultsView) -> Result<(), JsValue> {
    let Some(list) = page.query(&page.hooks.search_results) else {
        return Ok(());
    };
    list.set_text_content(None);

    for result in &view.items {
        let item = create(page, "div", Some("item"))?;
        item.set_attribute("tabindex", "0")?;
        item.set_attribute("role", "button")?;
        item.set_attribute("data-url", &result.url)?;

        let icon = create(page, "i", Some("fas fa-spray-can"))?;
        icon.set_attribute("aria-hidden", "true")?;
        let name = create(page, "span", None)?;
        name.set_text_content(Some(&result.name));
        let tag = create(page, "span", Some("tag"))?;
        tag.set_text_content(Some(&result.tag));

        item.append_child(&icon)?;
        item.append_child(&name)?;
        item.append_child(&tag)?;
        list.append_child(&item)?;
    }

    let display = if view.visible { "block" } else { "none" };
    set_style(&list, &[("display", display)])
}

fn set_dropdown_open(page: &Page, index: usize, open: bool) -> Result<(), JsValue> {
    let dropdowns = page.document.query_selector_all(&page.hooks.dropdown)?;
    let Some(dropdown) = u32::try_from(index)
        .ok()
        .and_then(|i| dropdowns.item(i))
        .and_then(|node| node.dyn_into::<Element>().ok())
    else {
        return Ok(());
    };

    dropdown
        .class_list()
        .toggle_with_force(&page.hooks.dropdown_open_class, open)?;
    if let Some(toggle) = dropdown.query_selector(&page.hooks.dropdown_toggle)? {
        toggle.set_attribute("aria-expanded", if open { "true" } else { "false" })?;
    }
    Ok(())
}

/// Pill in the bottom-right corner that drifts up and fades out.
fn show_toast(page: &Page, text: &str) -> Result<(), JsValue> {
    let Some(body) = page.document.body() else {
        return Ok(());
    };
    let toast = create(page, "div", None)?;
    toast.set_text_content(Some(text));
    set_style(
        &toast,
        &[
            ("position", "fixed"),
            ("right", "24px"),
            ("bottom", "24px"),
            ("padding", "10px 14px"),
            ("border-radius", "999px"),
            ("display", "grid"),
            ("place-items", "center"),
            ("background", "#000"),
            ("color", "#fff"),
            ("z-index", "1001"),
            ("opacity", "1"),
            ("box-shadow", "0 8px 20px rgba(0,0,0,0.25)"),
            ("transition", "transform 400ms linear, opacity 400ms linear"),
        ],
    )?;
    body.append_child(&toast)?;

    let fading = toast.clone();
    let fade = Closure::once_into_js(move || {
        let _ = set_style(
            &fading,
            &[("transform", "translateY(-50px)"), ("opacity", "0")],
        );
    });
    page.window
        .set_timeout_with_callback_and_timeout_and_arguments_0(fade.unchecked_ref(), 16)?;

    let remove = Closure::once_into_js(move || toast.remove());
    page.window.set_timeout_with_callback_and_timeout_and_arguments_0(
        remove.unchecked_ref(),
        TOAST_FADE_MS + 32,
    )?;
    Ok(())
}
