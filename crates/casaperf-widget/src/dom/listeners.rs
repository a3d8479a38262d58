//! Event listeners.
//!
//! Listeners are attached once per page, on the document or on containers
//! the widget never replaces, and stay for the page's lifetime. Rows and
//! search results are re-rendered freely underneath them.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, KeyboardEvent};

use super::extract::{card_attributes, closest, event_element, index_among, trigger_attributes};
use super::render::{QUANTITY_INPUT, REMOVE_BUTTON, RESULT_ITEM, ROW_KEY_ATTR};
use super::{dispatch, js_error, Page, SharedApp};
use crate::commands::Command;
use crate::error::WidgetError;
use crate::view::clamp_live_quantity;

fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), WidgetError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

pub(super) fn attach(page: &Page, app: &SharedApp) -> Result<(), WidgetError> {
    let document: &EventTarget = page.document.as_ref();

    let (p, a) = (page.clone(), app.clone());
    listen(document, "click", move |event| on_click(&p, &a, &event))?;

    let (p, a) = (page.clone(), app.clone());
    listen(document, "mousedown", move |event| on_pointer_down(&p, &a, &event))?;

    let (p, a) = (page.clone(), app.clone());
    listen(document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            dispatch(&p, &a, Command::KeyDown { key }, None);
        }
    })?;

    attach_checkout(page, app)?;
    attach_cart_rows(page, app)?;
    attach_search(page, app)?;
    Ok(())
}

fn on_click(page: &Page, app: &SharedApp, event: &Event) {
    let Some(target) = event_element(event) else {
        return;
    };
    let hooks = &page.hooks;

    if let Some(trigger) = closest(&target, &hooks.add_button) {
        event.prevent_default();
        let card = closest(&trigger, &hooks.product_card).map(|card| card_attributes(&card, hooks));
        let command = Command::AddToCart {
            trigger: trigger_attributes(&trigger),
            card,
        };
        dispatch(page, app, command, Some(&trigger));
    }

    if closest(&target, &hooks.cart_button).is_some() {
        event.prevent_default();
        dispatch(page, app, Command::ToggleCart, None);
    }

    let index = closest(&target, &hooks.dropdown_toggle_selector())
        .and_then(|toggle| closest(&toggle, &hooks.dropdown))
        .and_then(|dropdown| index_among(&page.document, &hooks.dropdown, &dropdown));
    let command = Command::DropdownClick {
        index,
        inside_dropdown: closest(&target, &hooks.dropdown).is_some(),
    };
    dispatch(page, app, command, None);
}

fn on_pointer_down(page: &Page, app: &SharedApp, event: &Event) {
    let Some(target) = event_element(event) else {
        return;
    };
    let inside_drawer = page
        .query(&page.hooks.cart_drawer)
        .is_some_and(|drawer| drawer.contains(Some(target.as_ref())));
    let command = Command::PointerDown {
        inside_drawer,
        on_cart_button: closest(&target, &page.hooks.cart_button).is_some(),
    };
    dispatch(page, app, command, None);
}

/// Non-link checkout controls navigate from code. Links are left to the
/// browser.
fn attach_checkout(page: &Page, app: &SharedApp) -> Result<(), WidgetError> {
    let Some(control) = page.query(&page.hooks.checkout) else {
        return Ok(());
    };
    if control.tag_name().eq_ignore_ascii_case("a") {
        return Ok(());
    }

    let (p, a) = (page.clone(), app.clone());
    listen(control.as_ref(), "click", move |event| {
        event.prevent_default();
        dispatch(&p, &a, Command::Checkout, None);
    })
}

/// Delegated listeners for the controls inside rendered cart rows.
fn attach_cart_rows(page: &Page, app: &SharedApp) -> Result<(), WidgetError> {
    let Some(container) = page.query(&page.hooks.cart_items) else {
        return Ok(());
    };
    let container: &EventTarget = container.as_ref();

    let (p, a) = (page.clone(), app.clone());
    listen(container, "click", move |event| {
        let Some(button) = event_element(&event).and_then(|t| closest(&t, REMOVE_BUTTON)) else {
            return;
        };
        if let Some(title) = row_key(&button) {
            dispatch(&p, &a, Command::RemoveItem { title }, None);
        }
    })?;

    for kind in ["change", "focusout"] {
        let (p, a) = (page.clone(), app.clone());
        listen(container, kind, move |event| {
            let Some(input) = quantity_input(&event) else {
                return;
            };
            if let Some(title) = row_key(&input) {
                let command = Command::SetQuantity {
                    title,
                    raw: input.value(),
                };
                dispatch(&p, &a, command, None);
            }
        })?;
    }

    listen(container, "input", move |event| {
        if let Some(input) = quantity_input(&event) {
            if let Some(value) = clamp_live_quantity(&input.value()) {
                input.set_value(value);
            }
        }
    })
}

fn quantity_input(event: &Event) -> Option<HtmlInputElement> {
    event_element(event)
        .filter(|target| target.matches(QUANTITY_INPUT).unwrap_or(false))?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

fn row_key(control: &Element) -> Option<String> {
    let selector = format!("[{}]", ROW_KEY_ATTR);
    closest(control, &selector)?.get_attribute(ROW_KEY_ATTR)
}

/// Search is wired only when the form, its input and the result list all
/// exist on the page.
fn attach_search(page: &Page, app: &SharedApp) -> Result<(), WidgetError> {
    let hooks = &page.hooks;
    let (Some(form), Some(input), Some(results)) = (
        page.query(&hooks.search_form),
        page.query(&hooks.search_input)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok()),
        page.query(&hooks.search_results),
    ) else {
        return Ok(());
    };

    let (p, a, i) = (page.clone(), app.clone(), input.clone());
    listen(input.as_ref(), "input", move |_| {
        dispatch(&p, &a, Command::SearchInput { query: i.value() }, None);
    })?;

    let (p, a, i) = (page.clone(), app.clone(), input.clone());
    listen(form.as_ref(), "submit", move |event| {
        event.prevent_default();
        dispatch(&p, &a, Command::SearchSubmit { query: i.value() }, None);
    })?;

    let (p, a) = (page.clone(), app.clone());
    listen(results.as_ref(), "click", move |event| {
        if let Some(url) = selected_result(&event) {
            dispatch(&p, &a, Command::SelectResult { url }, None);
        }
    })?;

    let (p, a) = (page.clone(), app.clone());
    listen(results.as_ref(), "keydown", move |event| {
        let enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|k| k.key() == "Enter");
        if !enter {
            return;
        }
        if let Some(url) = selected_result(&event) {
            dispatch(&p, &a, Command::SelectResult { url }, None);
        }
    })?;

    let (p, a) = (page.clone(), app.clone());
    listen(page.document.as_ref(), "click", move |event| {
        let outside = event_element(&event).is_some_and(|t| !form.contains(Some(t.as_ref())));
        if outside {
            dispatch(&p, &a, Command::DismissSearch, None);
        }
    })
}

fn selected_result(event: &Event) -> Option<String> {
    let item = closest(&event_element(event)?, RESULT_ITEM)?;
    item.get_attribute("data-url")
}
