//! Reading commands' inputs out of the DOM.

use std::collections::BTreeSet;

use casaperf_commerce::reconcile::{CardAttributes, TriggerAttributes};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::config::DomHooks;

/// The element an event was dispatched to, if it is an element.
pub(super) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Closest inclusive ancestor matching `selector`.
pub(super) fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

fn descendant(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(super) fn trigger_attributes(trigger: &Element) -> TriggerAttributes {
    TriggerAttributes {
        title: trigger.get_attribute("data-title"),
        price: trigger.get_attribute("data-price"),
        image: trigger.get_attribute("data-img"),
    }
}

pub(super) fn card_attributes(card: &Element, hooks: &DomHooks) -> CardAttributes {
    CardAttributes {
        active_variant: descendant(card, &hooks.active_variant)
            .and_then(|toggle| toggle.get_attribute("data-type")),
        original_name: card.get_attribute("data-original-name"),
        decant_name: card.get_attribute("data-decant-name"),
        original_price: card.get_attribute("data-original-price"),
        decant_price: card.get_attribute("data-decant-price"),
        image: card.get_attribute("data-img"),
        title_text: descendant(card, &hooks.card_title).and_then(|e| e.text_content()),
        price_text: descendant(card, &hooks.card_price).and_then(|e| e.text_content()),
        image_src: descendant(card, &hooks.card_image).and_then(|e| e.get_attribute("src")),
    }
}

/// Position of `element` among the elements matching `selector`.
pub(super) fn index_among(
    document: &web_sys::Document,
    selector: &str,
    element: &Element,
) -> Option<usize> {
    let nodes = document.query_selector_all(selector).ok()?;
    (0..nodes.length())
        .find(|&i| nodes.item(i).is_some_and(|node| node.is_same_node(Some(element.as_ref()))))
        .map(|i| i as usize)
}

/// Indices of the dropdowns currently carrying the open class.
pub(super) fn open_dropdowns(document: &web_sys::Document, hooks: &DomHooks) -> BTreeSet<usize> {
    let Ok(nodes) = document.query_selector_all(&hooks.dropdown) else {
        return BTreeSet::new();
    };
    (0..nodes.length())
        .filter(|&i| {
            nodes
                .item(i)
                .and_then(|node| node.dyn_into::<Element>().ok())
                .is_some_and(|dropdown| dropdown.class_list().contains(&hooks.dropdown_open_class))
        })
        .map(|i| i as usize)
        .collect()
}
