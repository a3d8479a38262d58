//! Cart handlers.

use casaperf_cache::KeyValueStore;
use casaperf_commerce::reconcile::resolve_add_to_cart;

use super::{Command, Effect};
use crate::state::WidgetState;

/// Resolve the product behind a trigger, add it, open the drawer.
pub(super) fn add_to_cart<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::AddToCart { trigger, card } = command else {
        return Vec::new();
    };

    let request = resolve_add_to_cart(&trigger, card.as_ref(), &state.config.default_title);
    state
        .cart
        .add_item(request.title.clone(), request.price, request.image_url.clone());

    let mut effects = Vec::with_capacity(4);
    if !trigger.is_complete() && card.is_some() {
        effects.push(Effect::RememberTrigger(request));
    }
    state.ui.cart_open = true;
    effects.extend([
        Effect::RenderCart,
        Effect::SetCartOpen(true),
        Effect::ShowToast(state.config.texts.added_to_cart.clone()),
    ]);
    effects
}

pub(super) fn set_quantity<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::SetQuantity { title, raw } = command else {
        return Vec::new();
    };

    if state.cart.set_quantity(&title, &raw) {
        vec![Effect::RenderCart]
    } else {
        Vec::new()
    }
}

pub(super) fn remove_item<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::RemoveItem { title } = command else {
        return Vec::new();
    };

    state.cart.remove_item(&title);
    vec![Effect::RenderCart]
}
