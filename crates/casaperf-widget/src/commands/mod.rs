//! Command registry.
//!
//! Every user interaction the DOM layer observes becomes a [`Command`].
//! The registry routes it to one handler by [`CommandKind`]; the handler
//! mutates [`WidgetState`] and returns the [`Effect`]s the page should show.
//! Handlers never touch the DOM, so the whole interaction model runs
//! natively under test.

mod cart;
mod navigation;
mod search;

use std::collections::HashMap;

use casaperf_cache::KeyValueStore;
use casaperf_commerce::reconcile::{AddToCartRequest, CardAttributes, TriggerAttributes};
use tracing::debug;

use crate::error::WidgetError;
use crate::state::WidgetState;

/// A user interaction, already extracted from its DOM event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// An add-to-cart trigger was clicked.
    AddToCart {
        trigger: TriggerAttributes,
        /// The product card enclosing the trigger, if any.
        card: Option<CardAttributes>,
    },
    /// A quantity input was committed.
    SetQuantity { title: String, raw: String },
    RemoveItem { title: String },
    /// The header cart button was clicked.
    ToggleCart,
    /// A mouse button went down somewhere in the document.
    PointerDown {
        inside_drawer: bool,
        on_cart_button: bool,
    },
    KeyDown { key: String },
    /// A non-link checkout control was clicked.
    Checkout,
    /// A click anywhere in the document, as seen by the navigation dropdowns.
    DropdownClick {
        /// Position of the clicked dropdown toggle, if the click hit one.
        index: Option<usize>,
        inside_dropdown: bool,
    },
    SearchInput { query: String },
    SearchSubmit { query: String },
    /// A search result was clicked or activated with Enter.
    SelectResult { url: String },
    /// A click landed outside the search form.
    DismissSearch,
}

/// Discriminant of [`Command`], used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    AddToCart,
    SetQuantity,
    RemoveItem,
    ToggleCart,
    PointerDown,
    KeyDown,
    Checkout,
    DropdownClick,
    SearchInput,
    SearchSubmit,
    SelectResult,
    DismissSearch,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddToCart { .. } => CommandKind::AddToCart,
            Command::SetQuantity { .. } => CommandKind::SetQuantity,
            Command::RemoveItem { .. } => CommandKind::RemoveItem,
            Command::ToggleCart => CommandKind::ToggleCart,
            Command::PointerDown { .. } => CommandKind::PointerDown,
            Command::KeyDown { .. } => CommandKind::KeyDown,
            Command::Checkout => CommandKind::Checkout,
            Command::DropdownClick { .. } => CommandKind::DropdownClick,
            Command::SearchInput { .. } => CommandKind::SearchInput,
            Command::SearchSubmit { .. } => CommandKind::SearchSubmit,
            Command::SelectResult { .. } => CommandKind::SelectResult,
            Command::DismissSearch => CommandKind::DismissSearch,
        }
    }
}

/// Where a navigation opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    SameTab,
    /// New browsing context without an opener.
    NewTab,
}

/// A presentation change requested by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the resolved data back onto the add-to-cart trigger.
    RememberTrigger(AddToCartRequest),
    /// Re-render the drawer, subtotal and badge from the cart.
    RenderCart,
    SetCartOpen(bool),
    ShowToast(String),
    Navigate {
        url: String,
        target: NavigationTarget,
    },
    Alert(String),
    /// Open or close dropdown `index`, mirroring `aria-expanded`.
    SetDropdownOpen { index: usize, open: bool },
    /// Re-render the search dropdown from the current results.
    RenderSearchResults,
}

/// A command handler.
pub type Handler<S> = fn(&mut WidgetState<S>, Command) -> Vec<Effect>;

/// Routes commands to handlers by kind.
pub struct CommandRegistry<S: KeyValueStore> {
    handlers: HashMap<CommandKind, Handler<S>>,
}

impl<S: KeyValueStore> CommandRegistry<S> {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with the storefront's handler for every command kind.
    pub fn new() -> Self {
        let defaults: [(CommandKind, Handler<S>); 12] = [
            (CommandKind::AddToCart, cart::add_to_cart),
            (CommandKind::SetQuantity, cart::set_quantity),
            (CommandKind::RemoveItem, cart::remove_item),
            (CommandKind::ToggleCart, navigation::toggle_cart),
            (CommandKind::PointerDown, navigation::pointer_down),
            (CommandKind::KeyDown, navigation::key_down),
            (CommandKind::Checkout, navigation::checkout),
            (CommandKind::DropdownClick, navigation::dropdown_click),
            (CommandKind::SearchInput, search::search_input),
            (CommandKind::SearchSubmit, search::search_submit),
            (CommandKind::SelectResult, search::select_result),
            (CommandKind::DismissSearch, search::dismiss_search),
        ];
        Self {
            handlers: defaults.into_iter().collect(),
        }
    }

    /// Register `handler` for `kind`. Refuses a kind that already has one.
    pub fn register(&mut self, kind: CommandKind, handler: Handler<S>) -> Result<(), WidgetError> {
        if self.handlers.contains_key(&kind) {
            return Err(WidgetError::AlreadyRegistered(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    pub fn is_registered(&self, kind: CommandKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `command`. Unhandled commands produce no effects.
    pub fn dispatch(&self, state: &mut WidgetState<S>, command: Command) -> Vec<Effect> {
        let kind = command.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            debug!(?kind, "no handler registered");
            return Vec::new();
        };
        let effects = handler(state, command);
        debug!(?kind, effects = effects.len(), "dispatched");
        effects
    }
}

impl<S: KeyValueStore> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;
    use casaperf_cache::MemoryStore;

    fn state() -> WidgetState<MemoryStore> {
        WidgetState::open(MemoryStore::new(), WidgetConfig::default())
    }

    fn always_toast(_: &mut WidgetState<MemoryStore>, _: Command) -> Vec<Effect> {
        vec![Effect::ShowToast("custom".to_string())]
    }

    #[test]
    fn test_new_registers_every_kind() {
        let registry = CommandRegistry::<MemoryStore>::new();
        assert_eq!(registry.len(), 12);
        assert!(registry.is_registered(CommandKind::DismissSearch));
    }

    #[test]
    fn test_register_refuses_duplicates() {
        let mut registry = CommandRegistry::<MemoryStore>::new();
        let result = registry.register(CommandKind::ToggleCart, always_toast);
        assert!(matches!(
            result,
            Err(WidgetError::AlreadyRegistered(CommandKind::ToggleCart))
        ));

        // First registration still wins.
        let mut state = state();
        let effects = registry.dispatch(&mut state, Command::ToggleCart);
        assert_eq!(effects, vec![Effect::SetCartOpen(true)]);
    }

    #[test]
    fn test_custom_handler() {
        let mut registry = CommandRegistry::<MemoryStore>::empty();
        assert!(registry.is_empty());
        registry
            .register(CommandKind::Checkout, always_toast)
            .unwrap();

        let mut state = state();
        assert_eq!(
            registry.dispatch(&mut state, Command::Checkout),
            vec![Effect::ShowToast("custom".to_string())]
        );
    }

    #[test]
    fn test_unregistered_command_is_ignored() {
        let registry = CommandRegistry::<MemoryStore>::empty();
        let mut state = state();
        assert!(registry.dispatch(&mut state, Command::ToggleCart).is_empty());
        assert!(!state.ui.cart_open);
    }

    #[test]
    fn test_kind_matches_variant() {
        let command = Command::SetQuantity {
            title: "A".to_string(),
            raw: "2".to_string(),
        };
        assert_eq!(command.kind(), CommandKind::SetQuantity);
        assert_eq!(Command::DismissSearch.kind(), CommandKind::DismissSearch);
    }
}
