//! Drawer, dropdown and checkout handlers.

use casaperf_cache::KeyValueStore;

use super::{Command, Effect, NavigationTarget};
use crate::state::WidgetState;

pub(super) fn toggle_cart<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::ToggleCart = command else {
        return Vec::new();
    };

    state.ui.cart_open = !state.ui.cart_open;
    vec![Effect::SetCartOpen(state.ui.cart_open)]
}

/// Close an open drawer when the press lands outside it and off the cart
/// button.
pub(super) fn pointer_down<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::PointerDown {
        inside_drawer,
        on_cart_button,
    } = command
    else {
        return Vec::new();
    };

    if state.ui.cart_open && !inside_drawer && !on_cart_button {
        state.ui.cart_open = false;
        return vec![Effect::SetCartOpen(false)];
    }
    Vec::new()
}

/// Escape closes the drawer and the first open dropdown.
pub(super) fn key_down<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::KeyDown { key } = command else {
        return Vec::new();
    };
    if key != "Escape" && key != "Esc" {
        return Vec::new();
    }

    let mut effects = Vec::new();
    if state.ui.cart_open {
        state.ui.cart_open = false;
        effects.push(Effect::SetCartOpen(false));
    }
    if let Some(index) = state.ui.open_dropdowns.pop_first() {
        effects.push(Effect::SetDropdownOpen { index, open: false });
    }
    effects
}

pub(super) fn checkout<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::Checkout = command else {
        return Vec::new();
    };

    vec![Effect::Navigate {
        url: state.config.checkout_url.clone(),
        target: NavigationTarget::NewTab,
    }]
}

/// Toggle the clicked dropdown on its own. A click outside every dropdown
/// closes the first open one.
pub(super) fn dropdown_click<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::DropdownClick {
        index,
        inside_dropdown,
    } = command
    else {
        return Vec::new();
    };

    let open_dropdowns = &mut state.ui.open_dropdowns;
    match index {
        Some(clicked) => {
            let open = open_dropdowns.insert(clicked);
            if !open {
                open_dropdowns.remove(&clicked);
            }
            vec![Effect::SetDropdownOpen {
                index: clicked,
                open,
            }]
        }
        None if !inside_dropdown => match open_dropdowns.pop_first() {
            Some(first) => vec![Effect::SetDropdownOpen {
                index: first,
                open: false,
            }],
            None => Vec::new(),
        },
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;
    use casaperf_cache::MemoryStore;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn state() -> WidgetState<MemoryStore> {
        WidgetState::open(MemoryStore::new(), WidgetConfig::default())
    }

    fn click(index: Option<usize>, inside_dropdown: bool) -> Command {
        Command::DropdownClick {
            index,
            inside_dropdown,
        }
    }

    #[test]
    fn test_toggle_cart() {
        let mut state = state();
        assert_eq!(toggle_cart(&mut state, Command::ToggleCart), vec![Effect::SetCartOpen(true)]);
        assert_eq!(toggle_cart(&mut state, Command::ToggleCart), vec![Effect::SetCartOpen(false)]);
        assert!(!state.ui.cart_open);
    }

    #[test]
    fn test_pointer_down_outside_closes() {
        let mut state = state();
        state.ui.cart_open = true;

        let inside = Command::PointerDown {
            inside_drawer: true,
            on_cart_button: false,
        };
        assert!(pointer_down(&mut state, inside).is_empty());

        let on_button = Command::PointerDown {
            inside_drawer: false,
            on_cart_button: true,
        };
        assert!(pointer_down(&mut state, on_button).is_empty());
        assert!(state.ui.cart_open);

        let outside = Command::PointerDown {
            inside_drawer: false,
            on_cart_button: false,
        };
        assert_eq!(pointer_down(&mut state, outside), vec![Effect::SetCartOpen(false)]);
        assert!(!state.ui.cart_open);
    }

    #[test]
    fn test_pointer_down_when_closed_is_noop() {
        let mut state = state();
        let outside = Command::PointerDown {
            inside_drawer: false,
            on_cart_button: false,
        };
        assert!(pointer_down(&mut state, outside).is_empty());
    }

    #[test]
    fn test_escape_closes_drawer_and_dropdown() {
        let mut state = state();
        state.ui.cart_open = true;
        state.ui.open_dropdowns = BTreeSet::from([1, 3]);

        let effects = key_down(&mut state, Command::KeyDown { key: "Esc".to_string() });
        assert_eq!(
            effects,
            vec![
                Effect::SetCartOpen(false),
                Effect::SetDropdownOpen { index: 1, open: false },
            ]
        );
        assert_eq!(state.ui.open_dropdowns, BTreeSet::from([3]));

        let effects = key_down(&mut state, Command::KeyDown { key: "Escape".to_string() });
        assert_eq!(effects, vec![Effect::SetDropdownOpen { index: 3, open: false }]);
        assert!(state.ui.open_dropdowns.is_empty());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut state = state();
        state.ui.cart_open = true;
        assert!(key_down(&mut state, Command::KeyDown { key: "Enter".to_string() }).is_empty());
        assert!(state.ui.cart_open);
    }

    #[test]
    fn test_checkout_opens_new_tab() {
        let mut state = state();
        assert_eq!(
            checkout(&mut state, Command::Checkout),
            vec![Effect::Navigate {
                url: "commande.html".to_string(),
                target: NavigationTarget::NewTab,
            }]
        );
    }

    #[test]
    fn test_dropdowns_toggle_independently() {
        let mut state = state();

        assert_eq!(
            dropdown_click(&mut state, click(Some(0), true)),
            vec![Effect::SetDropdownOpen { index: 0, open: true }]
        );
        assert_eq!(
            dropdown_click(&mut state, click(Some(1), true)),
            vec![Effect::SetDropdownOpen { index: 1, open: true }]
        );
        assert_eq!(state.ui.open_dropdowns, BTreeSet::from([0, 1]));

        assert_eq!(
            dropdown_click(&mut state, click(Some(1), true)),
            vec![Effect::SetDropdownOpen { index: 1, open: false }]
        );
        assert_eq!(state.ui.open_dropdowns, BTreeSet::from([0]));
    }

    #[test]
    fn test_dropdown_open_in_markup_toggles_closed() {
        let mut state = state();
        state.ui.open_dropdowns.insert(2);

        assert_eq!(
            dropdown_click(&mut state, click(Some(2), true)),
            vec![Effect::SetDropdownOpen { index: 2, open: false }]
        );
        assert!(state.ui.open_dropdowns.is_empty());
    }

    #[test]
    fn test_dropdown_outside_click() {
        let mut state = state();
        state.ui.open_dropdowns = BTreeSet::from([0, 2]);

        assert!(dropdown_click(&mut state, click(None, true)).is_empty());
        assert_eq!(state.ui.open_dropdowns, BTreeSet::from([0, 2]));

        assert_eq!(
            dropdown_click(&mut state, click(None, false)),
            vec![Effect::SetDropdownOpen { index: 0, open: false }]
        );
        assert_eq!(
            dropdown_click(&mut state, click(None, false)),
            vec![Effect::SetDropdownOpen { index: 2, open: false }]
        );
        assert!(dropdown_click(&mut state, click(None, false)).is_empty());
    }

    proptest! {
        #[test]
        fn prop_toggle_only_touches_clicked(
            open in proptest::collection::btree_set(0usize..8, 0..8),
            clicked in 0usize..8,
        ) {
            let mut state = state();
            state.ui.open_dropdowns = open.clone();

            let effects = dropdown_click(&mut state, click(Some(clicked), true));
            let now_open = !open.contains(&clicked);
            prop_assert_eq!(effects, vec![Effect::SetDropdownOpen { index: clicked, open: now_open }]);
            prop_assert_eq!(state.ui.open_dropdowns.contains(&clicked), now_open);

            let untouched: BTreeSet<usize> = open.iter().copied().filter(|&i| i != clicked).collect();
            let rest: BTreeSet<usize> = state.ui.open_dropdowns.iter().copied().filter(|&i| i != clicked).collect();
            prop_assert_eq!(rest, untouched);
        }
    }
}
