//! Cart drawer and product search for the Casaperf storefront.
//!
//! The widget attaches to server-rendered pages and never owns their
//! markup. It reads product data from existing elements, keeps the cart in
//! `localStorage`, and writes the drawer, badge and search results into
//! hook elements the page provides.
//!
//! - [`state`]: the owned cart, search index and UI flags
//! - [`commands`]: user interactions routed to handlers that return effects
//! - [`view`]: what the drawer and search results should show
//! - [`config`]: defaults plus optional page-embedded TOML
//! - `dom` (wasm32 only): listeners and effect commit
//!
//! # Example
//!
//! ```rust
//! use casaperf_cache::MemoryStore;
//! use casaperf_widget::prelude::*;
//!
//! let mut state = WidgetState::open(MemoryStore::new(), WidgetConfig::default());
//! let registry = CommandRegistry::new();
//!
//! let effects = registry.dispatch(
//!     &mut state,
//!     Command::SearchSubmit { query: "wanted".to_string() },
//! );
//! assert_eq!(
//!     effects,
//!     vec![Effect::Navigate {
//!         url: "azzaro-the-most-wanted-parfum.html".to_string(),
//!         target: NavigationTarget::SameTab,
//!     }]
//! );
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use error::WidgetError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::commands::{Command, CommandKind, CommandRegistry, Effect, Handler, NavigationTarget};
    pub use crate::config::{DomHooks, Texts, WidgetConfig};
    pub use crate::error::WidgetError;
    pub use crate::state::{UiState, WidgetState};
    pub use crate::view::{clamp_live_quantity, CartDrawerView, CartRowView, SearchResultsView};
}

/// Entry point, run when the module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Boot can fail before the subscriber is installed.
    if let Err(e) = dom::boot() {
        web_sys::console::error_1(&format!("casaperf: widget failed to start: {:#}", e).into());
    }
}
