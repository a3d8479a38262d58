//! Browser glue: boots the widget on a page, turns DOM events into
//! commands and commits the resulting effects.
//!
//! Only compiled for `wasm32`.

mod extract;
mod listeners;
mod render;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use casaperf_cache::{KeyValueStore, LocalStorage, MemoryStore};
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

use crate::commands::{Command, CommandKind, CommandRegistry, Effect};
use crate::config::{DomHooks, WidgetConfig};
use crate::error::WidgetError;
use crate::logging;
use crate::state::WidgetState;

/// Window property marking a page whose listeners are attached.
const INIT_FLAG: &str = "__CASAPERF_INIT__";

/// Storage backing the cart on a page.
pub(crate) type PageStore = Box<dyn KeyValueStore>;

pub(crate) struct App {
    state: WidgetState<PageStore>,
    registry: CommandRegistry<PageStore>,
}

pub(crate) type SharedApp = Rc<RefCell<App>>;

/// Handles to the page the widget runs on.
#[derive(Clone)]
pub(crate) struct Page {
    pub window: Window,
    pub document: Document,
    pub hooks: Rc<DomHooks>,
}

impl Page {
    /// First element matching `selector`. Invalid selectors match nothing.
    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }
}

/// Boot the widget on the current page.
pub fn boot() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("window has no document"))?;

    let (config, config_error) = match read_page_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (WidgetConfig::default(), Some(e)),
    };
    logging::init(config.level());
    if let Some(e) = config_error {
        warn!(error = %e, "page configuration ignored");
    }

    if !claim_page(&window).context("checking init flag")? {
        debug!("widget already running on this page");
        return Ok(());
    }

    let page = Page {
        window,
        document,
        hooks: Rc::new(config.hooks.clone()),
    };
    let mut state = WidgetState::open(open_store(), config);
    state.ui.open_dropdowns = extract::open_dropdowns(&page.document, &page.hooks);
    info!(items = state.cart.unique_item_count(), "widget started");

    let app: SharedApp = Rc::new(RefCell::new(App {
        state,
        registry: CommandRegistry::new(),
    }));

    listeners::attach(&page, &app).context("attaching listeners")?;
    render::prepare_checkout(&page);
    commit(&page, &app, &[Effect::RenderCart], None);
    Ok(())
}

/// Run `command` and commit its effects.
///
/// Dropdown state is read back from the page first, since its markup can
/// open a dropdown on its own. Events fired while another handler holds the
/// app (a `focusout` caused by re-rendering the drawer, for instance) are
/// dropped.
pub(crate) fn dispatch(page: &Page, app: &SharedApp, command: Command, origin: Option<&Element>) {
    let kind = command.kind();
    let Ok(mut guard) = app.try_borrow_mut() else {
        debug!(?kind, "re-entrant event dropped");
        return;
    };
    let App { state, registry } = &mut *guard;
    if matches!(kind, CommandKind::DropdownClick | CommandKind::KeyDown) {
        state.ui.open_dropdowns = extract::open_dropdowns(&page.document, &page.hooks);
    }
    let effects = registry.dispatch(state, command);
    render::apply(page, state, &effects, origin);
}

fn commit(page: &Page, app: &SharedApp, effects: &[Effect], origin: Option<&Element>) {
    match app.try_borrow() {
        Ok(app) => render::apply(page, &app.state, effects, origin),
        Err(_) => debug!("render skipped while busy"),
    }
}

/// Set the init flag. Returns `false` if it was already set.
fn claim_page(window: &Window) -> Result<bool, WidgetError> {
    let key = JsValue::from_str(INIT_FLAG);
    let current = js_sys::Reflect::get(window, &key).map_err(js_error)?;
    if current.is_truthy() {
        return Ok(false);
    }
    js_sys::Reflect::set(window, &key, &JsValue::TRUE).map_err(js_error)?;
    Ok(true)
}

/// Read the optional TOML configuration embedded in the page.
fn read_page_config(document: &Document) -> Result<WidgetConfig, WidgetError> {
    let selector = DomHooks::default().config_script;
    let source = document
        .query_selector(&selector)
        .map_err(js_error)?
        .and_then(|script| script.text_content());

    match source {
        Some(source) => WidgetConfig::from_toml(&source),
        None => Ok(WidgetConfig::default()),
    }
}

/// `localStorage`, or an in-memory cart for this page view when storage is
/// unavailable.
fn open_store() -> PageStore {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!(error = %e, "localStorage unavailable, cart will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

pub(crate) fn js_error(value: JsValue) -> WidgetError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    WidgetError::Dom(message)
}
