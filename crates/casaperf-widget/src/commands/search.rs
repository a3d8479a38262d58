//! Search handlers.

use casaperf_cache::KeyValueStore;
use casaperf_commerce::search::SubmitOutcome;
use tracing::debug;

use super::{Command, Effect, NavigationTarget};
use crate::state::WidgetState;

/// Live search as the shopper types.
pub(super) fn search_input<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::SearchInput { query } = command else {
        return Vec::new();
    };

    state.ui.results = state.search.search(&query).into_iter().cloned().collect();
    state.ui.query = query;
    vec![Effect::RenderSearchResults]
}

/// Explicit submission: go to the best match or tell the shopper nothing
/// was found.
pub(super) fn search_submit<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::SearchSubmit { query } = command else {
        return Vec::new();
    };

    let effects = match state.search.submit(&query) {
        SubmitOutcome::Empty => Vec::new(),
        SubmitOutcome::Navigate { product, exact } => {
            debug!(url = %product.url, exact, "search resolved");
            vec![Effect::Navigate {
                url: product.url.clone(),
                target: NavigationTarget::SameTab,
            }]
        }
        SubmitOutcome::NotFound => {
            state.ui.results.clear();
            vec![
                Effect::RenderSearchResults,
                Effect::Alert(format!("{}{}", state.config.texts.not_found_prefix, query)),
            ]
        }
    };
    state.ui.query = query;
    effects
}

pub(super) fn select_result<S: KeyValueStore>(
    _state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    match command {
        Command::SelectResult { url } if !url.is_empty() => vec![Effect::Navigate {
            url,
            target: NavigationTarget::SameTab,
        }],
        _ => Vec::new(),
    }
}

/// Hide the result list. The query is kept.
pub(super) fn dismiss_search<S: KeyValueStore>(
    state: &mut WidgetState<S>,
    command: Command,
) -> Vec<Effect> {
    let Command::DismissSearch = command else {
        return Vec::new();
    };
    if state.ui.results.is_empty() {
        return Vec::new();
    }

    state.ui.results.clear();
    vec![Effect::RenderSearchResults]
}
