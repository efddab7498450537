use catalog_logging::{catalog_debug, catalog_warn};

use crate::url_sync;
use crate::{AppState, Effect, Msg, ViewMode};

/// Pure update function: applies a message to state and returns any effects.
///
/// After every message the URL write-back is considered: once the first
/// hydration has run, any change to the serialized filters or mode yields a
/// single [`Effect::ReplaceUrl`].
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = match msg {
        Msg::UrlHydrated(raw) => {
            catalog_debug!("Hydrating view state from startup query {:?}", raw);
            hydrate(&mut state, &raw);
            Vec::new()
        }
        Msg::Navigated(raw) => {
            catalog_debug!("Hydrating view state after navigation to {:?}", raw);
            hydrate(&mut state, &raw);
            Vec::new()
        }
        Msg::ItemSelected(id) => {
            state.select(id);
            vec![Effect::ScrollToContentTop]
        }
        Msg::HomeRequested => {
            state.set_mode(ViewMode::Landing);
            Vec::new()
        }
        Msg::ListingOpened => {
            state.set_mode(ViewMode::Listing);
            vec![Effect::ScrollToContentTop]
        }
        Msg::ListingClosed => {
            state.set_mode(ViewMode::Landing);
            vec![Effect::ScrollToContentTop]
        }
        Msg::TagToggled(tag) => toggle_tag(&mut state, &tag),
        Msg::TagCleared(tag) => {
            let normalized = tag.trim().to_lowercase();
            let remaining = state
                .active_tags()
                .iter()
                .filter(|existing| existing.to_lowercase() != normalized)
                .cloned()
                .collect();
            state.set_active_tags(remaining);
            Vec::new()
        }
        Msg::AllTagsCleared => {
            state.set_active_tags(Vec::new());
            Vec::new()
        }
        Msg::SearchChanged(value) => {
            state.set_search_text(value);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            if state.search_text().trim().is_empty() {
                Vec::new()
            } else {
                state.set_mode(ViewMode::Listing);
                vec![Effect::ScrollToContentTop]
            }
        }
        Msg::SearchCleared => {
            state.set_search_text(String::new());
            Vec::new()
        }
        Msg::AllFiltersCleared => {
            state.set_active_tags(Vec::new());
            state.set_search_text(String::new());
            Vec::new()
        }
        Msg::DownloadRequested(id) => {
            let next = state.increment_downloads(&id);
            catalog_debug!("Download count for {} is now {}", id, next);
            if state.is_ledger_ready() {
                vec![Effect::PersistLedger(state.ledger().entries().clone())]
            } else {
                Vec::new()
            }
        }
        Msg::CollectionRefreshed(items) => {
            state.replace_items(items);
            state.set_last_error(None);
            Vec::new()
        }
        Msg::CollectionFailed(message) => {
            catalog_warn!("Catalog subscription failed: {}", message);
            state.mark_collection_loaded();
            state.set_last_error(Some(message));
            Vec::new()
        }
        Msg::LedgerLoaded(stored) => {
            if state.load_ledger(&stored) {
                vec![Effect::PersistLedger(state.ledger().entries().clone())]
            } else {
                Vec::new()
            }
        }
        Msg::MutationRequested(mutation) => vec![Effect::Mutate(mutation)],
        Msg::MutationSucceeded(_) => {
            state.set_last_error(None);
            Vec::new()
        }
        Msg::StoreFailed { operation, message } => {
            catalog_warn!("Catalog {} failed: {}", operation, message);
            state.set_last_error(Some(format!("{operation} failed: {message}")));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    if let Some(query) = state.take_pending_url_write() {
        effects.push(Effect::ReplaceUrl { query });
    }

    (state, effects)
}

fn hydrate(state: &mut AppState, raw: &str) {
    let url_state = url_sync::parse_query(raw);
    state.apply_url_state(url_state);
    state.mark_url_synced(raw);
}

fn toggle_tag(state: &mut AppState, tag: &str) -> Vec<Effect> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Vec::new();
    }

    let normalized = tag.to_lowercase();
    let mut next: Vec<String> = state.active_tags().to_vec();
    let before = next.len();
    next.retain(|existing| existing.to_lowercase() != normalized);
    if next.len() == before {
        next.push(tag.to_string());
    }

    let will_show_listing = !next.is_empty() || !state.search_text().trim().is_empty();
    let listing_visible = state.mode() == ViewMode::Listing;
    let had_selection = state.selected().is_some();
    let should_scroll = (!listing_visible && will_show_listing) || had_selection;

    state.set_active_tags(next);
    if will_show_listing {
        state.set_mode(ViewMode::Listing);
    } else if had_selection {
        let back = state.return_mode();
        state.set_mode(back);
    }

    if should_scroll {
        vec![Effect::ScrollToContentTop]
    } else {
        Vec::new()
    }
}
