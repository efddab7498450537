use std::collections::{BTreeMap, HashMap};

use crate::query::{self, CatalogQuery};
use crate::url_sync::{self, UrlState};
use crate::view_model::{AppViewModel, CatalogStats, Screen};
use crate::{DownloadLedger, Item, ItemId};

/// What the main content area is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Curated carousels, no explicit browse.
    #[default]
    Landing,
    /// Full filtered grid.
    Listing,
    /// A single selected item.
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    items: Vec<Item>,
    collection_loaded: bool,
    mode: ViewMode,
    /// Mode shown underneath the detail view.
    return_mode: ViewMode,
    selected: Option<ItemId>,
    active_tags: Vec<String>,
    search_text: String,
    ledger: DownloadLedger,
    ledger_ready: bool,
    url_synced: bool,
    last_written_query: Option<String>,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn active_tags(&self) -> &[String] {
        &self.active_tags
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn ledger(&self) -> &DownloadLedger {
        &self.ledger
    }

    pub fn is_ledger_ready(&self) -> bool {
        self.ledger_ready
    }

    pub fn is_url_synced(&self) -> bool {
        self.url_synced
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_filters(&self) -> bool {
        !self.active_tags.is_empty() || !self.search_text.trim().is_empty()
    }

    pub fn query(&self) -> CatalogQuery {
        CatalogQuery::new(&self.active_tags, &self.search_text)
    }

    /// Query string describing the current filters and mode.
    pub fn url_query(&self) -> String {
        url_sync::serialize_query(&self.active_tags, &self.search_text, self.mode)
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let query = self.query();
        let results = query::filter_items(&self.items, &query);
        let featured = query::featured(&results);
        let newest = query::newest(&results);
        let trending = query::trending(&results);

        let selected_item = self.selected.as_deref().and_then(|id| self.item(id));
        let (screen, missing_selection) = match (self.mode, selected_item) {
            (ViewMode::Detail, Some(_)) => (Screen::Detail, None),
            (ViewMode::Detail, None) => (self.fallback_screen(), self.selected.clone()),
            (ViewMode::Listing, _) => (Screen::Listing, None),
            (ViewMode::Landing, _) => (Screen::Landing, None),
        };

        AppViewModel {
            screen,
            selected: selected_item.filter(|_| screen == Screen::Detail).cloned(),
            missing_selection,
            active_tags: self.active_tags.clone(),
            search_text: self.search_text.clone(),
            has_filters: !query.is_empty(),
            result_count: results.len(),
            results: results.into_iter().cloned().collect(),
            featured: featured.into_iter().cloned().collect(),
            newest: newest.into_iter().cloned().collect(),
            trending: trending.into_iter().cloned().collect(),
            available_tags: query::tag_universe(&self.items),
            stats: CatalogStats {
                item_count: self.items.len(),
                total_downloads: self.items.iter().map(|item| item.downloads).sum(),
            },
            loading: !self.collection_loaded,
            ledger_ready: self.ledger_ready,
            last_error: self.last_error.clone(),
            url_query: self.url_query(),
            dirty: self.dirty,
        }
    }

    fn fallback_screen(&self) -> Screen {
        if self.return_mode == ViewMode::Listing || self.has_filters() {
            Screen::Listing
        } else {
            Screen::Landing
        }
    }

    pub(crate) fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
        if mode != ViewMode::Detail {
            self.clear_selection();
        }
    }

    pub(crate) fn select(&mut self, id: ItemId) {
        if self.mode != ViewMode::Detail {
            self.return_mode = self.mode;
        }
        self.mode = ViewMode::Detail;
        self.selected = Some(id);
        self.dirty = true;
    }

    /// Mode to go back to when the detail view closes.
    pub(crate) fn return_mode(&self) -> ViewMode {
        self.return_mode
    }

    /// Returns whether a selection was cleared.
    pub(crate) fn clear_selection(&mut self) -> bool {
        let had_selection = self.selected.take().is_some();
        if had_selection {
            self.dirty = true;
        }
        had_selection
    }

    pub(crate) fn set_active_tags(&mut self, tags: Vec<String>) {
        if self.active_tags != tags {
            self.active_tags = tags;
            self.dirty = true;
        }
    }

    pub(crate) fn set_search_text(&mut self, text: String) {
        if self.search_text != text {
            self.search_text = text;
            self.dirty = true;
        }
    }

    /// Applies hydrated URL state. Tags and query are replaced; the mode only
    /// changes when the URL asks for one.
    pub(crate) fn apply_url_state(&mut self, url_state: UrlState) {
        if let Some(mode) = url_state.target_mode() {
            self.set_mode(mode);
        }
        self.set_active_tags(url_state.tags);
        self.set_search_text(url_state.query);
    }

    /// Opens the write-back gate. `current` is the query string just hydrated.
    pub(crate) fn mark_url_synced(&mut self, current: &str) {
        self.url_synced = true;
        let current = current.strip_prefix('?').unwrap_or(current);
        self.last_written_query = Some(current.to_string());
    }

    /// Returns the query string to write if it differs from the last one written.
    pub(crate) fn take_pending_url_write(&mut self) -> Option<String> {
        if !self.url_synced {
            return None;
        }
        let query = self.url_query();
        if self.last_written_query.as_deref() == Some(query.as_str()) {
            return None;
        }
        self.last_written_query = Some(query.clone());
        Some(query)
    }

    /// Replaces the collection with a fresh snapshot.
    ///
    /// Each counter becomes the maximum of the remote value, the ledger entry
    /// and the value displayed before the refresh.
    pub(crate) fn replace_items(&mut self, mut items: Vec<Item>) {
        let previous: HashMap<&str, u64> = self
            .items
            .iter()
            .map(|item| (item.id.as_str(), item.downloads))
            .collect();
        for item in &mut items {
            if let Some(shown) = previous.get(item.id.as_str()) {
                item.downloads = item.downloads.max(*shown);
            }
        }
        self.ledger.apply(&mut items);
        self.items = items;
        self.collection_loaded = true;
        self.dirty = true;
    }

    pub(crate) fn mark_collection_loaded(&mut self) {
        if !self.collection_loaded {
            self.collection_loaded = true;
            self.dirty = true;
        }
    }

    /// Increments the displayed counter for `id` and records it in the ledger.
    /// Returns the new value.
    pub(crate) fn increment_downloads(&mut self, id: &str) -> u64 {
        let next = self.item(id).map_or(1, |item| item.downloads + 1);
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.downloads = next;
        }
        self.ledger.record(id, next);
        self.dirty = true;
        next
    }

    /// Merges stored ledger entries and opens the persistence gate.
    /// Returns whether the merged ledger differs from what was stored.
    pub(crate) fn load_ledger(&mut self, stored: &BTreeMap<ItemId, u64>) -> bool {
        self.ledger.absorb(stored);
        self.ledger.apply(&mut self.items);
        self.ledger_ready = true;
        self.dirty = true;
        self.ledger.entries() != stored
    }

    pub(crate) fn set_last_error(&mut self, error: Option<String>) {
        if self.last_error != error {
            self.last_error = error;
            self.dirty = true;
        }
    }
}
