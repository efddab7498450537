use crate::{Item, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Listing,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub item_count: usize,
    pub total_downloads: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub selected: Option<Item>,
    /// Selected id that no longer resolves to an item.
    pub missing_selection: Option<ItemId>,
    pub active_tags: Vec<String>,
    pub search_text: String,
    pub has_filters: bool,
    pub result_count: usize,
    pub results: Vec<Item>,
    pub featured: Vec<Item>,
    pub newest: Vec<Item>,
    pub trending: Vec<Item>,
    pub available_tags: Vec<String>,
    pub stats: CatalogStats,
    pub loading: bool,
    pub ledger_ready: bool,
    pub last_error: Option<String>,
    pub url_query: String,
    pub dirty: bool,
}

/// Compact stat label: `1.2m`, `35k`, or the plain number.
pub fn format_stat(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}m", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{}k", (value as f64 / 1_000.0).round() as u64)
    } else {
        value.to_string()
    }
}
