//! Query engine: pure filtering over the catalog plus the derived carousels.
//!
//! Nothing here mutates or allocates beyond the result vectors, so views can
//! be recomputed on every render.

use std::collections::BTreeSet;

use crate::Item;

/// Maximum length of the newest and trending carousels.
pub const CAROUSEL_LIMIT: usize = 10;

/// Normalized filter: lowercase required tags and a trimmed lowercase text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    tags: Vec<String>,
    text: String,
}

impl CatalogQuery {
    pub fn new<I, S>(tags: I, text: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let lower = tag.as_ref().trim().to_lowercase();
            if !lower.is_empty() && !normalized.contains(&lower) {
                normalized.push(lower);
            }
        }
        Self {
            tags: normalized,
            text: text.trim().to_lowercase(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.text.is_empty()
    }

    /// Every required tag present on the item (AND semantics).
    pub fn matches_tags(&self, item: &Item) -> bool {
        self.tags.iter().all(|tag| item.has_tag_lowercase(tag))
    }

    /// Plain substring containment against the item's searchable text.
    pub fn matches_text(&self, item: &Item) -> bool {
        self.text.is_empty() || item.search_haystack().contains(&self.text)
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matches_tags(item) && self.matches_text(item)
    }
}

/// Items matching `query`, in collection order.
pub fn filter_items<'a>(items: &'a [Item], query: &CatalogQuery) -> Vec<&'a Item> {
    items.iter().filter(|item| query.matches(item)).collect()
}

pub fn featured<'a>(items: &[&'a Item]) -> Vec<&'a Item> {
    items.iter().copied().filter(|item| item.featured()).collect()
}

/// Most recently uploaded first; ties keep input order.
pub fn newest<'a>(items: &[&'a Item]) -> Vec<&'a Item> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    sorted.truncate(CAROUSEL_LIMIT);
    sorted
}

/// Most downloaded first; ties keep input order.
pub fn trending<'a>(items: &[&'a Item]) -> Vec<&'a Item> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.downloads.cmp(&a.downloads));
    sorted.truncate(CAROUSEL_LIMIT);
    sorted
}

/// Distinct tag strings across the whole collection, sorted for display.
///
/// Distinctness is by exact string, so `UI` and `ui` both appear when both
/// are used somewhere in the catalog.
pub fn tag_universe(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
