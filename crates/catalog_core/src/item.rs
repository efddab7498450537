use chrono::{DateTime, Utc};

pub type ItemId = String;

/// Tag that marks an item as featured even when its explicit flag is unset.
pub const FEATURED_TAG: &str = "Featured";

/// A normalized catalog entry.
///
/// Items reach the core only through the adapter's normalization step, so
/// every field is present; optional remote fields have already been defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub author_name: String,
    /// Short description shown on cards.
    pub description: String,
    pub long_description: String,
    pub version: String,
    pub game_version: String,
    /// Display casing is preserved; comparisons are case-insensitive.
    pub tags: Vec<String>,
    pub feature_list: Vec<String>,
    pub installation_guide: String,
    pub changelog: String,
    pub downloads: u64,
    pub uploaded_at: DateTime<Utc>,
    pub is_featured: bool,
}

impl Item {
    pub fn featured(&self) -> bool {
        self.is_featured || self.tags.iter().any(|tag| tag == FEATURED_TAG)
    }

    /// `needle` must already be lowercase.
    pub(crate) fn has_tag_lowercase(&self, needle: &str) -> bool {
        self.tags.iter().any(|tag| tag.to_lowercase() == needle)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.has_tag_lowercase(&tag.to_lowercase())
    }

    /// Lowercased, space-joined text searched by free-text queries.
    pub(crate) fn search_haystack(&self) -> String {
        let tags = self.tags.join(" ");
        let features = self.feature_list.join(" ");
        [
            self.title.as_str(),
            self.description.as_str(),
            self.long_description.as_str(),
            self.author_name.as_str(),
            tags.as_str(),
            features.as_str(),
            self.installation_guide.as_str(),
            self.changelog.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// Fields for a new catalog entry, before the store assigns identity,
/// timestamps and counters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemDraft {
    /// Explicit id; derived from the title when absent or blank.
    pub slug: Option<String>,
    pub title: String,
    pub tagline: Option<String>,
    pub description: String,
    pub author_name: Option<String>,
    pub version: Option<String>,
    pub game_version: Option<String>,
    pub tags: Vec<String>,
    pub feature_list: Vec<String>,
    pub installation_guide: Option<String>,
    pub changelog: Option<String>,
    pub is_featured: bool,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub version: Option<String>,
    pub game_version: Option<String>,
    pub tags: Option<Vec<String>>,
    pub feature_list: Option<Vec<String>>,
    pub installation_guide: Option<String>,
    pub changelog: Option<String>,
    pub is_featured: Option<bool>,
}
