//! Query-string codec for the shareable filter state.
//!
//! Parameters: `tags` (comma-separated, each tag percent-encoded on its own),
//! `q` (free text), `view` (`discover` or `home`). Parsing never fails;
//! unknown keys and values are ignored.

use url::form_urlencoded;

use crate::ViewMode;

pub const TAGS_PARAM: &str = "tags";
pub const QUERY_PARAM: &str = "q";
pub const VIEW_PARAM: &str = "view";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewParam {
    Discover,
    Home,
}

impl ViewParam {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewParam::Discover => "discover",
            ViewParam::Home => "home",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "discover" => Some(ViewParam::Discover),
            "home" => Some(ViewParam::Home),
            _ => None,
        }
    }
}

/// Filter state as carried by a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pub tags: Vec<String>,
    /// Raw `q` value; trimming happens on write-back.
    pub query: String,
    pub view: Option<ViewParam>,
}

impl UrlState {
    pub fn has_filters(&self) -> bool {
        !self.tags.is_empty() || !self.query.trim().is_empty()
    }

    /// Mode the view should switch to, or `None` to leave it as is.
    ///
    /// An explicit `view=home` wins even when filters are present.
    pub fn target_mode(&self) -> Option<ViewMode> {
        match self.view {
            Some(ViewParam::Home) => Some(ViewMode::Landing),
            Some(ViewParam::Discover) => Some(ViewMode::Listing),
            None if self.has_filters() => Some(ViewMode::Listing),
            None => None,
        }
    }
}

/// Parses a query string, with or without its leading `?`.
///
/// The first occurrence of each parameter wins. Tags are trimmed, empties are
/// dropped and case-insensitive duplicates collapse to their first casing.
pub fn parse_query(raw: &str) -> UrlState {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut tags: Option<String> = None;
    let mut query: Option<String> = None;
    let mut view: Option<String> = None;

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let slot = match &*key {
            TAGS_PARAM => &mut tags,
            QUERY_PARAM => &mut query,
            VIEW_PARAM => &mut view,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    UrlState {
        tags: tags.as_deref().map(split_tags).unwrap_or_default(),
        query: query.unwrap_or_default(),
        view: view.as_deref().and_then(ViewParam::parse),
    }
}

fn split_tags(value: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut tags = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        let lower = tag.to_lowercase();
        if !seen.contains(&lower) {
            seen.push(lower);
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Serializes filter state into a query string without the leading `?`.
///
/// `view=discover` is written for the listing only; landing and detail omit
/// `view`.
pub fn serialize_query(tags: &[String], search_text: &str, mode: ViewMode) -> String {
    let mut pairs = Vec::with_capacity(3);
    if !tags.is_empty() {
        let joined = tags
            .iter()
            .map(|tag| encode(tag))
            .collect::<Vec<_>>()
            .join(",");
        pairs.push(format!("{TAGS_PARAM}={joined}"));
    }

    let trimmed = search_text.trim();
    if !trimmed.is_empty() {
        pairs.push(format!("{QUERY_PARAM}={}", encode(trimmed)));
    }

    if mode == ViewMode::Listing {
        pairs.push(format!("{VIEW_PARAM}={}", ViewParam::Discover.as_str()));
    }

    pairs.join("&")
}

/// `base_path` alone for an empty query, otherwise `base_path?query`.
pub fn full_url(base_path: &str, query: &str) -> String {
    if query.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}?{query}")
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
