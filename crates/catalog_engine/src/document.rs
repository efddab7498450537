//! Raw catalog documents and their normalization into [`Item`]s.
//!
//! Documents mirror what the remote store holds: most fields are optional and
//! unknown fields are ignored. Nothing past [`normalize_documents`] ever
//! checks whether a field was present.

use std::collections::HashSet;

use catalog_core::{Item, ItemDraft, ItemId, ItemPatch};
use catalog_logging::catalog_warn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHOR: &str = "Night Market Curator";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_GAME_VERSION: &str = "2.1";
const MAX_SLUG_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_version: Option<String>,
    pub tags: Vec<String>,
    pub feature_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_guide: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    /// RFC 3339 creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl CatalogDocument {
    /// Explicit slug when set, otherwise one derived from the title.
    pub fn id(&self) -> ItemId {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => create_slug(&self.title),
        }
    }
}

/// Lowercase ASCII slug: runs of anything outside `[a-z0-9]` become one `-`.
pub fn create_slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub fn normalize_document(doc: &CatalogDocument, now: DateTime<Utc>) -> Item {
    let long_description = doc.description.clone();
    let description = doc
        .tagline
        .as_deref()
        .filter(|tagline| !tagline.is_empty())
        .map_or_else(|| long_description.clone(), str::to_string);

    Item {
        id: doc.id(),
        title: doc.title.clone(),
        author_name: doc
            .author_name
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        description,
        long_description,
        version: doc
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        game_version: doc
            .game_version
            .clone()
            .unwrap_or_else(|| DEFAULT_GAME_VERSION.to_string()),
        tags: doc.tags.clone(),
        feature_list: doc.feature_list.clone(),
        installation_guide: trimmed_or_empty(doc.installation_guide.as_deref()),
        changelog: trimmed_or_empty(doc.changelog.as_deref()),
        downloads: doc.downloads.unwrap_or(0),
        uploaded_at: doc
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now),
        is_featured: doc.is_featured.unwrap_or(false),
    }
}

/// Normalizes a store snapshot, newest first.
///
/// Documents without a usable id are dropped, and so are later documents
/// repeating an earlier id.
pub fn normalize_documents(docs: &[CatalogDocument], now: DateTime<Utc>) -> Vec<Item> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(docs.len());
    for doc in docs {
        let item = normalize_document(doc, now);
        if item.id.is_empty() {
            catalog_warn!("Dropping catalog document without id (title {:?})", doc.title);
            continue;
        }
        if !seen.insert(item.id.clone()) {
            catalog_warn!("Dropping duplicate catalog document {}", item.id);
            continue;
        }
        items.push(item);
    }
    items.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    items
}

/// Builds the stored document for a new entry. Counters start at zero.
pub fn document_from_draft(draft: &ItemDraft, now: DateTime<Utc>) -> CatalogDocument {
    let slug = match draft.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => create_slug(&draft.title),
    };
    let description = [
        Some(draft.description.as_str()),
        draft.tagline.as_deref(),
        Some(draft.title.as_str()),
    ]
    .into_iter()
    .flatten()
    .find(|text| !text.is_empty())
    .unwrap_or_default()
    .to_string();
    let timestamp = now.to_rfc3339();

    CatalogDocument {
        slug: Some(slug),
        title: draft.title.clone(),
        tagline: draft.tagline.clone(),
        description,
        author_name: draft.author_name.clone(),
        version: Some(
            draft
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        ),
        game_version: Some(
            draft
                .game_version
                .clone()
                .unwrap_or_else(|| DEFAULT_GAME_VERSION.to_string()),
        ),
        tags: draft.tags.clone(),
        feature_list: draft.feature_list.clone(),
        installation_guide: trimmed_non_empty(draft.installation_guide.as_deref()),
        changelog: trimmed_non_empty(draft.changelog.as_deref()),
        downloads: Some(0),
        created_at: Some(timestamp.clone()),
        updated_at: Some(timestamp),
        is_featured: Some(draft.is_featured),
    }
}

/// Applies the fields present in `patch` and bumps `updated_at`.
pub fn apply_patch(doc: &mut CatalogDocument, patch: &ItemPatch, now: DateTime<Utc>) {
    if let Some(title) = &patch.title {
        doc.title = title.clone();
    }
    if let Some(tagline) = &patch.tagline {
        doc.tagline = Some(tagline.clone());
    }
    if let Some(description) = &patch.description {
        doc.description = description.clone();
    }
    if let Some(author_name) = &patch.author_name {
        doc.author_name = Some(author_name.trim().to_string());
    }
    if let Some(version) = &patch.version {
        doc.version = Some(version.clone());
    }
    if let Some(game_version) = &patch.game_version {
        doc.game_version = Some(game_version.clone());
    }
    if let Some(tags) = &patch.tags {
        doc.tags = tags.clone();
    }
    if let Some(feature_list) = &patch.feature_list {
        doc.feature_list = feature_list.clone();
    }
    if let Some(guide) = &patch.installation_guide {
        doc.installation_guide = trimmed_non_empty(Some(guide));
    }
    if let Some(changelog) = &patch.changelog {
        doc.changelog = trimmed_non_empty(Some(changelog));
    }
    if let Some(is_featured) = patch.is_featured {
        doc.is_featured = Some(is_featured);
    }
    doc.updated_at = Some(now.to_rfc3339());
}

/// Gives every document without a readable `created_at` the timestamp `now`,
/// so its upload time stays put across snapshots. Returns how many changed.
pub fn pin_created_at(docs: &mut [CatalogDocument], now: DateTime<Utc>) -> usize {
    let mut pinned = 0;
    for doc in docs {
        if !has_created_at(doc) {
            doc.created_at = Some(now.to_rfc3339());
            pinned += 1;
        }
    }
    pinned
}

pub(crate) fn has_created_at(doc: &CatalogDocument) -> bool {
    doc.created_at.as_deref().and_then(parse_timestamp).is_some()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn trimmed_non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
