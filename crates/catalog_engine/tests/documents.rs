use catalog_core::{ItemDraft, ItemPatch};
use catalog_engine::{
    apply_patch, document_from_draft, normalize_document, normalize_documents, CatalogDocument,
    DEFAULT_AUTHOR, DEFAULT_GAME_VERSION, DEFAULT_VERSION,
};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn doc(slug: &str, title: &str, created_at: Option<&str>) -> CatalogDocument {
    CatalogDocument {
        slug: Some(slug.to_string()),
        title: title.to_string(),
        description: format!("{title} description"),
        created_at: created_at.map(str::to_string),
        ..CatalogDocument::default()
    }
}

#[test]
fn missing_fields_get_defaults() {
    let item = normalize_document(&doc("neon", "Neon Grid", None), now());
    assert_eq!(item.id, "neon");
    assert_eq!(item.author_name, DEFAULT_AUTHOR);
    assert_eq!(item.version, DEFAULT_VERSION);
    assert_eq!(item.game_version, DEFAULT_GAME_VERSION);
    assert_eq!(item.downloads, 0);
    assert_eq!(item.uploaded_at, now());
    assert!(!item.is_featured);
    assert_eq!(item.installation_guide, "");
    assert_eq!(item.changelog, "");
}

#[test]
fn tagline_becomes_card_description() {
    let mut document = doc("neon", "Neon Grid", None);
    document.tagline = Some("Glow everywhere".to_string());
    let item = normalize_document(&document, now());
    assert_eq!(item.description, "Glow everywhere");
    assert_eq!(item.long_description, "Neon Grid description");

    document.tagline = Some(String::new());
    let item = normalize_document(&document, now());
    assert_eq!(item.description, "Neon Grid description");
}

#[test]
fn unparseable_timestamp_falls_back_to_now() {
    let item = normalize_document(&doc("a", "A", Some("yesterday")), now());
    assert_eq!(item.uploaded_at, now());
}

#[test]
fn reads_camel_case_json_and_ignores_unknown_fields() {
    let json = r#"{
        "slug": "chrome-arms",
        "title": "Chrome Arms",
        "authorName": "Vex",
        "featureList": ["Reflections"],
        "downloads": 42,
        "createdAt": "2024-06-01T10:00:00Z",
        "isFeatured": true,
        "rating": 5
    }"#;
    let document: CatalogDocument = serde_json::from_str(json).unwrap();
    let item = normalize_document(&document, now());
    assert_eq!(item.author_name, "Vex");
    assert_eq!(item.feature_list, vec!["Reflections".to_string()]);
    assert_eq!(item.downloads, 42);
    assert_eq!(
        item.uploaded_at,
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    );
    assert!(item.featured());
}

#[test]
fn snapshot_is_newest_first_without_duplicates() {
    let docs = vec![
        doc("old", "Old", Some("2024-01-01T00:00:00Z")),
        doc("new", "New", Some("2024-05-01T00:00:00Z")),
        doc("old", "Old Again", Some("2024-09-01T00:00:00Z")),
        doc("", "!!!", None),
        doc("mid", "Mid", Some("2024-03-01T00:00:00+02:00")),
    ];
    let items = normalize_documents(&docs, now());
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
    assert_eq!(items[2].title, "Old");
}

#[test]
fn draft_without_slug_derives_one() {
    let draft = ItemDraft {
        title: "Rain City HUD".to_string(),
        tagline: Some("Wet neon".to_string()),
        tags: vec!["UI".to_string()],
        installation_guide: Some("  ".to_string()),
        ..ItemDraft::default()
    };
    let document = document_from_draft(&draft, now());
    assert_eq!(document.id(), "rain-city-hud");
    assert_eq!(document.description, "Wet neon");
    assert_eq!(document.downloads, Some(0));
    assert_eq!(document.installation_guide, None);
    assert_eq!(document.created_at.as_deref(), Some("2025-03-01T12:00:00+00:00"));
    assert_eq!(document.created_at, document.updated_at);
}

#[test]
fn draft_description_falls_back_to_title() {
    let draft = ItemDraft {
        title: "Bare".to_string(),
        ..ItemDraft::default()
    };
    assert_eq!(document_from_draft(&draft, now()).description, "Bare");
}

#[test]
fn patch_touches_only_present_fields() {
    let mut document = doc("neon", "Neon Grid", Some("2024-01-01T00:00:00Z"));
    document.tags = vec!["UI".to_string()];
    let patch = ItemPatch {
        title: Some("Neon Grid II".to_string()),
        changelog: Some("  Fixed flicker  ".to_string()),
        is_featured: Some(true),
        ..ItemPatch::default()
    };
    apply_patch(&mut document, &patch, now());

    assert_eq!(document.title, "Neon Grid II");
    assert_eq!(document.tags, vec!["UI".to_string()]);
    assert_eq!(document.changelog.as_deref(), Some("Fixed flicker"));
    assert_eq!(document.is_featured, Some(true));
    assert_eq!(document.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(document.updated_at, Some(now().to_rfc3339()));
}
