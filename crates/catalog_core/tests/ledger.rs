use std::collections::BTreeMap;

use catalog_core::{update, AppState, DownloadLedger, Effect, Item, Msg};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;

fn item(id: &str, downloads: u64) -> Item {
    Item {
        id: id.to_string(),
        title: id.to_string(),
        author_name: String::new(),
        description: String::new(),
        long_description: String::new(),
        version: String::new(),
        game_version: String::new(),
        tags: Vec::new(),
        feature_list: Vec::new(),
        installation_guide: String::new(),
        changelog: String::new(),
        downloads,
        uploaded_at: DateTime::<Utc>::UNIX_EPOCH,
        is_featured: false,
    }
}

fn downloads(state: &AppState, id: &str) -> u64 {
    state.item(id).map(|item| item.downloads).unwrap_or_default()
}

fn ready_state(items: Vec<Item>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::LedgerLoaded(BTreeMap::new()));
    let (state, _) = update(state, Msg::CollectionRefreshed(items));
    state
}

#[test]
fn record_only_raises() {
    let mut ledger = DownloadLedger::default();
    assert!(ledger.record("a", 5));
    assert!(!ledger.record("a", 3));
    assert!(!ledger.record("a", 5));
    assert!(ledger.record("a", 6));
    assert_eq!(ledger.get("a"), Some(6));
    assert_eq!(ledger.get("b"), None);
}

#[test]
fn absorb_is_commutative() {
    let left = BTreeMap::from([("a".to_string(), 4), ("b".to_string(), 1)]);
    let right = BTreeMap::from([("a".to_string(), 2), ("c".to_string(), 9)]);

    let mut one = DownloadLedger::from_entries(left.clone());
    one.absorb(&right);
    let mut two = DownloadLedger::from_entries(right);
    two.absorb(&left);

    assert_eq!(one, two);
    assert_eq!(one.get("a"), Some(4));
}

#[test]
fn local_increment_survives_stale_refresh() {
    let state = ready_state(vec![item("A", 10), item("B", 50)]);
    let (state, effects) = update(state, Msg::DownloadRequested("A".into()));
    assert_eq!(downloads(&state, "A"), 11);
    assert_eq!(
        effects,
        vec![Effect::PersistLedger(BTreeMap::from([("A".to_string(), 11)]))]
    );

    let (state, _) = update(
        state,
        Msg::CollectionRefreshed(vec![item("A", 10), item("B", 50)]),
    );
    assert_eq!(downloads(&state, "A"), 11);
    assert_eq!(downloads(&state, "B"), 50);
}

#[test]
fn remote_value_above_ledger_wins() {
    let state = ready_state(vec![item("A", 10)]);
    let (state, _) = update(state, Msg::DownloadRequested("A".into()));
    let (state, _) = update(state, Msg::CollectionRefreshed(vec![item("A", 40)]));
    assert_eq!(downloads(&state, "A"), 40);

    let (state, effects) = update(state, Msg::DownloadRequested("A".into()));
    assert_eq!(downloads(&state, "A"), 41);
    assert_eq!(
        effects,
        vec![Effect::PersistLedger(BTreeMap::from([("A".to_string(), 41)]))]
    );
}

#[test]
fn unknown_item_starts_at_one() {
    let state = ready_state(Vec::new());
    let (state, _) = update(state, Msg::DownloadRequested("ghost".into()));
    assert_eq!(state.ledger().get("ghost"), Some(1));
}

#[test]
fn stored_ledger_lifts_counters_on_load() {
    let (state, _) = update(
        AppState::new(),
        Msg::CollectionRefreshed(vec![item("A", 10), item("B", 3)]),
    );
    let stored = BTreeMap::from([("A".to_string(), 25), ("B".to_string(), 1)]);
    let (state, effects) = update(state, Msg::LedgerLoaded(stored));
    assert_eq!(downloads(&state, "A"), 25);
    assert_eq!(downloads(&state, "B"), 3);
    assert!(state.is_ledger_ready());
    assert!(effects.is_empty());
}

#[test]
fn nothing_persists_before_ledger_loads() {
    let (state, _) = update(
        AppState::new(),
        Msg::CollectionRefreshed(vec![item("A", 10)]),
    );
    let (state, effects) = update(state, Msg::DownloadRequested("A".into()));
    assert!(effects.is_empty());
    assert_eq!(downloads(&state, "A"), 11);

    // The early increment is merged with what storage held, then written once.
    let stored = BTreeMap::from([("A".to_string(), 7), ("Z".to_string(), 2)]);
    let (state, effects) = update(state, Msg::LedgerLoaded(stored));
    assert_eq!(
        effects,
        vec![Effect::PersistLedger(BTreeMap::from([
            ("A".to_string(), 11),
            ("Z".to_string(), 2),
        ]))]
    );
    assert_eq!(downloads(&state, "A"), 11);
}

#[test]
fn displayed_counters_never_decrease() {
    let mut state = ready_state(vec![item("A", 10), item("B", 50)]);
    let mut last_seen = BTreeMap::from([("A", 10u64), ("B", 50u64)]);
    let script = vec![
        Msg::DownloadRequested("A".into()),
        Msg::CollectionRefreshed(vec![item("A", 0), item("B", 20)]),
        Msg::DownloadRequested("B".into()),
        Msg::CollectionRefreshed(vec![item("A", 12), item("B", 0)]),
        Msg::DownloadRequested("A".into()),
        Msg::CollectionRefreshed(vec![item("A", 5), item("B", 49)]),
    ];
    for msg in script {
        state = update(state, msg).0;
        for (id, previous) in last_seen.iter_mut() {
            let now = downloads(&state, id);
            assert!(now >= *previous, "{id} went from {previous} to {now}");
            *previous = now;
        }
    }
    assert_eq!(downloads(&state, "A"), 13);
    assert_eq!(downloads(&state, "B"), 51);
}
