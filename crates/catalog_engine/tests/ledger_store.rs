use std::collections::BTreeMap;
use std::fs;

use catalog_engine::{LedgerError, LedgerStore, DOWNLOAD_STORAGE_KEY};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn missing_file_is_empty_ledger() {
    let temp = TempDir::new().unwrap();
    let store = LedgerStore::new(temp.path(), DOWNLOAD_STORAGE_KEY);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_writes_flat_object_and_load_reads_it() {
    let temp = TempDir::new().unwrap();
    let store = LedgerStore::new(temp.path().join("data"), DOWNLOAD_STORAGE_KEY);
    let entries = BTreeMap::from([("neon-grid".to_string(), 11), ("chrome".to_string(), 3)]);

    let path = store.save(&entries).unwrap();
    assert_eq!(path, store.path());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"chrome":3,"neon-grid":11}"#
    );
    assert_eq!(store.load().unwrap(), entries);
}

#[test]
fn invalid_entries_are_skipped() {
    let temp = TempDir::new().unwrap();
    let store = LedgerStore::new(temp.path(), DOWNLOAD_STORAGE_KEY);
    fs::write(
        store.path(),
        r#"{"a": 4, "b": "lots", "c": -2, "d": 7.0, "e": null}"#,
    )
    .unwrap();
    assert_eq!(
        store.load().unwrap(),
        BTreeMap::from([("a".to_string(), 4), ("d".to_string(), 7)])
    );
}

#[test]
fn corrupt_file_degrades_to_empty() {
    let temp = TempDir::new().unwrap();
    let store = LedgerStore::new(temp.path(), DOWNLOAD_STORAGE_KEY);
    fs::write(store.path(), "[1, 2, 3]").unwrap();

    assert!(matches!(store.load(), Err(LedgerError::Parse(_))));
    assert!(store.load_or_empty().is_empty());
}

#[test]
fn unwritable_dir_reports_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocked");
    fs::write(&blocker, "x").unwrap();
    let store = LedgerStore::new(&blocker, DOWNLOAD_STORAGE_KEY);

    let result = store.save(&BTreeMap::from([("a".to_string(), 1)]));
    assert!(matches!(result, Err(LedgerError::Write(_))));
}
