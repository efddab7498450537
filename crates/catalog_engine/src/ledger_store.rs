//! Durable storage for the download ledger.
//!
//! One storage key maps to one JSON file holding a flat object of
//! item id → highest counter, with no versioning envelope.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use catalog_core::ItemId;
use catalog_logging::{catalog_info, catalog_warn};
use serde_json::Value;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

pub const DOWNLOAD_STORAGE_KEY: &str = "the-entropy-lab::downloads";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read ledger: {0}")]
    Read(#[from] io::Error),
    #[error("ledger JSON error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to write ledger: {0}")]
    Write(#[from] PersistError),
}

pub struct LedgerStore {
    dir: PathBuf,
    key: String,
}

impl LedgerStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(storage_file_name(&self.key))
    }

    /// Reads stored entries. A missing file is an empty ledger; entries whose
    /// value is not a non-negative number are skipped.
    pub fn load(&self) -> Result<BTreeMap<ItemId, u64>, LedgerError> {
        let path = self.path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        let raw: BTreeMap<String, Value> = serde_json::from_str(&text)?;
        let mut entries = BTreeMap::new();
        for (id, value) in raw {
            match counter_value(&value) {
                Some(count) => {
                    entries.insert(id, count);
                }
                None => catalog_warn!("Ignoring ledger entry {} with value {}", id, value),
            }
        }
        Ok(entries)
    }

    /// Like [`LedgerStore::load`], but failures are logged and yield an empty ledger.
    pub fn load_or_empty(&self) -> BTreeMap<ItemId, u64> {
        match self.load() {
            Ok(entries) => {
                catalog_info!(
                    "Loaded {} ledger entries from {:?}",
                    entries.len(),
                    self.path()
                );
                entries
            }
            Err(err) => {
                catalog_warn!("Ledger unavailable at {:?}: {}", self.path(), err);
                BTreeMap::new()
            }
        }
    }

    pub fn save(&self, entries: &BTreeMap<ItemId, u64>) -> Result<PathBuf, LedgerError> {
        let writer = AtomicFileWriter::new(self.dir.clone());
        Ok(writer.write_json(&storage_file_name(&self.key), entries, false)?)
    }
}

/// File name for a storage key: characters unsafe in file names become `_`.
pub fn storage_file_name(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    let stem = if cleaned.is_empty() { "ledger" } else { cleaned };
    format!("{stem}.json")
}

fn counter_value(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    value
        .as_f64()
        .filter(|count| count.is_finite() && *count >= 0.0)
        .map(|count| count.floor() as u64)
}
