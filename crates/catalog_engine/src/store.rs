use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catalog_core::{Item, ItemDraft, ItemId, ItemPatch};
use catalog_logging::{catalog_info, catalog_warn};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::document::{
    apply_patch, document_from_draft, has_created_at, normalize_documents, pin_created_at,
    CatalogDocument,
};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::subscription::{SubscriberRegistry, Subscription};

/// Source of "now" for timestamps the store assigns.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Pushed to subscribers whenever the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    Snapshot(Vec<Item>),
    Failed(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item {0} not found")]
    NotFound(ItemId),
    #[error("item {0} already exists")]
    Duplicate(ItemId),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("catalog file could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// The remote catalog as seen by the host.
pub trait CatalogStore: Send + Sync {
    /// Registers `sink`; it receives the current snapshot immediately and a
    /// fresh one after every change until the returned handle is dropped.
    fn subscribe(&self, sink: Sender<CatalogEvent>) -> Subscription;
    fn create(&self, draft: &ItemDraft) -> Result<ItemId, StoreError>;
    fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Catalog held in memory and optionally mirrored to a JSON array on disk.
pub struct FileCatalogStore {
    path: Option<PathBuf>,
    documents: Mutex<Vec<CatalogDocument>>,
    subscribers: SubscriberRegistry,
    clock: Clock,
}

impl FileCatalogStore {
    /// Opens the catalog at `path`. A missing file is an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let documents = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                catalog_warn!("Catalog file {:?} not found; starting empty", path);
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        let store = Self::build(Some(path), documents);
        catalog_info!(
            "Opened catalog {:?} with {} documents",
            store.path,
            store.documents().len()
        );
        Ok(store)
    }

    pub fn in_memory(documents: Vec<CatalogDocument>) -> Self {
        Self::build(None, documents)
    }

    fn build(path: Option<PathBuf>, documents: Vec<CatalogDocument>) -> Self {
        Self {
            path,
            documents: Mutex::new(documents),
            subscribers: SubscriberRegistry::default(),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Current normalized snapshot.
    pub fn snapshot(&self) -> Vec<Item> {
        let now = (self.clock)();
        let mut documents = self.documents();
        pin_created_at(&mut documents, now);
        normalize_documents(&documents, now)
    }

    /// Re-reads the backing file and pushes the result to subscribers.
    ///
    /// On failure the previous documents are kept and subscribers receive
    /// [`CatalogEvent::Failed`].
    pub fn reload(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let loaded = fs::read_to_string(path)
            .map_err(StoreError::from)
            .and_then(|text| {
                serde_json::from_str::<Vec<CatalogDocument>>(&text).map_err(StoreError::from)
            });
        match loaded {
            Ok(mut documents) => {
                let now = (self.clock)();
                let items = {
                    let mut current = self.documents();
                    // Keep timestamps already pinned for documents still lacking one.
                    for doc in documents.iter_mut().filter(|doc| !has_created_at(doc)) {
                        let id = doc.id();
                        if let Some(previous) = current.iter().find(|prev| prev.id() == id) {
                            doc.created_at = previous.created_at.clone();
                        }
                    }
                    pin_created_at(&mut documents, now);
                    let items = normalize_documents(&documents, now);
                    *current = documents;
                    items
                };
                self.subscribers.broadcast(&CatalogEvent::Snapshot(items));
                Ok(())
            }
            Err(err) => {
                catalog_warn!("Failed to reload catalog {:?}: {}", path, err);
                self.subscribers
                    .broadcast(&CatalogEvent::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    fn documents(&self) -> MutexGuard<'_, Vec<CatalogDocument>> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` to a copy of the documents, writes it out and only
    /// then commits it and notifies subscribers.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Vec<CatalogDocument>, DateTime<Utc>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let now = (self.clock)();
        let snapshot = {
            let mut documents = self.documents();
            let mut next = documents.clone();
            let value = change(&mut next, now)?;
            pin_created_at(&mut next, now);
            self.write(&next)?;
            *documents = next;
            (value, normalize_documents(&documents, now))
        };
        let (value, items) = snapshot;
        self.subscribers.broadcast(&CatalogEvent::Snapshot(items));
        Ok(value)
    }

    fn write(&self, documents: &[CatalogDocument]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::InvalidDocument(format!("bad catalog path {path:?}")))?;
        AtomicFileWriter::new(dir).write_json(filename, documents, true)?;
        Ok(())
    }
}

impl CatalogStore for FileCatalogStore {
    fn subscribe(&self, sink: Sender<CatalogEvent>) -> Subscription {
        let subscription = self.subscribers.register(sink);
        self.subscribers
            .send_to(subscription.id(), CatalogEvent::Snapshot(self.snapshot()));
        subscription
    }

    fn create(&self, draft: &ItemDraft) -> Result<ItemId, StoreError> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::InvalidDocument("title is required".into()));
        }
        self.mutate(|documents, now| {
            let document = document_from_draft(draft, now);
            let id = document.id();
            if id.is_empty() {
                return Err(StoreError::InvalidDocument(format!(
                    "cannot derive an id from title {:?}",
                    draft.title
                )));
            }
            if documents.iter().any(|existing| existing.id() == id) {
                return Err(StoreError::Duplicate(id));
            }
            documents.push(document);
            catalog_info!("Created catalog item {}", id);
            Ok(id)
        })
    }

    fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), StoreError> {
        self.mutate(|documents, now| {
            let document = documents
                .iter_mut()
                .find(|existing| existing.id() == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            // Pin the id before a title change could alter a derived one.
            if document.slug.is_none() {
                document.slug = Some(id.to_string());
            }
            apply_patch(document, patch, now);
            catalog_info!("Updated catalog item {}", id);
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.mutate(|documents, _| {
            let before = documents.len();
            documents.retain(|existing| existing.id() != id);
            if documents.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            catalog_info!("Deleted catalog item {}", id);
            Ok(())
        })
    }
}
