//! Catalog engine: store adapter, document normalization and durable storage.
mod document;
mod ledger_store;
mod persist;
mod store;
mod subscription;

pub use document::{
    apply_patch, create_slug, document_from_draft, normalize_document, normalize_documents,
    pin_created_at, CatalogDocument, DEFAULT_AUTHOR, DEFAULT_GAME_VERSION, DEFAULT_VERSION,
};
pub use ledger_store::{storage_file_name, LedgerError, LedgerStore, DOWNLOAD_STORAGE_KEY};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use store::{CatalogEvent, CatalogStore, Clock, FileCatalogStore, StoreError};
pub use subscription::Subscription;
