//! Catalog core: pure view-state machine, query engine and URL codec.
mod effect;
mod item;
mod ledger;
mod msg;
pub mod query;
mod state;
mod update;
pub mod url_sync;
mod view_model;

pub use effect::{scroll_target, Effect, MutationKind, StoreMutation, SCROLL_BUFFER};
pub use item::{Item, ItemDraft, ItemId, ItemPatch, FEATURED_TAG};
pub use ledger::DownloadLedger;
pub use msg::Msg;
pub use query::CatalogQuery;
pub use state::{AppState, ViewMode};
pub use update::update;
pub use url_sync::{parse_query, serialize_query, UrlState, ViewParam};
pub use view_model::{format_stat, AppViewModel, CatalogStats, Screen};
