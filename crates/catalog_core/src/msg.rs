use std::collections::BTreeMap;

use crate::{Item, ItemId, MutationKind, StoreMutation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Query string present at startup; opens the URL write-back gate.
    UrlHydrated(String),
    /// Browser back/forward landed on an entry with this query string.
    Navigated(String),
    /// User opened an item.
    ItemSelected(ItemId),
    /// User went back to the landing page.
    HomeRequested,
    /// User chose to browse the full listing.
    ListingOpened,
    /// User left the listing.
    ListingClosed,
    /// User clicked a tag chip.
    TagToggled(String),
    /// User removed one active tag.
    TagCleared(String),
    AllTagsCleared,
    /// User edited the search box (live typing).
    SearchChanged(String),
    /// User pressed enter in the search box.
    SearchSubmitted,
    SearchCleared,
    AllFiltersCleared,
    /// User downloaded an item.
    DownloadRequested(ItemId),
    /// The store pushed a new normalized snapshot.
    CollectionRefreshed(Vec<Item>),
    /// The store subscription reported an error.
    CollectionFailed(String),
    /// Stored ledger entries, or empty if storage was unavailable.
    LedgerLoaded(BTreeMap<ItemId, u64>),
    /// An admin requested a catalog mutation.
    MutationRequested(StoreMutation),
    MutationSucceeded(MutationKind),
    StoreFailed {
        operation: MutationKind,
        message: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
