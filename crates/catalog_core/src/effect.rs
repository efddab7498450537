use std::collections::BTreeMap;

use crate::{ItemDraft, ItemId, ItemPatch};

/// Gap kept above the main content region when scrolling to it.
pub const SCROLL_BUFFER: u32 = 16;

/// Side effects requested by [`crate::update`]; the host executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Smooth-scroll the viewport to [`scroll_target`] of the content region.
    ScrollToContentTop,
    /// Replace the current history entry's query string (no new entry).
    ReplaceUrl { query: String },
    /// Write the full ledger to durable storage.
    PersistLedger(BTreeMap<ItemId, u64>),
    /// Forward a mutation to the catalog store.
    Mutate(StoreMutation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMutation {
    Create(ItemDraft),
    Update { id: ItemId, patch: ItemPatch },
    Delete { id: ItemId },
}

impl StoreMutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            StoreMutation::Create(_) => MutationKind::Create,
            StoreMutation::Update { .. } => MutationKind::Update,
            StoreMutation::Delete { .. } => MutationKind::Delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::Update => write!(f, "update"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Scroll offset for a content region whose top edge sits at `content_top`.
pub fn scroll_target(content_top: u32) -> u32 {
    content_top.saturating_sub(SCROLL_BUFFER)
}
