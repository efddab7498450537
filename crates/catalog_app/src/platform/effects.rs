use std::io::{self, Write};
use std::sync::mpsc;
use std::sync::Arc;

use catalog_core::{scroll_target, Effect, Msg, StoreMutation};
use catalog_engine::{CatalogStore, LedgerStore};
use catalog_logging::{catalog_debug, catalog_error, catalog_warn};

use super::history::History;

/// Executes effects emitted by `update` against the store, the ledger file,
/// the address bar and the terminal.
pub struct EffectRunner {
    store: Arc<dyn CatalogStore>,
    ledger: LedgerStore,
    content_top: u32,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        ledger: LedgerStore,
        content_top: u32,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            store,
            ledger,
            content_top,
            msg_tx,
        }
    }

    pub fn run(
        &self,
        effects: Vec<Effect>,
        history: &mut History,
        out: &mut impl Write,
    ) -> io::Result<()> {
        for effect in effects {
            match effect {
                Effect::ScrollToContentTop => {
                    writeln!(out, "(scroll to y={})", scroll_target(self.content_top))?;
                }
                Effect::ReplaceUrl { query } => {
                    catalog_debug!("Replacing address with {:?}", query);
                    history.replace(&query);
                }
                Effect::PersistLedger(entries) => match self.ledger.save(&entries) {
                    Ok(path) => catalog_debug!("Ledger saved to {:?}", path),
                    Err(err) => catalog_error!("Failed to persist ledger: {}", err),
                },
                Effect::Mutate(mutation) => self.mutate(mutation),
            }
        }
        Ok(())
    }

    fn mutate(&self, mutation: StoreMutation) {
        let kind = mutation.kind();
        let result = match &mutation {
            StoreMutation::Create(draft) => self.store.create(draft).map(|_| ()),
            StoreMutation::Update { id, patch } => self.store.update(id, patch),
            StoreMutation::Delete { id } => self.store.delete(id),
        };
        let msg = match result {
            Ok(()) => Msg::MutationSucceeded(kind),
            Err(err) => {
                catalog_warn!("Catalog {} failed: {}", kind, err);
                Msg::StoreFailed {
                    operation: kind,
                    message: err.to_string(),
                }
            }
        };
        let _ = self.msg_tx.send(msg);
    }
}
