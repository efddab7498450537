use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, Weak};

use catalog_logging::catalog_debug;

use crate::CatalogEvent;

type Sinks = BTreeMap<u64, Sender<CatalogEvent>>;

/// Live subscribers of a store.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    sinks: Sinks,
}

impl SubscriberRegistry {
    pub(crate) fn register(&self, sink: Sender<CatalogEvent>) -> Subscription {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.sinks.insert(id, sink);
        catalog_debug!("Subscriber {} registered", id);
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Sends `event` to one subscriber, dropping it if its receiver is gone.
    pub(crate) fn send_to(&self, id: u64, event: CatalogEvent) {
        let mut inner = lock(&self.inner);
        let disconnected = inner
            .sinks
            .get(&id)
            .is_some_and(|sink| sink.send(event).is_err());
        if disconnected {
            inner.sinks.remove(&id);
        }
    }

    /// Sends `event` to every subscriber, dropping those whose receiver is gone.
    pub(crate) fn broadcast(&self, event: &CatalogEvent) {
        let mut inner = lock(&self.inner);
        inner
            .sinks
            .retain(|_, sink| sink.send(event.clone()).is_ok());
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.inner).sinks.len()
    }
}

/// Handle for a live subscription. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<RegistryInner>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Explicit form of dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).sinks.remove(&self.id);
            catalog_debug!("Subscriber {} unsubscribed", self.id);
        }
    }
}

// A poisoned registry still holds a consistent map; keep serving it.
fn lock(inner: &Mutex<RegistryInner>) -> std::sync::MutexGuard<'_, RegistryInner> {
    inner
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
