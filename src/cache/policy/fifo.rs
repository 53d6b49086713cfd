//! FIFO (First-In-First-Out) replacement policy.

use crate::cache::policy::{Access, EvictionPolicy, PolicyKind};
use crate::cache::CacheStore;
use crate::common::Address;

/// Evicts pages in the order they were loaded.
///
/// New pages enter at the front; the back is always the oldest load.
/// Hits do not reorder anything.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    store: CacheStore,
}

impl FifoPolicy {
    /// Create an empty FIFO policy with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: CacheStore::new(capacity),
        }
    }
}

impl EvictionPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn store(&self) -> &CacheStore {
        &self.store
    }

    fn on_reference(&mut self, address: Address) -> Access {
        if self.store.contains(address) {
            return Access::Hit;
        }

        let evicted = self.store.is_full().then(|| self.store.pop_back());
        self.store.insert_front(address);
        Access::Miss { evicted }
    }
}
