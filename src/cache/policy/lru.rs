//! LRU (Least Recently Used) replacement policy.

use crate::cache::policy::{Access, EvictionPolicy, PolicyKind};
use crate::cache::CacheStore;
use crate::common::Address;

/// Evicts the page whose last reference is oldest.
///
/// The store is kept in recency order: a hit moves its entry to the front,
/// so the back is always the least recently used page.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    store: CacheStore,
}

impl LruPolicy {
    /// Create an empty LRU policy with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: CacheStore::new(capacity),
        }
    }
}

impl EvictionPolicy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn store(&self) -> &CacheStore {
        &self.store
    }

    fn on_reference(&mut self, address: Address) -> Access {
        if let Some(id) = self.store.lookup(address) {
            self.store.move_to_front(id);
            return Access::Hit;
        }

        let evicted = self.store.is_full().then(|| self.store.pop_back());
        self.store.insert_front(address);
        Access::Miss { evicted }
    }
}
