//! CLOCK (second chance) replacement policy.

use crate::cache::policy::{Access, EvictionPolicy, PolicyKind};
use crate::cache::CacheStore;
use crate::common::{Address, EntryId};

/// Approximates LRU with one referenced bit per page and a sweeping hand.
///
/// The store is treated as a ring, front to back. The hand persists across
/// evictions:
///
/// ```text
///   FRONT ─► [A r=1] ─► [B r=0] ─► [C r=1] ─► BACK ─┐
///              ▲                                     │
///              └──────────── wraps ──────────────────┘
///
///   hand at A: clear A, advance; B unreferenced → victim.
///   New page takes B's slot (r=1); hand rests on C.
/// ```
///
/// While the store fills up, pages are appended at the back and the hand
/// sits on the back boundary, so the first sweep starts at the front.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    store: CacheStore,
    /// Next entry to inspect; `None` is the back boundary.
    hand: Option<EntryId>,
}

impl ClockPolicy {
    /// Create an empty CLOCK policy with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: CacheStore::new(capacity),
            hand: None,
        }
    }

    /// Address under the hand, or `None` at the back boundary.
    pub fn hand(&self) -> Option<Address> {
        self.hand.map(|id| self.store.address(id))
    }

    /// Advance the hand to the first unreferenced entry, clearing the
    /// referenced bits it passes.
    fn sweep(&mut self) -> EntryId {
        loop {
            let id = match self.hand {
                Some(id) => id,
                None => self.store.front().expect("clock sweep on empty store"),
            };
            if !self.store.is_referenced(id) {
                return id;
            }
            self.store.set_referenced(id, false);
            self.hand = self.store.next(id);
        }
    }
}

impl EvictionPolicy for ClockPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Clock
    }

    fn store(&self) -> &CacheStore {
        &self.store
    }

    fn on_reference(&mut self, address: Address) -> Access {
        if let Some(id) = self.store.lookup(address) {
            self.store.set_referenced(id, true);
            return Access::Hit;
        }

        if !self.store.is_full() {
            let id = self.store.insert_back(address);
            self.store.set_referenced(id, true);
            return Access::Miss { evicted: None };
        }

        let victim = self.sweep();
        let after = self.store.next(victim);
        let evicted = self.store.remove(victim);

        let id = self.store.insert_before(after, address);
        self.store.set_referenced(id, true);
        self.hand = after;

        Access::Miss {
            evicted: Some(evicted),
        }
    }
}
