//! Random replacement policy.

use std::fmt;

use crate::cache::policy::{Access, EvictionPolicy, PolicyKind};
use crate::cache::CacheStore;
use crate::common::Address;
use crate::workload::{RandomSource, SimRng};

/// Evicts a uniformly chosen resident page.
///
/// The victim is the `U(1, len)`-th entry counting from the front, drawn
/// with the unbiased [`RandomSource::uniform`]. Hits do not reorder, and
/// new pages enter at the front.
///
/// The random source is a type parameter so tests can replay exact draws.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R = SimRng> {
    store: CacheStore,
    rng: R,
}

impl<R: RandomSource> RandomPolicy<R> {
    /// Create an empty Random policy with `capacity` slots.
    pub fn new(capacity: usize, rng: R) -> Self {
        Self {
            store: CacheStore::new(capacity),
            rng,
        }
    }
}

impl<R: RandomSource + fmt::Debug> EvictionPolicy for RandomPolicy<R> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }

    fn store(&self) -> &CacheStore {
        &self.store
    }

    fn on_reference(&mut self, address: Address) -> Access {
        if self.store.contains(address) {
            return Access::Hit;
        }

        let evicted = if self.store.is_full() {
            let position = self.rng.uniform(1, self.store.len() as u32) as usize;
            let victim = self
                .store
                .nth(position - 1)
                .expect("random victim position within store");
            Some(self.store.remove(victim))
        } else {
            None
        };

        self.store.insert_front(address);
        Access::Miss { evicted }
    }
}
