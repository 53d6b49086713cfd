//! Eviction policy implementations.
//!
//! Every policy owns one [`CacheStore`] of fixed capacity and consumes a
//! reference stream one address at a time through the shared
//! [`EvictionPolicy`] interface:
//! - [`LruPolicy`] - Least Recently Used
//! - [`FifoPolicy`] - First In, First Out
//! - [`ClockPolicy`] - Second chance with a persistent sweep hand
//! - [`RandomPolicy`] - Uniformly random victim

mod clock;
mod fifo;
mod lru;
mod random;

use std::fmt;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use crate::cache::{CacheStore, PolicyStats};
use crate::common::Address;
use crate::workload::SimRng;

/// Outcome of one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The address was resident.
    Hit,
    /// The address was loaded; `evicted` is the page it displaced, if the
    /// store was full.
    Miss { evicted: Option<Address> },
}

impl Access {
    /// True if this reference forced an eviction.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::Miss { evicted: Some(_) })
    }
}

/// A page-replacement algorithm driving one cache store.
pub trait EvictionPolicy: fmt::Debug {
    /// Which algorithm this is.
    fn kind(&self) -> PolicyKind;

    /// The store being managed.
    fn store(&self) -> &CacheStore;

    /// Process one reference, evicting first if the store is full.
    fn on_reference(&mut self, address: Address) -> Access;

    /// Run the whole stream and collect statistics.
    fn evaluate(&mut self, stream: &[Address]) -> PolicyStats {
        let mut stats = PolicyStats::new();
        for &address in stream {
            stats.record(self.on_reference(address));
            debug_assert!(self.store().len() <= self.store().capacity());
        }
        stats
    }
}

/// The four policies compared by the simulator, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Lru,
    Fifo,
    Clock,
    Random,
}

impl PolicyKind {
    /// All policies in column order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Lru,
        PolicyKind::Fifo,
        PolicyKind::Clock,
        PolicyKind::Random,
    ];

    /// Column index in the fault matrix.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Report column label.
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Lru => "LRU",
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Clock => "CLOCK",
            PolicyKind::Random => "RANDOM",
        }
    }

    /// Build an empty policy of this kind with `capacity` slots.
    ///
    /// Random takes a generator forked from `rng`; the others ignore it.
    pub fn build(self, capacity: usize, rng: &mut SimRng) -> Box<dyn EvictionPolicy> {
        match self {
            PolicyKind::Lru => Box::new(LruPolicy::new(capacity)),
            PolicyKind::Fifo => Box::new(FifoPolicy::new(capacity)),
            PolicyKind::Clock => Box::new(ClockPolicy::new(capacity)),
            PolicyKind::Random => Box::new(RandomPolicy::new(capacity, rng.fork())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::ReferenceStream;

    #[test]
    fn test_kind_order_and_labels() {
        let labels: Vec<_> = PolicyKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["LRU", "FIFO", "CLOCK", "RANDOM"]);
        for (i, kind) in PolicyKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(format!("{}", PolicyKind::Clock), "CLOCK");
    }

    #[test]
    fn test_build_matches_kind() {
        let mut rng = SimRng::seeded(1);
        for kind in PolicyKind::ALL {
            let policy = kind.build(5, &mut rng);
            assert_eq!(policy.kind(), kind);
            assert_eq!(policy.store().capacity(), 5);
            assert!(policy.store().is_empty());
        }
    }

    #[test]
    fn test_access_is_fault() {
        assert!(!Access::Hit.is_fault());
        assert!(!Access::Miss { evicted: None }.is_fault());
        assert!(Access::Miss {
            evicted: Some(Address(1))
        }
        .is_fault());
    }

    #[test]
    fn test_large_capacity_only_compulsory_misses() {
        let stream = ReferenceStream::from_values(&[4, 9, 4, 1, 9, 9, 2, 1, 4]);
        let mut rng = SimRng::seeded(2);

        for kind in PolicyKind::ALL {
            let mut policy = kind.build(stream.distinct(), &mut rng);
            let stats = policy.evaluate(&stream);
            assert_eq!(stats.faults, 0, "{kind}");
            assert_eq!(stats.misses, 4, "{kind}");
            assert_eq!(stats.hits, 5, "{kind}");
        }
    }

    #[test]
    fn test_every_policy_bounded_by_stream_length() {
        let mut rng = SimRng::seeded(3);
        let stream = ReferenceStream::generate(&mut rng, 1000, 10);

        for kind in PolicyKind::ALL {
            for capacity in [1, 2, 7, 20] {
                let mut policy = kind.build(capacity, &mut rng);
                let stats = policy.evaluate(&stream);
                assert!(stats.faults <= stats.misses);
                assert!(stats.misses <= 1000);
                assert_eq!(stats.references, 1000);
                assert_eq!(policy.store().len(), capacity.min(stream.distinct()));
            }
        }
    }
}
