//! Per-evaluation policy statistics.

use std::fmt;

use crate::cache::policy::Access;

/// Counters collected while one policy consumes one stream.
///
/// `misses` counts every reference to a non-resident address, the
/// compulsory ones included. `faults` counts only the misses that found the
/// store full and had to evict; this is the number the fault matrix
/// accumulates.
///
/// # Example
/// ```
/// use pagesim::cache::PolicyStats;
///
/// let stats = PolicyStats { references: 10, hits: 7, misses: 3, faults: 1 };
/// assert_eq!(stats.hit_rate(), 0.7);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyStats {
    pub references: u64,
    pub hits: u64,
    pub misses: u64,
    pub faults: u64,
}

impl PolicyStats {
    /// Create a stats record with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one reference and its outcome.
    #[inline]
    pub fn record(&mut self, access: Access) {
        self.references += 1;
        match access {
            Access::Hit => self.hits += 1,
            Access::Miss { evicted } => {
                self.misses += 1;
                if evicted.is_some() {
                    self.faults += 1;
                }
            }
        }
    }

    /// Fraction of references that hit (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.hits as f64 / self.references as f64
        }
    }

    /// Fraction of references that faulted (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.faults as f64 / self.references as f64
        }
    }
}

impl fmt::Display for PolicyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ refs: {}, hits: {}, misses: {}, faults: {}, hit_rate: {:.2}% }}",
            self.references,
            self.hits,
            self.misses,
            self.faults,
            self.hit_rate() * 100.0
        )
    }
}
