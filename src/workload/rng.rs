//! Random sources and unbiased discrete draws.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::common::config::{OFFSET_TERMS, OFFSET_TERM_MAX};

/// Largest raw value a [`RandomSource`] produces (31 bits).
pub const RAND_MAX: u32 = (1 << 31) - 1;

/// A source of raw random values in `0..=RAND_MAX`.
///
/// Policies and the stream generator only ever consume randomness through
/// [`uniform`](RandomSource::uniform), so any source can be swapped in for
/// testing without changing the draw arithmetic.
pub trait RandomSource {
    /// Next raw value in `0..=RAND_MAX`.
    fn next_raw(&mut self) -> u32;

    /// Discrete uniform draw over the closed interval `[lo, hi]`.
    ///
    /// The raw range is cut into `hi - lo + 1` buckets of
    /// `RAND_MAX / (hi - lo + 1)` values each. A raw value that falls in the
    /// leftover partial bucket is rejected and redrawn, so every result is
    /// equally likely.
    ///
    /// # Panics
    /// Panics if `lo > hi` or the interval is wider than `RAND_MAX`.
    fn uniform(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo <= hi, "uniform: empty interval [{lo}, {hi}]");
        let span = hi - lo;
        assert!(span < RAND_MAX, "uniform: interval [{lo}, {hi}] too wide");
        let span = span + 1;
        let bucket = RAND_MAX / span;

        loop {
            let x = self.next_raw() / bucket;
            if x < span {
                return lo + x;
            }
        }
    }
}

/// Bell-shaped offset in `0..=OFFSET_TERMS * OFFSET_TERM_MAX`.
///
/// Sum of `OFFSET_TERMS` independent `U(0, OFFSET_TERM_MAX)` draws.
pub fn locality_offset<R: RandomSource>(rng: &mut R) -> u32 {
    (0..OFFSET_TERMS).map(|_| rng.uniform(0, OFFSET_TERM_MAX)).sum()
}

/// The simulator's random source.
///
/// Wraps `StdRng` and keeps the top 31 bits of each `u32`.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    /// Create a reproducible generator from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the current wall-clock time.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(nanos)
    }

    /// Derive an independent child generator.
    ///
    /// Used to hand each worker and each Random policy its own stream of
    /// values without sharing state.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.inner.next_u64())
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_raw(&mut self) -> u32 {
        self.inner.next_u32() >> 1
    }
}

/// Replays a fixed list of raw values, cycling when exhausted.
///
/// # Example
/// ```
/// use pagesim::workload::{RandomSource, ReplaySource, RAND_MAX};
///
/// // Bucket size for [1, 4] is RAND_MAX / 4; raw value 2 * bucket maps to 3.
/// let bucket = RAND_MAX / 4;
/// let mut src = ReplaySource::new(vec![2 * bucket]);
/// assert_eq!(src.uniform(1, 4), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ReplaySource {
    values: Vec<u32>,
    pos: usize,
}

impl ReplaySource {
    /// Create a source replaying `values` in order.
    ///
    /// # Panics
    /// Panics if `values` is empty or holds a value above `RAND_MAX`.
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "ReplaySource needs at least one value");
        assert!(
            values.iter().all(|&v| v <= RAND_MAX),
            "ReplaySource values must be <= RAND_MAX"
        );
        Self { values, pos: 0 }
    }

    /// Number of raw values consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ReplaySource {
    fn next_raw(&mut self) -> u32 {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}
