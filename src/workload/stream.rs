//! Reference stream generation.

use std::collections::HashSet;
use std::ops::Deref;

use crate::common::config::{BASE_SLOT_MAX, BASE_STRIDE};
use crate::common::Address;
use crate::workload::rng::{locality_offset, RandomSource};

/// A fixed sequence of memory references.
///
/// Generated once per trial and shared read-only by every policy
/// evaluated in that trial, so all policies see the identical stream.
///
/// # Layout
/// ```text
///   group 0 (base b0)      group 1 (base b1)            group n-1
/// ┌──────────────────────┬──────────────────────┬─────┬──────────┐
/// │ b0+o, b0+o, ... b0+o │ b1+o, b1+o, ... b1+o │ ... │   ...    │
/// └──────────────────────┴──────────────────────┴─────┴──────────┘
///   b = 25 * U(0, 9)       o = U(0,5) + U(0,5) + U(0,5) + U(0,5) + U(0,5)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceStream {
    addresses: Vec<Address>,
}

impl ReferenceStream {
    /// Generate `length` references split into `groups` locality groups.
    ///
    /// # Panics
    /// Panics if `groups` is 0 or `length` is not a multiple of `groups`.
    /// [`SimulationConfig::validate`](crate::simulation::SimulationConfig::validate)
    /// rejects such parameters up front.
    pub fn generate<R: RandomSource>(rng: &mut R, length: usize, groups: usize) -> Self {
        assert!(
            groups > 0 && length % groups == 0,
            "stream length {length} must split into {groups} equal groups"
        );
        let group_size = length / groups;

        let mut addresses = Vec::with_capacity(length);
        for _ in 0..groups {
            let base = BASE_STRIDE * rng.uniform(0, BASE_SLOT_MAX);
            for _ in 0..group_size {
                addresses.push(Address(base + locality_offset(rng)));
            }
        }

        Self { addresses }
    }

    /// Build a stream from explicit addresses.
    pub fn from_addresses(addresses: Vec<Address>) -> Self {
        Self { addresses }
    }

    /// Build a stream from raw address values.
    ///
    /// # Example
    /// ```
    /// use pagesim::workload::ReferenceStream;
    ///
    /// let stream = ReferenceStream::from_values(&[1, 2, 3, 1]);
    /// assert_eq!(stream.len(), 4);
    /// assert_eq!(stream.distinct(), 3);
    /// ```
    pub fn from_values(values: &[u32]) -> Self {
        Self {
            addresses: values.iter().copied().map(Address).collect(),
        }
    }

    /// The references in order.
    pub fn as_slice(&self) -> &[Address] {
        &self.addresses
    }

    /// Number of distinct addresses referenced.
    pub fn distinct(&self) -> usize {
        self.addresses.iter().collect::<HashSet<_>>().len()
    }
}

impl Deref for ReferenceStream {
    type Target = [Address];

    fn deref(&self) -> &[Address] {
        &self.addresses
    }
}

impl FromIterator<Address> for ReferenceStream {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::{LOCALITY_GROUPS, MAX_ADDRESS, STREAM_LENGTH};
    use crate::workload::{ReplaySource, SimRng, RAND_MAX};

    #[test]
    fn test_generate_length() {
        let mut rng = SimRng::seeded(1);
        let stream = ReferenceStream::generate(&mut rng, STREAM_LENGTH, LOCALITY_GROUPS);
        assert_eq!(stream.len(), STREAM_LENGTH);
        assert!(stream.iter().all(|a| a.0 <= MAX_ADDRESS));
    }

    #[test]
    fn test_groups_cluster_around_base() {
        let mut rng = SimRng::seeded(2);
        let stream = ReferenceStream::generate(&mut rng, 1000, 10);

        for group in stream.chunks(100) {
            // The base is the largest multiple of 25 not above the minimum.
            let min = group.iter().min().unwrap().0;
            let max = group.iter().max().unwrap().0;
            assert!(max - min <= 25, "group spread {min}..={max}");
            let base = min - min % BASE_STRIDE;
            assert!(base <= BASE_STRIDE * BASE_SLOT_MAX);
            assert!(max <= base + 2 * BASE_STRIDE);
        }
    }

    #[test]
    fn test_replayed_draws_are_exact() {
        // Every U(0,9) and U(0,5) lands in bucket 2: base 50, offset 10.
        let base_bucket = RAND_MAX / 10;
        let offset_bucket = RAND_MAX / 6;
        let mut values = vec![2 * base_bucket];
        values.extend(std::iter::repeat(2 * offset_bucket).take(5 * 4));
        let mut src = ReplaySource::new(values);

        let stream = ReferenceStream::generate(&mut src, 4, 1);
        assert_eq!(stream.as_slice(), &[Address(60); 4]);
        assert_eq!(src.consumed(), 21);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a = ReferenceStream::generate(&mut SimRng::seeded(9), 200, 2);
        let b = ReferenceStream::generate(&mut SimRng::seeded(9), 200, 2);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "equal groups")]
    fn test_uneven_groups_panic() {
        let mut rng = SimRng::seeded(1);
        ReferenceStream::generate(&mut rng, 1000, 7);
    }

    #[test]
    fn test_distinct() {
        let stream = ReferenceStream::from_values(&[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);
        assert_eq!(stream.len(), 12);
        assert_eq!(stream.distinct(), 5);
    }
}
