//! Synthetic workload generation.
//!
//! # Components
//! - [`RandomSource`] - Raw random values plus the unbiased [`RandomSource::uniform`] draw
//! - [`SimRng`] - Production source backed by `rand`'s `StdRng`
//! - [`ReplaySource`] - Deterministic source replaying fixed values
//! - [`ReferenceStream`] - A locality-clustered sequence of addresses

mod rng;
mod stream;

pub use rng::{locality_offset, RandomSource, ReplaySource, SimRng, RAND_MAX};
pub use stream::ReferenceStream;
