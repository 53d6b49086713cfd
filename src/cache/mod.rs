//! Cache simulation core.
//!
//! # Components
//! - [`CacheStore`] - Ordered, capacity-bounded set of resident pages
//! - [`policy`] - Eviction policies that drive a store over a stream
//! - [`PolicyStats`] - Hit/miss/fault counters for one evaluation

pub mod policy;
mod stats;
mod store;

pub use policy::{Access, EvictionPolicy, PolicyKind};
pub use stats::PolicyStats;
pub use store::{CacheStore, Iter};
