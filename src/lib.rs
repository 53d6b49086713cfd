//! pagesim - a page-replacement simulator.
//!
//! Generates synthetic reference streams with spatial locality and measures
//! how many faults LRU, FIFO, CLOCK and Random eviction produce for a range
//! of working-set sizes, averaged over many independent trials.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           pagesim                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Experiment Driver (simulation/)               │   │
//! │  │     Simulation + SimulationConfig + FaultMatrix          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Workload Generation (workload/)                │   │
//! │  │      RandomSource + SimRng + ReferenceStream             │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Cache Core (cache/)                        │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Eviction Policies: LRU | FIFO | CLOCK | Random │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │          CacheStore + PolicyStats                        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Address, EntryId, Error, config)
//! - [`cache`] - Cache store and eviction policies
//! - [`workload`] - Random sources and reference streams
//! - [`simulation`] - Trial driver and fault matrix
//!
//! # Quick Start
//! ```
//! use pagesim::cache::policy::LruPolicy;
//! use pagesim::cache::EvictionPolicy;
//! use pagesim::workload::ReferenceStream;
//!
//! let stream = ReferenceStream::from_values(&[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);
//! let stats = LruPolicy::new(4).evaluate(&stream);
//! assert_eq!(stats.misses, 8);
//! assert_eq!(stats.faults, 4);
//! ```

pub mod cache;
pub mod common;
pub mod simulation;
pub mod workload;

// Re-export commonly used items at crate root for convenience
pub use cache::{CacheStore, EvictionPolicy, PolicyKind, PolicyStats};
pub use common::{Address, EntryId, Error, Result};
pub use simulation::{FaultMatrix, FaultTable, Simulation, SimulationConfig};
pub use workload::{RandomSource, ReferenceStream, SimRng};
