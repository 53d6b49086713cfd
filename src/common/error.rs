//! Error types for pagesim.
//!
//! The simulation itself has no recoverable failure modes. Errors only
//! come from rejecting a [`SimulationConfig`] before a run starts; broken
//! cache invariants are bugs and panic instead.
//!
//! [`SimulationConfig`]: crate::simulation::SimulationConfig

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// At least one trial is required to normalize the fault matrix.
    #[error("trial count must be > 0")]
    ZeroTrials,

    /// At least one worker is required to run the trials.
    #[error("worker count must be > 0")]
    ZeroWorkers,

    /// A working set of size 0 cannot hold the referenced page.
    #[error("working-set sizes must be > 0")]
    ZeroWorkingSet,

    /// The working-set range does not contain any size.
    #[error("empty working-set range {min}..={max}")]
    EmptyWorkingSetRange { min: usize, max: usize },

    /// The stream cannot be split into equal locality groups.
    #[error("stream length {length} is not a positive multiple of {groups} locality groups")]
    UnevenLocalityGroups { length: usize, groups: usize },
}
