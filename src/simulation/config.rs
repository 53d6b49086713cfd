//! Simulation parameters.

use std::ops::RangeInclusive;

use crate::common::config::{
    LOCALITY_GROUPS, MAX_WORKING_SET, MIN_WORKING_SET, STREAM_LENGTH, TRIALS,
};
use crate::common::{Error, Result};

/// Parameters of one simulation run.
///
/// The defaults are the fixed experiment from [`common::config`]; tests and
/// benches shrink them.
///
/// [`common::config`]: crate::common::config
///
/// # Example
/// ```
/// use pagesim::SimulationConfig;
///
/// let config = SimulationConfig {
///     trials: 10,
///     seed: Some(7),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.working_sets().count(), 19);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Independent trials averaged together.
    pub trials: usize,

    /// References per generated stream.
    pub stream_length: usize,

    /// Locality groups per stream.
    pub locality_groups: usize,

    /// Smallest working-set size.
    pub min_working_set: usize,

    /// Largest working-set size (inclusive).
    pub max_working_set: usize,

    /// Threads the trials are split across.
    pub workers: usize,

    /// Fixed seed for reproducible runs; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: TRIALS,
            stream_length: STREAM_LENGTH,
            locality_groups: LOCALITY_GROUPS,
            min_working_set: MIN_WORKING_SET,
            max_working_set: MAX_WORKING_SET,
            workers: 1,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Check that the parameters describe a runnable experiment.
    ///
    /// # Errors
    /// - `Error::ZeroTrials` / `Error::ZeroWorkers`
    /// - `Error::ZeroWorkingSet` if the range starts at 0
    /// - `Error::EmptyWorkingSetRange` if `min > max`
    /// - `Error::UnevenLocalityGroups` if the stream does not split evenly
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::ZeroTrials);
        }
        if self.workers == 0 {
            return Err(Error::ZeroWorkers);
        }
        if self.min_working_set == 0 {
            return Err(Error::ZeroWorkingSet);
        }
        if self.min_working_set > self.max_working_set {
            return Err(Error::EmptyWorkingSetRange {
                min: self.min_working_set,
                max: self.max_working_set,
            });
        }
        if self.locality_groups == 0
            || self.stream_length == 0
            || self.stream_length % self.locality_groups != 0
        {
            return Err(Error::UnevenLocalityGroups {
                length: self.stream_length,
                groups: self.locality_groups,
            });
        }
        Ok(())
    }

    /// Working-set sizes under test.
    pub fn working_sets(&self) -> RangeInclusive<usize> {
        self.min_working_set..=self.max_working_set
    }
}
