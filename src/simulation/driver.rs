//! Simulation driver - generates streams and fills the fault matrix.

use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::cache::PolicyKind;
use crate::common::Result;
use crate::simulation::{FaultMatrix, FaultTable, SimulationConfig};
use crate::workload::{ReferenceStream, SimRng};

/// Owns one experiment: its configuration and the fault matrix the trials
/// accumulate into.
///
/// # Flow
/// ```text
///   for each trial:
///     stream = ReferenceStream::generate(..)          (shared, read-only)
///     for ws in min..=max:
///       for kind in [LRU, FIFO, CLOCK, RANDOM]:
///         faults = kind.build(ws).evaluate(stream)    (fresh store each time)
///         matrix[ws][kind] += faults
///   table = matrix / trials
/// ```
///
/// Every trial draws from its own generator, forked in trial order from the
/// run's seed, so the result does not depend on how many workers ran it.
///
/// # Usage
/// ```
/// use pagesim::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     trials: 2,
///     stream_length: 100,
///     seed: Some(1),
///     ..Default::default()
/// };
/// let mut sim = Simulation::new(config).unwrap();
/// let table = sim.run();
/// assert_eq!(table.len(), 19);
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    matrix: FaultMatrix,
    trials_run: usize,
}

impl Simulation {
    /// Create a simulation with an empty fault matrix.
    ///
    /// # Errors
    /// Returns the validation error if `config` is not runnable.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let matrix = FaultMatrix::new(config.working_sets());
        Ok(Self {
            config,
            matrix,
            trials_run: 0,
        })
    }

    /// The run parameters.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Fault sums accumulated so far.
    pub fn matrix(&self) -> &FaultMatrix {
        &self.matrix
    }

    /// Number of trials accumulated so far.
    pub fn trials_run(&self) -> usize {
        self.trials_run
    }

    /// Run `config.trials` trials and return the averaged fault table.
    ///
    /// Calling `run` again adds more trials to the same matrix; the table
    /// is always averaged over every trial run so far.
    pub fn run(&mut self) -> FaultTable {
        let trials = self.config.trials;
        let workers = self.config.workers.min(trials);

        let mut rng = match self.config.seed {
            Some(seed) => SimRng::seeded(seed),
            None => SimRng::from_time(),
        };
        let mut trial_rngs: Vec<SimRng> = (0..trials).map(|_| rng.fork()).collect();

        info!(
            trials,
            workers,
            stream_length = self.config.stream_length,
            working_sets = ?self.config.working_sets(),
            "starting simulation"
        );
        let start = Instant::now();

        let first_trial = self.trials_run;
        if workers == 1 {
            let local = run_trials(&self.config, first_trial, &mut trial_rngs);
            self.matrix.merge(&local);
        } else {
            let merged = Mutex::new(FaultMatrix::new(self.config.working_sets()));
            let chunk_len = trials.div_ceil(workers);
            let config = &self.config;

            std::thread::scope(|scope| {
                for (worker, chunk) in trial_rngs.chunks_mut(chunk_len).enumerate() {
                    let merged = &merged;
                    let offset = first_trial + worker * chunk_len;
                    scope.spawn(move || {
                        let local = run_trials(config, offset, chunk);
                        merged.lock().merge(&local);
                        debug!(worker, trials = chunk.len(), "worker finished");
                    });
                }
            });

            self.matrix.merge(&merged.into_inner());
        }
        self.trials_run += trials;

        info!(
            trials = self.trials_run,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "simulation finished"
        );
        self.matrix.normalize(self.trials_run)
    }

    /// Evaluate every policy at every working-set size of `matrix` against
    /// one stream, adding the faults into `matrix`.
    ///
    /// Each (size, policy) pair gets a freshly built, empty policy.
    pub fn run_trial(matrix: &mut FaultMatrix, stream: &ReferenceStream, rng: &mut SimRng) {
        for working_set in matrix.working_sets() {
            for kind in PolicyKind::ALL {
                let mut policy = kind.build(working_set, rng);
                let stats = policy.evaluate(stream);
                trace!(working_set, policy = %kind, %stats, "evaluated");
                matrix.record(working_set, kind, stats.faults);
            }
        }
    }
}

/// Run one trial per generator into a private matrix.
fn run_trials(config: &SimulationConfig, first_trial: usize, rngs: &mut [SimRng]) -> FaultMatrix {
    let mut matrix = FaultMatrix::new(config.working_sets());
    for (i, rng) in rngs.iter_mut().enumerate() {
        debug!(trial = first_trial + i + 1, "starting trial");
        let stream = ReferenceStream::generate(rng, config.stream_length, config.locality_groups);
        Simulation::run_trial(&mut matrix, &stream, rng);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn small_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            trials: 6,
            stream_length: 200,
            locality_groups: 4,
            min_working_set: 2,
            max_working_set: 8,
            workers: 1,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            trials: 0,
            ..small_config(1)
        };
        assert_eq!(Simulation::new(config).unwrap_err(), Error::ZeroTrials);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let a = Simulation::new(small_config(42)).unwrap().run();
        let b = Simulation::new(small_config(42)).unwrap().run();
        assert_eq!(a, b);
    }

    #[test]
    fn test_worker_count_does_not_change_result() {
        let single = Simulation::new(small_config(7)).unwrap().run();
        let parallel = Simulation::new(SimulationConfig {
            workers: 4,
            ..small_config(7)
        })
        .unwrap()
        .run();
        assert_eq!(single, parallel);
    }

    #[test]
    fn test_run_trial_fills_every_cell() {
        let mut rng = SimRng::seeded(3);
        let stream = ReferenceStream::generate(&mut rng, 200, 2);
        let mut matrix = FaultMatrix::new(2..=4);

        Simulation::run_trial(&mut matrix, &stream, &mut rng);

        for ws in 2..=4 {
            for kind in PolicyKind::ALL {
                let faults = matrix.get(ws, kind);
                assert!(faults > 0, "ws {ws} {kind}");
                assert!(faults <= 200);
            }
        }
    }

    #[test]
    fn test_repeated_run_accumulates_trials() {
        let mut sim = Simulation::new(small_config(9)).unwrap();
        sim.run();
        let before = sim.matrix().get(2, PolicyKind::Lru);
        let table = sim.run();

        assert_eq!(sim.trials_run(), 12);
        let after = sim.matrix().get(2, PolicyKind::Lru);
        assert!(after > before);
        assert_eq!(table.get(2, PolicyKind::Lru), Some(after as f64 / 12.0));
    }
}
