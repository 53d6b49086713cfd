//! Experiment driver.
//!
//! # Components
//! - [`SimulationConfig`] - Trial count, stream shape and working-set range
//! - [`Simulation`] - Runs trials and owns the fault matrix
//! - [`FaultMatrix`] / [`FaultTable`] - Fault sums and their per-trial averages

mod config;
mod driver;
mod fault_matrix;

pub use config::SimulationConfig;
pub use driver::Simulation;
pub use fault_matrix::{FaultMatrix, FaultTable};
