//! Configuration constants for pagesim.
//!
//! These are the fixed parameters of the experiment. [`SimulationConfig`]
//! uses them as defaults.
//!
//! [`SimulationConfig`]: crate::simulation::SimulationConfig

/// Number of independent trials averaged into the fault table.
pub const TRIALS: usize = 1000;

/// Number of references in one generated stream.
pub const STREAM_LENGTH: usize = 1000;

/// Number of locality groups a stream is split into.
///
/// Each group of `STREAM_LENGTH / LOCALITY_GROUPS` references shares one
/// base address.
pub const LOCALITY_GROUPS: usize = 10;

/// Smallest working-set size under test.
pub const MIN_WORKING_SET: usize = 2;

/// Largest working-set size under test (inclusive).
pub const MAX_WORKING_SET: usize = 20;

/// Distance between two possible group base addresses.
pub const BASE_STRIDE: u32 = 25;

/// Largest base slot; bases are drawn as `BASE_STRIDE * U(0, BASE_SLOT_MAX)`.
pub const BASE_SLOT_MAX: u32 = 9;

/// Number of uniform terms summed into one locality offset.
pub const OFFSET_TERMS: u32 = 5;

/// Upper bound of each offset term, `U(0, OFFSET_TERM_MAX)`.
pub const OFFSET_TERM_MAX: u32 = 5;

/// Largest address the default generator can produce.
pub const MAX_ADDRESS: u32 = BASE_STRIDE * BASE_SLOT_MAX + OFFSET_TERMS * OFFSET_TERM_MAX;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_splits_evenly_into_groups() {
        assert_eq!(STREAM_LENGTH % LOCALITY_GROUPS, 0);
        assert_eq!(STREAM_LENGTH / LOCALITY_GROUPS, 100);
    }

    #[test]
    fn test_max_address() {
        assert_eq!(MAX_ADDRESS, 250);
    }

    #[test]
    fn test_working_set_range() {
        assert!(MIN_WORKING_SET >= 1);
        assert_eq!(MAX_WORKING_SET - MIN_WORKING_SET + 1, 19);
    }
}
