//! Fault accumulation and normalization.

use std::fmt;
use std::ops::RangeInclusive;

use crate::cache::PolicyKind;

const POLICIES: usize = PolicyKind::ALL.len();

/// Running sums of faults, one row per working-set size and one column per
/// policy.
///
/// ```text
///              LRU    FIFO   CLOCK  RANDOM
///   ws = 2   [ sum,   sum,   sum,   sum  ]
///   ws = 3   [ sum,   sum,   sum,   sum  ]
///    ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultMatrix {
    min_working_set: usize,
    rows: Vec<[u64; POLICIES]>,
}

impl FaultMatrix {
    /// Create a zeroed matrix covering `working_sets`.
    ///
    /// # Panics
    /// Panics if the range is empty.
    pub fn new(working_sets: RangeInclusive<usize>) -> Self {
        assert!(!working_sets.is_empty(), "empty working-set range");
        let (min, max) = working_sets.into_inner();
        Self {
            min_working_set: min,
            rows: vec![[0; POLICIES]; max - min + 1],
        }
    }

    /// Working-set sizes covered by this matrix.
    pub fn working_sets(&self) -> RangeInclusive<usize> {
        self.min_working_set..=self.min_working_set + self.rows.len() - 1
    }

    /// Add one evaluation's faults into its cell.
    pub fn record(&mut self, working_set: usize, kind: PolicyKind, faults: u64) {
        let row = self.row(working_set);
        self.rows[row][kind.index()] += faults;
    }

    /// Accumulated faults for one cell.
    pub fn get(&self, working_set: usize, kind: PolicyKind) -> u64 {
        self.rows[self.row(working_set)][kind.index()]
    }

    /// Add every cell of `other` into this matrix.
    ///
    /// # Panics
    /// Panics if the matrices cover different working-set ranges.
    pub fn merge(&mut self, other: &FaultMatrix) {
        assert_eq!(
            self.working_sets(),
            other.working_sets(),
            "merging fault matrices of different shape"
        );
        for (mine, theirs) in self.rows.iter_mut().zip(&other.rows) {
            for (cell, add) in mine.iter_mut().zip(theirs) {
                *cell += add;
            }
        }
    }

    /// Average every cell over `trials`.
    ///
    /// # Panics
    /// Panics if `trials` is 0.
    pub fn normalize(&self, trials: usize) -> FaultTable {
        assert!(trials > 0, "cannot normalize over zero trials");
        let rows = self
            .rows
            .iter()
            .map(|row| row.map(|sum| sum as f64 / trials as f64))
            .collect();
        FaultTable {
            min_working_set: self.min_working_set,
            rows,
        }
    }

    fn row(&self, working_set: usize) -> usize {
        assert!(
            self.working_sets().contains(&working_set),
            "working set {working_set} outside {:?}",
            self.working_sets()
        );
        working_set - self.min_working_set
    }
}

/// Average faults per trial for every (working-set size, policy) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultTable {
    min_working_set: usize,
    rows: Vec<[f64; POLICIES]>,
}

impl FaultTable {
    /// Rows as `(working_set, [LRU, FIFO, CLOCK, RANDOM])`.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[f64; POLICIES])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (self.min_working_set + i, row))
    }

    /// Average faults for one cell, or `None` outside the table.
    pub fn get(&self, working_set: usize, kind: PolicyKind) -> Option<f64> {
        let row = working_set.checked_sub(self.min_working_set)?;
        self.rows.get(row).map(|r| r[kind.index()])
    }

    /// Number of working-set sizes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for FaultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>11}", "Working set")?;
        for kind in PolicyKind::ALL {
            write!(f, "{:>10}", kind.label())?;
        }
        writeln!(f)?;

        for (working_set, row) in self.rows() {
            write!(f, "{working_set:>11}")?;
            for value in row {
                write!(f, "{value:>10.2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
