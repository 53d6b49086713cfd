//! Cache entry handle type.

use std::fmt;

/// Identifies a resident entry inside one [`CacheStore`](crate::cache::CacheStore).
///
/// Using `usize` because:
/// 1. Entries are stored in the store's `Vec` arena
/// 2. Direct indexing without casting: `nodes[entry_id.0]`
/// 3. Handles stay stable while other entries move around the list
///
/// A handle is only meaningful for the store that returned it, and only
/// until that entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub usize);

impl EntryId {
    /// Create a new EntryId.
    #[inline]
    pub fn new(id: usize) -> Self {
        EntryId(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry({})", self.0)
    }
}
