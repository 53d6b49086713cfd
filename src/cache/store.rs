//! Cache Store - the ordered set of resident pages shared by every policy.
//!
//! Entries live in a `Vec` arena and are linked by index, so detaching and
//! reinserting an entry is O(1) and handles stay valid while other entries
//! move. Two sentinel nodes at reserved indices bound the list:
//!
//! ```text
//!   nodes: Vec<Node>
//!   ┌─────┬──────────┬──────────┬──────────┬──────────┐
//!   │  0  │    1     │    2     │    3     │    4     │
//!   │FRONT│   BACK   │  addr A  │  addr B  │  addr C  │
//!   └─────┴──────────┴──────────┴──────────┴──────────┘
//!
//!   FRONT ─► [A] ◄──► [B] ◄──► [C] ◄── BACK
//!   (most favoured)            (least favoured)
//! ```
//!
//! An address index (`HashMap<Address, EntryId>`) answers `lookup` without
//! walking the list; it always agrees with the linked entries.

use std::collections::HashMap;
use std::fmt;

use crate::common::{Address, EntryId};

/// Arena index of the front sentinel.
const FRONT: usize = 0;

/// Arena index of the back sentinel.
const BACK: usize = 1;

#[derive(Debug, Clone)]
struct Node {
    address: Address,
    /// Second-chance bit; only CLOCK reads it.
    referenced: bool,
    prev: usize,
    next: usize,
    /// False for sentinels and recycled slots.
    live: bool,
}

impl Node {
    fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            address: Address(u32::MAX),
            referenced: false,
            prev,
            next,
            live: false,
        }
    }
}

/// A capacity-bounded, ordered collection of resident pages.
///
/// # Invariants
/// - `len() <= capacity()` after every operation
/// - every resident address appears exactly once
/// - the front and back sentinels are never removed, so traversal in
///   either direction always terminates at a boundary
///
/// Violating an invariant (inserting into a full store, inserting a
/// resident address, using a removed handle) is a bug and panics.
///
/// # Example
/// ```
/// use pagesim::cache::CacheStore;
/// use pagesim::Address;
///
/// let mut store = CacheStore::new(3);
/// let a = store.insert_front(Address(1));
/// store.insert_front(Address(2));
/// store.move_to_front(a);
///
/// assert_eq!(store.iter().collect::<Vec<_>>(), vec![Address(1), Address(2)]);
/// assert_eq!(store.lookup(Address(2)), store.back());
/// ```
#[derive(Debug, Clone)]
pub struct CacheStore {
    nodes: Vec<Node>,
    /// Recycled arena slots.
    free: Vec<usize>,
    index: HashMap<Address, EntryId>,
    capacity: usize,
}

impl CacheStore {
    /// Create an empty store holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::sentinel(FRONT, BACK));
        nodes.push(Node::sentinel(FRONT, BACK));

        Self {
            nodes,
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Maximum number of resident entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// True if another insert would exceed capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    // ========================================================================
    // Lookup and entry access
    // ========================================================================

    /// Find the resident entry holding `address`.
    #[inline]
    pub fn lookup(&self, address: Address) -> Option<EntryId> {
        self.index.get(&address).copied()
    }

    /// True if `address` is resident.
    #[inline]
    pub fn contains(&self, address: Address) -> bool {
        self.index.contains_key(&address)
    }

    /// Address held by `id`.
    pub fn address(&self, id: EntryId) -> Address {
        self.node(id).address
    }

    /// Second-chance bit of `id`.
    pub fn is_referenced(&self, id: EntryId) -> bool {
        self.node(id).referenced
    }

    /// Set the second-chance bit of `id`.
    pub fn set_referenced(&mut self, id: EntryId, referenced: bool) {
        self.node_mut(id).referenced = referenced;
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Entry at the front, if any.
    pub fn front(&self) -> Option<EntryId> {
        Self::entry_at(self.nodes[FRONT].next)
    }

    /// Entry at the back, if any.
    pub fn back(&self) -> Option<EntryId> {
        Self::entry_at(self.nodes[BACK].prev)
    }

    /// Entry after `id`, or `None` when `id` is at the back boundary.
    pub fn next(&self, id: EntryId) -> Option<EntryId> {
        Self::entry_at(self.node(id).next)
    }

    /// Entry before `id`, or `None` when `id` is at the front boundary.
    pub fn prev(&self, id: EntryId) -> Option<EntryId> {
        Self::entry_at(self.node(id).prev)
    }

    /// The `n`-th entry counting from the front (0-based). O(n).
    pub fn nth(&self, n: usize) -> Option<EntryId> {
        self.entries().nth(n)
    }

    /// Resident addresses from front to back.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            current: self.nodes[FRONT].next,
        }
    }

    /// Entry handles from front to back.
    pub fn entries(&self) -> impl Iterator<Item = EntryId> + '_ {
        let mut current = self.nodes[FRONT].next;
        std::iter::from_fn(move || {
            let id = Self::entry_at(current)?;
            current = self.nodes[current].next;
            Some(id)
        })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `address` as the new front entry.
    pub fn insert_front(&mut self, address: Address) -> EntryId {
        let first = self.nodes[FRONT].next;
        self.insert_at(first, address)
    }

    /// Insert `address` as the new back entry.
    pub fn insert_back(&mut self, address: Address) -> EntryId {
        self.insert_at(BACK, address)
    }

    /// Insert `address` immediately before `anchor`.
    ///
    /// `None` anchors at the back boundary, which is the same as
    /// [`insert_back`](Self::insert_back).
    pub fn insert_before(&mut self, anchor: Option<EntryId>, address: Address) -> EntryId {
        let before = match anchor {
            Some(id) => self.live_index(id),
            None => BACK,
        };
        self.insert_at(before, address)
    }

    /// Detach and free `id`, returning the address it held.
    ///
    /// The handle is invalid afterwards; its slot may be reused.
    pub fn remove(&mut self, id: EntryId) -> Address {
        let idx = self.live_index(id);
        self.unlink(idx);

        let node = &mut self.nodes[idx];
        node.live = false;
        node.referenced = false;
        let address = node.address;

        self.free.push(idx);
        self.index.remove(&address);
        address
    }

    /// Remove the back entry.
    ///
    /// # Panics
    /// Panics if the store is empty.
    pub fn pop_back(&mut self) -> Address {
        let id = self.back().expect("pop_back on empty cache store");
        self.remove(id)
    }

    /// Move `id` to the front without reallocating it.
    pub fn move_to_front(&mut self, id: EntryId) {
        let idx = self.live_index(id);
        if self.nodes[FRONT].next == idx {
            return;
        }
        self.unlink(idx);
        let first = self.nodes[FRONT].next;
        self.link_before(first, idx);
    }

    /// Remove every entry, keeping capacity.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[FRONT] = Node::sentinel(FRONT, BACK);
        self.nodes[BACK] = Node::sentinel(FRONT, BACK);
        self.free.clear();
        self.index.clear();
    }

    // ========================================================================
    // Internal: arena surgery
    // ========================================================================

    fn insert_at(&mut self, before: usize, address: Address) -> EntryId {
        assert!(
            !self.is_full(),
            "insert into full cache store (capacity {})",
            self.capacity
        );
        assert!(!self.contains(address), "address {address} already resident");

        let node = Node {
            address,
            referenced: false,
            prev: before,
            next: before,
            live: true,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.link_before(before, idx);
        let id = EntryId(idx);
        self.index.insert(address, id);
        id
    }

    /// Splice the detached node `idx` in front of `before`.
    fn link_before(&mut self, before: usize, idx: usize) {
        let prev = self.nodes[before].prev;
        self.nodes[idx].prev = prev;
        self.nodes[idx].next = before;
        self.nodes[prev].next = idx;
        self.nodes[before].prev = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let Node { prev, next, .. } = self.nodes[idx];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx].prev = idx;
        self.nodes[idx].next = idx;
    }

    #[inline]
    fn entry_at(idx: usize) -> Option<EntryId> {
        (idx != FRONT && idx != BACK).then_some(EntryId(idx))
    }

    fn live_index(&self, id: EntryId) -> usize {
        match self.nodes.get(id.0) {
            Some(node) if node.live => id.0,
            _ => panic!("{id} is not a resident entry"),
        }
    }

    fn node(&self, id: EntryId) -> &Node {
        &self.nodes[self.live_index(id)]
    }

    fn node_mut(&mut self, id: EntryId) -> &mut Node {
        let idx = self.live_index(id);
        &mut self.nodes[idx]
    }

    /// Walk the list in both directions and check it against the index.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len() <= self.capacity, "size above capacity");
        assert!(!self.nodes[FRONT].live && !self.nodes[BACK].live);

        let mut count = 0;
        let mut prev = FRONT;
        let mut current = self.nodes[FRONT].next;
        while current != BACK {
            let node = &self.nodes[current];
            assert!(node.live, "dead node {current} linked");
            assert_eq!(node.prev, prev, "broken prev link at {current}");
            assert_eq!(self.index.get(&node.address), Some(&EntryId(current)));
            count += 1;
            assert!(count <= self.len(), "cycle in cache store");
            prev = current;
            current = node.next;
        }
        assert_eq!(self.nodes[BACK].prev, prev);
        assert_eq!(count, self.len());
        assert_eq!(self.nodes.len() - 2, self.len() + self.free.len());
    }
}

/// Iterator over resident addresses from front to back.
pub struct Iter<'a> {
    store: &'a CacheStore,
    current: usize,
}

impl Iterator for Iter<'_> {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.current == BACK {
            return None;
        }
        let node = &self.store.nodes[self.current];
        self.current = node.next;
        Some(node.address)
    }
}

impl fmt::Display for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, address) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{address}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(store: &CacheStore) -> Vec<u32> {
        store.iter().map(|a| a.0).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CacheStore::new(4);
        assert_eq!(store.capacity(), 4);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.front(), None);
        assert_eq!(store.back(), None);
        store.debug_validate_invariants();
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        CacheStore::new(0);
    }

    #[test]
    fn test_insert_front_and_back() {
        let mut store = CacheStore::new(4);
        store.insert_front(Address(2));
        store.insert_front(Address(1));
        store.insert_back(Address(3));

        assert_eq!(addrs(&store), vec![1, 2, 3]);
        assert_eq!(store.address(store.front().unwrap()), Address(1));
        assert_eq!(store.address(store.back().unwrap()), Address(3));
        store.debug_validate_invariants();
    }

    #[test]
    fn test_lookup() {
        let mut store = CacheStore::new(4);
        let id = store.insert_back(Address(7));
        store.insert_back(Address(8));

        assert_eq!(store.lookup(Address(7)), Some(id));
        assert_eq!(store.lookup(Address(9)), None);
        assert!(store.contains(Address(8)));
    }

    #[test]
    fn test_remove_middle() {
        let mut store = CacheStore::new(4);
        store.insert_back(Address(1));
        let mid = store.insert_back(Address(2));
        store.insert_back(Address(3));

        assert_eq!(store.remove(mid), Address(2));
        assert_eq!(addrs(&store), vec![1, 3]);
        assert_eq!(store.lookup(Address(2)), None);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_removed_slot_is_reused() {
        let mut store = CacheStore::new(2);
        let a = store.insert_back(Address(1));
        store.insert_back(Address(2));
        store.remove(a);
        let c = store.insert_front(Address(3));

        assert_eq!(c, a);
        assert_eq!(addrs(&store), vec![3, 2]);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_move_to_front() {
        let mut store = CacheStore::new(3);
        store.insert_back(Address(1));
        store.insert_back(Address(2));
        let last = store.insert_back(Address(3));

        store.move_to_front(last);
        assert_eq!(addrs(&store), vec![3, 1, 2]);

        // Already at the front: no change.
        store.move_to_front(last);
        assert_eq!(addrs(&store), vec![3, 1, 2]);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_insert_before() {
        let mut store = CacheStore::new(4);
        store.insert_back(Address(1));
        let three = store.insert_back(Address(3));

        store.insert_before(Some(three), Address(2));
        store.insert_before(None, Address(4));

        assert_eq!(addrs(&store), vec![1, 2, 3, 4]);
        store.debug_validate_invariants();
    }

    #[test]
    fn test_navigation() {
        let mut store = CacheStore::new(3);
        let a = store.insert_back(Address(1));
        let b = store.insert_back(Address(2));
        let c = store.insert_back(Address(3));

        assert_eq!(store.next(a), Some(b));
        assert_eq!(store.next(c), None);
        assert_eq!(store.prev(a), None);
        assert_eq!(store.prev(c), Some(b));
        assert_eq!(store.nth(0), Some(a));
        assert_eq!(store.nth(2), Some(c));
        assert_eq!(store.nth(3), None);
        assert_eq!(store.entries().collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn test_referenced_bit() {
        let mut store = CacheStore::new(2);
        let id = store.insert_back(Address(1));
        assert!(!store.is_referenced(id));

        store.set_referenced(id, true);
        assert!(store.is_referenced(id));
    }

    #[test]
    fn test_pop_back_and_clear() {
        let mut store = CacheStore::new(3);
        store.insert_back(Address(1));
        store.insert_back(Address(2));

        assert_eq!(store.pop_back(), Address(2));
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.front(), None);
        store.debug_validate_invariants();
    }

    #[test]
    #[should_panic(expected = "insert into full cache store")]
    fn test_insert_into_full_panics() {
        let mut store = CacheStore::new(1);
        store.insert_back(Address(1));
        store.insert_back(Address(2));
    }

    #[test]
    #[should_panic(expected = "already resident")]
    fn test_duplicate_insert_panics() {
        let mut store = CacheStore::new(2);
        store.insert_back(Address(1));
        store.insert_front(Address(1));
    }

    #[test]
    #[should_panic(expected = "is not a resident entry")]
    fn test_stale_handle_panics() {
        let mut store = CacheStore::new(2);
        let id = store.insert_back(Address(1));
        store.remove(id);
        store.address(id);
    }

    #[test]
    #[should_panic(expected = "pop_back on empty")]
    fn test_pop_back_empty_panics() {
        let mut store = CacheStore::new(2);
        store.pop_back();
    }

    #[test]
    fn test_display() {
        let mut store = CacheStore::new(3);
        assert_eq!(format!("{}", store), "[]");
        store.insert_back(Address(4));
        store.insert_back(Address(25));
        assert_eq!(format!("{}", store), "[4, 25]");
    }
}
