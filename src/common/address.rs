//! Memory address type.

use std::fmt;

/// A memory reference in a generated stream.
///
/// Using `u32` because generated addresses stay small (the default
/// locality parameters produce 0..=250) and the value is `Copy` and
/// cheap to hash for the store's address index.
///
/// # Example
/// ```
/// use pagesim::Address;
///
/// let addr = Address::new(42);
/// assert_eq!(addr.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub u32);

impl Address {
    /// Create a new Address.
    #[inline]
    pub fn new(value: u32) -> Self {
        Address(value)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
