//! Common types and utilities shared across pagesim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (Address, EntryId)

pub mod config;
pub mod error;
mod address;
mod entry_id;

pub use address::Address;
pub use entry_id::EntryId;
pub use error::{Error, Result};
