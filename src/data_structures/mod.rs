//! Data structures for Ala Hash.
//!
//! This module contains the hash table engine and its supporting types.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Exclusive ownership of internal storage, no shared mutable state
//! - Typed errors for every recoverable failure

pub mod ala_hash_table;

// Re-export common data structures
pub use ala_hash_table::{AlaHashTable, AlaHashTableConfig, AlaHashTableError, Key, ProbingMode};
