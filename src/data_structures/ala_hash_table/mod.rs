// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Ala Hash Table: an open addressing hash table with tombstone deletion.
//!
//! Every entry lives directly in one contiguous array of slots. A key's
//! probe path ("ala") starts at its primary hash and advances by a fixed
//! step of one (linear probing) or by a key dependent step (double hashing)
//! until the key or a free slot is met.
//!
//! # Features
//!
//! - String and integer keys, checked at compile time through [`TableKey`]
//! - Linear probing or double hashing, switchable at runtime
//! - Tombstone deletion that keeps probe paths intact
//! - Prime capacities that grow above a 0.7 load factor and shrink below 0.2
//! - Optional [`ProbeObserver`] hooks for tracing probe decisions
//!
//! # Example
//!
//! ```
//! use ala_hash_lib::data_structures::ala_hash_table::{AlaHashTable, AlaHashTableError};
//!
//! let mut table = AlaHashTable::new();
//!
//! // Insert a value
//! assert_eq!(table.put("hello".to_string(), 42).unwrap(), None);
//!
//! // Retrieve it by borrowed key
//! assert_eq!(table.get("hello"), Ok(&42));
//!
//! // Overwrite returns the previous value
//! assert_eq!(table.put("hello".to_string(), 7).unwrap(), Some(42));
//!
//! // Removal leaves the key absent
//! assert_eq!(table.remove("hello"), Ok(7));
//! assert!(!table.has_key("hello"));
//! assert!(matches!(table.get("hello"), Err(AlaHashTableError::KeyNotFound(_))));
//! ```
//!
//! # Capacity Management
//!
//! Before every insert the table checks whether one more entry would push
//! the load factor above [`MAX_LOAD_FACTOR`]; if so it grows to the next
//! prime after twice its capacity. After a removal that drops the load factor
//! below [`MIN_LOAD_FACTOR`] it shrinks to the largest prime at most half its
//! capacity, never below [`MIN_CAPACITY`]. Both rebuild the array from the
//! live entries, which is also the only way tombstones are reclaimed.
//!
//! ```
//! use ala_hash_lib::data_structures::ala_hash_table::{AlaHashTable, ProbingMode};
//!
//! let mut table = AlaHashTable::with_probing_mode(ProbingMode::Double);
//! for key in 0..8i64 {
//!     table.put(key, key * 10).unwrap();
//! }
//!
//! // The 8th insert grew the table from 11 to 23 slots
//! assert_eq!(table.capacity(), 23);
//! assert!(table.load_factor() <= 0.7);
//! ```

// Module declarations
mod capacity;
mod config;
mod error;
mod hash;
mod key;
mod observer;
mod probe;
mod slot;
mod table;

// Re-exports
pub use capacity::{is_prime, next_prime, prev_prime};
pub use config::{
    AlaHashTableConfig, ProbingMode, DEFAULT_CAPACITY, MAX_LOAD_FACTOR, MIN_CAPACITY,
    MIN_LOAD_FACTOR,
};
pub use error::{AlaHashTableError, Result};
pub use hash::{primary_hash, probe_step, secondary_hash, start_index};
pub use key::{Key, TableKey};
pub use observer::{ProbeEvent, ProbeObserver, SlotOutcome, TracingObserver};
pub use table::{AlaHashTable, Iter, Keys, Values};

#[cfg(test)]
pub(crate) use observer::MockProbeObserver;
