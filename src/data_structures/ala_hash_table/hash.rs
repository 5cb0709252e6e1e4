// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hash functions for the Ala Hash Table.
//!
//! The primary hash picks where a probe sequence starts; the secondary hash
//! picks how far each probe jumps when double hashing is enabled. Both are
//! plain functions of the key and the current capacity so that insert and
//! lookup always agree.

use crate::data_structures::ala_hash_table::config::ProbingMode;
use crate::data_structures::ala_hash_table::key::TableKey;

/// Returns the raw primary hash of a key.
pub fn primary_hash<K: TableKey + ?Sized>(key: &K) -> usize {
    key.primary_hash() as usize
}

/// Returns the slot where the probe sequence for `key` starts.
///
/// # Arguments
///
/// * `key` - The key to hash.
/// * `capacity` - The number of slots in the table. Must be non-zero.
pub fn start_index<K: TableKey + ?Sized>(key: &K, capacity: usize) -> usize {
    primary_hash(key) % capacity
}

/// Returns the double hashing step for `key`, always within `[1, capacity - 1]`.
///
/// A zero step would pin the probe sequence to its start slot, so the step is
/// offset by one. Capacities are prime, so every step visits every slot.
///
/// # Arguments
///
/// * `key` - The key to hash.
/// * `capacity` - The number of slots in the table. Must be at least 2.
pub fn secondary_hash<K: TableKey + ?Sized>(key: &K, capacity: usize) -> usize {
    1 + (key.step_mix() as usize % (capacity - 1))
}

/// Returns the distance between consecutive probes for `key`.
pub fn probe_step<K: TableKey + ?Sized>(key: &K, mode: ProbingMode, capacity: usize) -> usize {
    match mode {
        ProbingMode::Linear => 1,
        ProbingMode::Double => secondary_hash(key, capacity),
    }
}
