// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Capacity management for the Ala Hash Table.
//!
//! Capacities are always prime and never smaller than [`MIN_CAPACITY`]. A prime
//! capacity guarantees that every double hashing step in `[1, capacity - 1]`
//! is coprime with the capacity, so a probe sequence reaches every slot.
//!
//! Resizing allocates a fresh array, moves every live entry into it and drops
//! all tombstones. The replacement is allocated before the live array is
//! touched, so a failed allocation leaves the table as it was.

use crate::data_structures::ala_hash_table::config::{
    ProbingMode, MAX_LOAD_FACTOR, MIN_CAPACITY, MIN_LOAD_FACTOR,
};
use crate::data_structures::ala_hash_table::error::{AlaHashTableError, Result};
use crate::data_structures::ala_hash_table::hash;
use crate::data_structures::ala_hash_table::key::TableKey;
use crate::data_structures::ala_hash_table::slot::Slot;

/// Returns whether `n` is prime, using 6k ± 1 trial division.
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`.
pub fn next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    let mut candidate = if n % 2 == 1 { n } else { n + 1 };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Returns the largest prime less than or equal to `n`, or 2 for `n <= 2`.
pub fn prev_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    let mut candidate = if n % 2 == 1 { n } else { n - 1 };
    while candidate > 2 && !is_prime(candidate) {
        candidate -= 2;
    }
    candidate.max(2)
}

/// Rounds a requested capacity up to a usable one: prime and at least [`MIN_CAPACITY`].
pub fn normalize_capacity(requested: usize) -> usize {
    next_prime(requested.max(MIN_CAPACITY))
}

/// Returns whether inserting one more entry would push the load factor over the maximum.
pub fn needs_growth(count: usize, capacity: usize) -> bool {
    (count + 1) as f64 / capacity as f64 > MAX_LOAD_FACTOR
}

/// Capacity to grow to from `capacity`.
pub fn grown_capacity(capacity: usize) -> usize {
    normalize_capacity(next_prime(capacity.saturating_mul(2)))
}

/// Returns whether the table should shrink after a removal left `count` entries.
pub fn needs_shrink(count: usize, capacity: usize) -> bool {
    capacity > MIN_CAPACITY && (count as f64 / capacity as f64) < MIN_LOAD_FACTOR
}

/// Capacity to shrink to from `capacity`.
pub fn shrunk_capacity(capacity: usize) -> usize {
    MIN_CAPACITY.max(prev_prime(capacity / 2))
}

/// Rebuilds `slots` at `new_capacity` under `mode`, returning the number of live entries.
///
/// Entries are placed along their own probe sequence in the fresh array. The
/// fresh array has no tombstones and keys are unique, so the first free slot
/// on the sequence is the slot a regular insert would pick. Every target slot
/// is chosen before any entry moves, and `slots` is replaced only once all of
/// them are known.
///
/// # Errors
///
/// * `AllocationFailed` if the new array cannot be allocated. `slots` is untouched.
/// * `ProbeExhausted` if `new_capacity` cannot hold every live entry with a
///   slot to spare. `slots` is untouched.
pub(crate) fn rehash<K: TableKey, V>(
    slots: &mut Vec<Slot<K, V>>,
    new_capacity: usize,
    mode: ProbingMode,
) -> Result<usize> {
    let live = slots.iter().filter(|slot| slot.is_occupied()).count();
    if live >= new_capacity {
        return Err(AlaHashTableError::ProbeExhausted {
            capacity: new_capacity,
        });
    }

    let mut fresh: Vec<Slot<K, V>> = Vec::new();
    fresh
        .try_reserve_exact(new_capacity)
        .map_err(|_| AlaHashTableError::AllocationFailed {
            capacity: new_capacity,
        })?;
    fresh.resize_with(new_capacity, Slot::default);

    // Place every entry before moving any, so a failure leaves `slots` intact.
    let mut placements = Vec::new();
    placements
        .try_reserve_exact(live)
        .map_err(|_| AlaHashTableError::AllocationFailed {
            capacity: new_capacity,
        })?;
    for (from, slot) in slots.iter().enumerate() {
        if let Slot::Occupied { key, .. } = slot {
            let to = vacant_index(&fresh, key, mode).ok_or(AlaHashTableError::ProbeExhausted {
                capacity: new_capacity,
            })?;
            // Claimed; filled in once every entry has a slot.
            fresh[to] = Slot::Tombstone;
            placements.push((from, to));
        }
    }

    for &(from, to) in &placements {
        fresh[to] = std::mem::take(&mut slots[from]);
    }
    *slots = fresh;
    Ok(placements.len())
}

/// Smallest usable capacity at or above `requested` that holds `count`
/// entries within the maximum load factor.
pub fn fitting_capacity(count: usize, requested: usize) -> usize {
    let mut capacity = normalize_capacity(requested);
    while count as f64 / capacity as f64 > MAX_LOAD_FACTOR {
        capacity = grown_capacity(capacity);
    }
    capacity
}

/// Finds the first free slot on the probe sequence of `key`.
fn vacant_index<K: TableKey, V>(slots: &[Slot<K, V>], key: &K, mode: ProbingMode) -> Option<usize> {
    let capacity = slots.len();
    let start = hash::start_index(key, capacity);
    let step = hash::probe_step(key, mode, capacity);
    (0..capacity)
        .map(|probe| (start + probe * step) % capacity)
        .find(|&index| matches!(slots[index], Slot::Free))
        .or_else(|| slots.iter().position(|slot| matches!(slot, Slot::Free)))
}
