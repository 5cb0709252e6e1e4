// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Implementation of the Ala Hash Table.
//!
//! The table owns a single array of slots. Inserts check the load factor
//! first, lookups and removals go straight to the probe sequence, and any
//! change of capacity rebuilds the array from the live entries.

use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::slice;

use crate::data_structures::ala_hash_table::capacity;
use crate::data_structures::ala_hash_table::config::{AlaHashTableConfig, ProbingMode};
use crate::data_structures::ala_hash_table::error::{AlaHashTableError, Result};
use crate::data_structures::ala_hash_table::key::TableKey;
use crate::data_structures::ala_hash_table::observer::{ProbeEvent, ProbeObserver, TracingObserver};
use crate::data_structures::ala_hash_table::probe::{self, ProbeOutcome, ProbePurpose};
use crate::data_structures::ala_hash_table::slot::Slot;

/// An open addressing hash table with tombstone deletion and prime capacities.
///
/// # Type Parameters
///
/// * `K` - The key type, a string or integer kind implementing [`TableKey`].
/// * `V` - The value type.
///
/// # Complexity
///
/// `put`, `get`, `has_key` and `remove` are O(1) amortized. A `put` that
/// crosses the maximum load factor, a `remove` that crosses the minimum, and
/// a change of probing mode rebuild the whole array in O(capacity).
pub struct AlaHashTable<K, V> {
    /// The backing array; its length is the capacity
    slots: Vec<Slot<K, V>>,

    /// Number of occupied slots
    count: usize,

    /// Collision resolution discipline
    probing_mode: ProbingMode,

    /// Receives probe and resize events when installed
    observer: Option<Box<dyn ProbeObserver>>,
}

impl<K: TableKey, V> AlaHashTable<K, V> {
    /// Creates an empty table with the default capacity and linear probing.
    pub fn new() -> Self {
        Self::with_config(AlaHashTableConfig::default())
    }

    /// Creates an empty table with at least `capacity` slots.
    ///
    /// The capacity is rounded up to a prime no smaller than
    /// [`MIN_CAPACITY`](super::MIN_CAPACITY).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(AlaHashTableConfig::new().with_initial_capacity(capacity))
    }

    /// Creates an empty table with the default capacity and the given probing mode.
    pub fn with_probing_mode(probing_mode: ProbingMode) -> Self {
        Self::with_config(AlaHashTableConfig::new().with_probing_mode(probing_mode))
    }

    /// Creates an empty table from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the hash table.
    pub fn with_config(config: AlaHashTableConfig) -> Self {
        let capacity = capacity::normalize_capacity(config.initial_capacity);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::default);

        let observer: Option<Box<dyn ProbeObserver>> = if config.trace_probes {
            Some(Box::new(TracingObserver))
        } else {
            None
        };

        Self {
            slots,
            count: 0,
            probing_mode: config.probing_mode,
            observer,
        }
    }

    /// Installs an observer, replacing any previous one.
    pub fn with_observer(mut self, observer: Box<dyn ProbeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Installs or removes the observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn ProbeObserver>>) {
        self.observer = observer;
    }

    /// Turns probe tracing on or off by installing or removing a [`TracingObserver`].
    pub fn set_debug(&mut self, enabled: bool) {
        self.observer = if enabled {
            Some(Box::new(TracingObserver))
        } else {
            None
        };
    }

    /// Inserts a key-value pair, replacing the value if the key is present.
    ///
    /// May grow the table first, which rehashes every entry.
    ///
    /// # Returns
    ///
    /// `Ok(Some(previous))` if the key was present, `Ok(None)` for a new key.
    ///
    /// # Errors
    ///
    /// * `AllocationFailed` if growing was required and the new array could
    ///   not be allocated. The table is unchanged.
    /// * `ProbeExhausted` if no usable slot exists on the probe sequence, which
    ///   means the table's invariants were broken.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        if capacity::needs_growth(self.count, self.capacity()) {
            self.resize(capacity::grown_capacity(self.capacity()))?;
        }

        let index = match self.probe(&key, ProbePurpose::Insert) {
            ProbeOutcome::Found(index) => index,
            ProbeOutcome::Vacant { index, .. } => index,
            ProbeOutcome::Absent | ProbeOutcome::Exhausted => {
                tracing::error!(
                    key = ?key,
                    capacity = self.capacity(),
                    count = self.count,
                    "No usable slot on the probe sequence"
                );
                return Err(AlaHashTableError::ProbeExhausted {
                    capacity: self.capacity(),
                });
            }
        };

        match &mut self.slots[index] {
            Slot::Occupied { value: current, .. } => Ok(Some(std::mem::replace(current, value))),
            slot => {
                *slot = Slot::Occupied { key, value };
                self.count += 1;
                Ok(None)
            }
        }
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        match self.probe(key, ProbePurpose::Lookup) {
            ProbeOutcome::Found(index) => self.slots[index]
                .entry()
                .map(|(_, value)| value)
                .ok_or_else(|| not_found(key)),
            _ => Err(not_found(key)),
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        match self.probe(key, ProbePurpose::Lookup) {
            ProbeOutcome::Found(index) => match &mut self.slots[index] {
                Slot::Occupied { value, .. } => Ok(value),
                _ => Err(not_found(key)),
            },
            _ => Err(not_found(key)),
        }
    }

    /// Returns whether `key` is present. Never fails.
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        matches!(
            self.probe(key, ProbePurpose::Lookup),
            ProbeOutcome::Found(_)
        )
    }

    /// Removes `key` and returns its value, leaving a tombstone in its slot.
    ///
    /// May shrink the table afterwards, which rehashes every entry. A shrink
    /// that cannot allocate is skipped and the table keeps its capacity.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = match self.probe(key, ProbePurpose::Lookup) {
            ProbeOutcome::Found(index) => index,
            _ => return Err(not_found(key)),
        };
        let (_, value) = self.slots[index].bury().ok_or_else(|| not_found(key))?;
        self.count -= 1;

        if capacity::needs_shrink(self.count, self.capacity()) {
            let target = capacity::shrunk_capacity(self.capacity());
            if let Err(error) = self.resize(target) {
                tracing::warn!(%error, target, "Skipping shrink");
            }
        }

        Ok(value)
    }

    /// Switches the probing discipline, rehashing every entry under the new mode.
    ///
    /// Setting the current mode again does nothing.
    ///
    /// # Errors
    ///
    /// `AllocationFailed` if the rehash could not allocate. The table keeps
    /// its previous mode and contents.
    pub fn set_probing_mode(&mut self, probing_mode: ProbingMode) -> Result<()> {
        if probing_mode == self.probing_mode {
            return Ok(());
        }
        self.rehash_into(self.capacity(), probing_mode)?;
        self.probing_mode = probing_mode;
        Ok(())
    }

    /// Rebuilds the table at `new_capacity`, rounded up to a prime.
    ///
    /// A capacity too small for the live entries is raised along the growth
    /// sequence until the load factor is within
    /// [`MAX_LOAD_FACTOR`](super::MAX_LOAD_FACTOR). Every live entry is
    /// rehashed and all tombstones are dropped.
    ///
    /// # Errors
    ///
    /// `AllocationFailed` if the new array could not be allocated. The table
    /// is unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        self.rehash_into(new_capacity, self.probing_mode)
    }

    /// Removes every entry and tombstone, keeping the capacity.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Free);
        self.count = 0;
    }

    fn rehash_into(&mut self, new_capacity: usize, probing_mode: ProbingMode) -> Result<()> {
        let target = capacity::fitting_capacity(self.count, new_capacity);
        self.notify(ProbeEvent::ResizeStarted {
            from: self.capacity(),
            to: target,
            entries: self.count,
        });

        self.count = capacity::rehash(&mut self.slots, target, probing_mode)?;

        self.notify(ProbeEvent::ResizeCompleted {
            capacity: self.capacity(),
            count: self.count,
        });
        Ok(())
    }

    fn probe<Q>(&self, key: &Q, purpose: ProbePurpose) -> ProbeOutcome
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        probe::find_slot(
            &self.slots,
            key,
            purpose,
            self.probing_mode,
            self.observer.as_deref(),
        )
    }

    fn notify(&self, event: ProbeEvent) {
        if let Some(observer) = &self.observer {
            observer.observe(&event);
        }
    }
}

impl<K, V> AlaHashTable<K, V> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() {
            0.0
        } else {
            self.count as f64 / self.slots.len() as f64
        }
    }

    /// Returns the number of tombstones currently in the array.
    pub fn tombstone_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_tombstone()).count()
    }

    /// Returns the current probing discipline.
    pub fn probing_mode(&self) -> ProbingMode {
        self.probing_mode
    }

    /// Iterates over the entries in slot order.
    ///
    /// The order is stable until the table is next modified.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    /// Iterates over the keys in slot order.
    pub fn key_iter(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over the values in slot order.
    pub fn value_iter(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns a snapshot of the keys in slot order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.key_iter().cloned().collect()
    }

    /// Returns a snapshot of the values in slot order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.value_iter().cloned().collect()
    }

    /// Returns a snapshot of the entries in slot order.
    pub fn items(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: TableKey, V> Default for AlaHashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for AlaHashTable<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlaHashTable")
            .field("count", &self.count)
            .field("capacity", &self.slots.len())
            .field("probing_mode", &self.probing_mode)
            .field("observed", &self.observer.is_some())
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V>(&'a AlaHashTable<K, V>);

impl<K: Debug, V: Debug> Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a AlaHashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn not_found<Q: Debug + ?Sized>(key: &Q) -> AlaHashTableError {
    AlaHashTableError::KeyNotFound(format!("{key:?}"))
}

/// Iterator over the entries of an [`AlaHashTable`], in slot order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of an [`AlaHashTable`], in slot order.
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of an [`AlaHashTable`], in slot order.
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
