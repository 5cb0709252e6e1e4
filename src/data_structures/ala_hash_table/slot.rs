// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Slot states of the backing array.

/// A single cell of the backing array.
///
/// A slot starts `Free`, becomes `Occupied` when an entry is written into it,
/// and turns into a `Tombstone` when that entry is removed. Tombstones keep
/// probe chains that pass through them intact and are only cleared by a
/// rehash into a fresh array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Slot<K, V> {
    /// Never used since the array was allocated.
    #[default]
    Free,
    /// Holds a live entry.
    Occupied {
        /// Key of the entry.
        key: K,
        /// Value of the entry.
        value: V,
    },
    /// Held an entry that has since been removed.
    Tombstone,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Returns the entry held by the slot, if any.
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    /// Replaces an occupied slot with a tombstone and hands back its entry.
    ///
    /// Free slots and tombstones are left untouched.
    pub(crate) fn bury(&mut self) -> Option<(K, V)> {
        if !self.is_occupied() {
            return None;
        }
        match std::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}
