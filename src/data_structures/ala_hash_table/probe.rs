// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Probe sequence resolution.
//!
//! A probe sequence starts at the primary hash of the key and advances by the
//! probe step until it meets the key or a free slot. Tombstones never stop a
//! sequence: a lookup walks past them, while an insert remembers the first one
//! and writes there if the key turns out to be absent.

use std::borrow::Borrow;

use crate::data_structures::ala_hash_table::config::ProbingMode;
use crate::data_structures::ala_hash_table::hash;
use crate::data_structures::ala_hash_table::key::TableKey;
use crate::data_structures::ala_hash_table::observer::{ProbeEvent, ProbeObserver, SlotOutcome};
use crate::data_structures::ala_hash_table::slot::Slot;

/// Why a probe sequence is being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbePurpose {
    /// Find the key or the slot a new entry should be written to.
    Insert,
    /// Find the key for a read or a removal.
    Lookup,
}

/// Where a probe sequence ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeOutcome {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent and a new entry belongs at this index. Insert only.
    Vacant {
        /// Slot to write to.
        index: usize,
        /// Whether the slot is a tombstone being reused.
        reuses_tombstone: bool,
    },
    /// The key is absent. Lookup only.
    Absent,
    /// Every slot is occupied by other keys. Insert only.
    Exhausted,
}

/// Walks the probe sequence of `key` over `slots`.
///
/// At most `slots.len()` slots are inspected. With a prime number of slots
/// every step length reaches every slot, so an insert only exhausts the
/// sequence when no slot is free or a tombstone.
pub(crate) fn find_slot<K, V, Q>(
    slots: &[Slot<K, V>],
    key: &Q,
    purpose: ProbePurpose,
    mode: ProbingMode,
    observer: Option<&dyn ProbeObserver>,
) -> ProbeOutcome
where
    K: Borrow<Q>,
    Q: TableKey + ?Sized,
{
    let capacity = slots.len();
    let start = hash::start_index(key, capacity);
    let step = hash::probe_step(key, mode, capacity);

    let mut first_tombstone: Option<usize> = None;
    let mut index = start;

    for probe in 0..capacity {
        match &slots[index] {
            Slot::Free => {
                let outcome = match (purpose, first_tombstone) {
                    (ProbePurpose::Insert, Some(tombstone)) => ProbeOutcome::Vacant {
                        index: tombstone,
                        reuses_tombstone: true,
                    },
                    (ProbePurpose::Insert, None) => ProbeOutcome::Vacant {
                        index,
                        reuses_tombstone: false,
                    },
                    (ProbePurpose::Lookup, _) => ProbeOutcome::Absent,
                };
                report_resolution(observer, outcome, index, probe + 1);
                return outcome;
            }
            Slot::Occupied { key: stored, .. } if <K as Borrow<Q>>::borrow(stored) == key => {
                let outcome = ProbeOutcome::Found(index);
                report_resolution(observer, outcome, index, probe + 1);
                return outcome;
            }
            Slot::Occupied { .. } => {
                notify(observer, ProbeEvent::Collision { index, probe });
            }
            Slot::Tombstone => {
                if purpose == ProbePurpose::Insert && first_tombstone.is_none() {
                    first_tombstone = Some(index);
                }
                notify(observer, ProbeEvent::TombstoneSkipped { index, probe });
            }
        }
        index = (index + step) % capacity;
    }

    notify(
        observer,
        ProbeEvent::ProbesExhausted {
            start,
            probes: capacity,
        },
    );

    let outcome = match (purpose, first_tombstone) {
        (ProbePurpose::Insert, Some(tombstone)) => ProbeOutcome::Vacant {
            index: tombstone,
            reuses_tombstone: true,
        },
        (ProbePurpose::Insert, None) => ProbeOutcome::Exhausted,
        (ProbePurpose::Lookup, _) => ProbeOutcome::Absent,
    };
    report_resolution(observer, outcome, start, capacity);
    outcome
}

fn notify(observer: Option<&dyn ProbeObserver>, event: ProbeEvent) {
    if let Some(observer) = observer {
        observer.observe(&event);
    }
}

/// Reports a resolved sequence. `last_index` is the slot the walk stopped at,
/// which differs from the resolved slot when a tombstone is reused.
fn report_resolution(
    observer: Option<&dyn ProbeObserver>,
    outcome: ProbeOutcome,
    last_index: usize,
    probes: usize,
) {
    let (index, outcome) = match outcome {
        ProbeOutcome::Found(index) => (index, SlotOutcome::Found),
        ProbeOutcome::Vacant {
            index,
            reuses_tombstone: true,
        } => (index, SlotOutcome::ReusedTombstone),
        ProbeOutcome::Vacant {
            index,
            reuses_tombstone: false,
        } => (index, SlotOutcome::Vacant),
        ProbeOutcome::Absent => (last_index, SlotOutcome::Absent),
        ProbeOutcome::Exhausted => return,
    };
    notify(
        observer,
        ProbeEvent::SlotResolved {
            index,
            probes,
            outcome,
        },
    );
}
