// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Observation hooks for probe and resize decisions.
//!
//! The table reports what it does at each decision point through a
//! [`ProbeObserver`]. Nothing is reported unless an observer is installed,
//! and [`TracingObserver`] turns the events into `tracing` records.

/// How a probe sequence was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The key was found in an occupied slot.
    Found,
    /// A never used slot was chosen for an insert.
    Vacant,
    /// The first tombstone on the sequence was chosen for an insert.
    ReusedTombstone,
    /// A lookup reached a free slot without meeting the key.
    Absent,
}

/// An event emitted by the table at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    /// The slot at `index` holds a different key.
    Collision {
        /// Slot index.
        index: usize,
        /// Zero based position in the probe sequence.
        probe: usize,
    },
    /// The slot at `index` is a tombstone and probing continues past it.
    TombstoneSkipped {
        /// Slot index.
        index: usize,
        /// Zero based position in the probe sequence.
        probe: usize,
    },
    /// The probe sequence resolved to `index`.
    SlotResolved {
        /// Slot index the sequence resolved to.
        index: usize,
        /// Number of slots inspected.
        probes: usize,
        /// How it was resolved.
        outcome: SlotOutcome,
    },
    /// Every slot was inspected without resolution.
    ProbesExhausted {
        /// Slot where the sequence started.
        start: usize,
        /// Number of slots inspected.
        probes: usize,
    },
    /// A resize is about to rehash `entries` live entries.
    ResizeStarted {
        /// Capacity before the resize.
        from: usize,
        /// Capacity after the resize.
        to: usize,
        /// Live entries to move.
        entries: usize,
    },
    /// A resize finished.
    ResizeCompleted {
        /// New capacity.
        capacity: usize,
        /// Live entries after the rehash.
        count: usize,
    },
}

/// Receives events from an [`AlaHashTable`](super::AlaHashTable).
#[cfg_attr(test, mockall::automock)]
pub trait ProbeObserver {
    /// Called synchronously at every decision point.
    fn observe(&self, event: &ProbeEvent);
}

/// Forwards probe events to `tracing`.
///
/// Probe level events are emitted at `TRACE`, resizes at `DEBUG` and exhausted
/// sequences at `WARN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProbeObserver for TracingObserver {
    fn observe(&self, event: &ProbeEvent) {
        match *event {
            ProbeEvent::Collision { index, probe } => {
                tracing::trace!(index, probe, "Collision");
            }
            ProbeEvent::TombstoneSkipped { index, probe } => {
                tracing::trace!(index, probe, "Tombstone encountered");
            }
            ProbeEvent::SlotResolved {
                index,
                probes,
                outcome,
            } => {
                tracing::trace!(index, probes, outcome = ?outcome, "Slot resolved");
            }
            ProbeEvent::ProbesExhausted { start, probes } => {
                tracing::warn!(start, probes, "Maximum probes reached");
            }
            ProbeEvent::ResizeStarted { from, to, entries } => {
                tracing::debug!(from, to, entries, "Resize started");
            }
            ProbeEvent::ResizeCompleted { capacity, count } => {
                tracing::debug!(
                    capacity,
                    count,
                    load_factor = count as f64 / capacity as f64,
                    "Resize complete"
                );
            }
        }
    }
}
