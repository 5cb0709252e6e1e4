// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Ala Hash Table.

/// Error types for Ala Hash Table operations
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum AlaHashTableError {
    /// A runtime key value is not one of the supported kinds (string or integer)
    #[error("Key must be a string or integer, got {0}")]
    InvalidKeyType(String),

    /// The probe chain ended without meeting the key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The probing mode name is not recognised
    #[error("Probing mode must be 'linear' or 'double', got '{0}'")]
    InvalidProbingMode(String),

    /// Every slot was probed without finding a free slot or tombstone on insert.
    /// The load factor bound makes this unreachable on a consistent table.
    #[error("Probe sequence exhausted all {capacity} slots without a usable slot")]
    ProbeExhausted {
        /// Capacity of the table at the time of the failure.
        capacity: usize,
    },

    /// The replacement slot array could not be allocated during a resize
    #[error("Failed to allocate {capacity} slots for resize")]
    AllocationFailed {
        /// Capacity that was requested.
        capacity: usize,
    },
}

/// Result type for Ala Hash Table operations
pub type Result<T> = std::result::Result<T, AlaHashTableError>;
