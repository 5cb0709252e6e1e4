// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the Ala Hash Table.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_structures::ala_hash_table::error::AlaHashTableError;

/// Load factor above which an insert grows the table.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

/// Load factor below which a removal shrinks the table.
pub const MIN_LOAD_FACTOR: f64 = 0.2;

/// Smallest capacity the table ever uses.
pub const MIN_CAPACITY: usize = 11;

/// Capacity used when none is requested.
pub const DEFAULT_CAPACITY: usize = MIN_CAPACITY;

/// Collision resolution discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbingMode {
    /// Step to the next slot on every collision.
    #[default]
    Linear,
    /// Step by a key dependent distance derived from the secondary hash.
    Double,
}

impl ProbingMode {
    /// Returns the canonical lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbingMode::Linear => "linear",
            ProbingMode::Double => "double",
        }
    }
}

impl Display for ProbingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbingMode {
    type Err = AlaHashTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(ProbingMode::Linear),
            "double" => Ok(ProbingMode::Double),
            _ => Err(AlaHashTableError::InvalidProbingMode(s.to_string())),
        }
    }
}

/// Configuration for the Ala Hash Table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlaHashTableConfig {
    /// Requested initial capacity. Rounded up to a prime of at least [`MIN_CAPACITY`].
    pub initial_capacity: usize,

    /// Probing discipline used from construction onwards.
    pub probing_mode: ProbingMode,

    /// Whether probe and resize events are forwarded to `tracing`.
    pub trace_probes: bool,
}

impl AlaHashTableConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity of the hash table.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - The requested number of slots.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the probing mode.
    pub fn with_probing_mode(mut self, probing_mode: ProbingMode) -> Self {
        self.probing_mode = probing_mode;
        self
    }

    /// Enables or disables forwarding of probe events to `tracing`.
    pub fn with_trace_probes(mut self, trace_probes: bool) -> Self {
        self.trace_probes = trace_probes;
        self
    }
}

impl Default for AlaHashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            probing_mode: ProbingMode::Linear,
            trace_probes: false,
        }
    }
}
