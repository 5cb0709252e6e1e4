//! Hash table configuration module.
//!
//! This module defines the settings used to construct the hash table from
//! configuration files and environment variables.

use super::{ConfigResult, Validate};
use crate::data_structures::ala_hash_table::{AlaHashTableConfig, ProbingMode, DEFAULT_CAPACITY};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest initial capacity accepted from configuration.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 26;

/// Hash table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Requested initial capacity (rounded up to a prime of at least 11)
    pub initial_capacity: usize,

    /// Collision resolution discipline ("linear" or "double")
    pub probing_mode: ProbingMode,

    /// Whether probe decisions are traced
    pub trace_probes: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            probing_mode: ProbingMode::Linear,
            trace_probes: false,
        }
    }
}

impl TableSettings {
    /// Builds the table configuration described by these settings.
    pub fn to_table_config(&self) -> AlaHashTableConfig {
        AlaHashTableConfig::new()
            .with_initial_capacity(self.initial_capacity)
            .with_probing_mode(self.probing_mode)
            .with_trace_probes(self.trace_probes)
    }
}

impl Validate for TableSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "initial_capacity must be greater than 0".to_string(),
            ));
        }

        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::ValueOutOfRange {
                key: "table.initial_capacity".to_string(),
                message: format!("must be at most {MAX_INITIAL_CAPACITY}"),
            });
        }

        Ok(())
    }
}
