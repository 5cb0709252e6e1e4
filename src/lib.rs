//! Ala Hash Library
//!
//! This library contains an open addressing hash table with tombstone
//! deletion, prime capacity management and switchable probing, together
//! with the configuration and error handling used by the `ala_hash` binary.
//!
//! # Architecture
//!
//! - `data_structures::ala_hash_table` holds the engine: slots, hash
//!   functions, probe sequence resolution, capacity management and the
//!   public table surface.
//! - `config` loads layered settings (defaults, file, environment).
//! - `error` gathers every component error behind [`error::AlaError`].

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Ala Hash.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
