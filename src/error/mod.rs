//! Error module for Ala Hash.
//!
//! This module collects the error types of every component behind a single
//! top-level error so that the binary and embedding applications can
//! propagate failures with `?`.

use thiserror::Error;

use crate::data_structures::ala_hash_table::AlaHashTableError;

pub mod config;

/// Result type alias used throughout Ala Hash.
pub type AlaResult<T> = Result<T, AlaError>;

/// Core error enum for Ala Hash.
#[derive(Error, Debug)]
pub enum AlaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the hash table.
    #[error("Hash table error: {0}")]
    Table(#[from] AlaHashTableError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

impl AlaError {
    /// Returns whether the error is a missing key, which callers usually report and move past.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, AlaError::Table(AlaHashTableError::KeyNotFound(_)))
    }
}
