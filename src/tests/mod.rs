//! Test modules for Ala Hash.
//!
//! This module contains the crate-internal test suites:
//! - Scenario tests for the hash table engine
//! - Property-based tests using proptest against a reference map
//! - Configuration loading and validation tests
//! - Error conversion tests
//! - Shared fixtures and strategies

pub mod ala_hash_table_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    colliding_int_keys, key_strategy, operation_strategy, RecordingObserver, TableOp, TestFixture,
};
