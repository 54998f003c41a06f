//! Error handling and import statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, authentication, store and import failures
//! - Import statistics tracking (warnings and info metrics)
//!
//! Recoverable conditions (missing source file, unparseable date) are counted
//! as warnings; everything else surfaces as an error and aborts the run.

mod stats;
mod types;

// Re-export public API
pub use stats::ImportStats;
pub use types::{
    AuthError, ConfigError, ImportError, InfoType, InitializationError, StoreError, WarningType,
};
