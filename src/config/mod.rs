//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (batch limits, endpoints, defaults)
//! - The immutable `Config` handed to the import runner
//! - CLI option types and parsing

mod constants;
mod types;

pub use constants::*;
pub use types::{load_manifest, Config, ImportTask, LogFormat, LogLevel, Opt};
