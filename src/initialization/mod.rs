//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client
//! - Document store (Firestore or the local emulator)

mod client;
mod logger;
mod store;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use store::init_store;
