//! Run reporting helpers used by the library entry point.

pub mod statistics;

pub use statistics::print_import_statistics;
