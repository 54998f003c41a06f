//! JSON-to-collection import.
//!
//! - `date`: day-month-year to ISO-8601 normalization
//! - `identity`: document key resolution (id, then email, then generated)
//! - `uploader`: batched writes into one collection
//! - `runner`: executes the configured task list

pub mod date;
pub mod identity;
pub mod runner;
pub mod uploader;

pub use date::{convert_date_field, convert_date_string, parse_day_month_year, DateParseError};
pub use identity::{resolve_document_key, DocumentKey};
pub use runner::{import_task, read_records, run_imports, ImportReport, TaskOutcome, TaskStatus};
pub use uploader::{upload_records, UploadSummary};
