//! firestore_import library: JSON file import into Firestore collections
//!
//! Reads JSON arrays of records from local files and writes them into
//! Firestore collections with batched, atomic commits. Each record's document
//! key is its `id`, else its `email`, else a generated key. Date fields in
//! `"14 March 1990"` form can be normalized to ISO-8601 on the way in.
//!
//! # Example
//!
//! ```no_run
//! use firestore_import::{run_import, Config, ImportTask};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     tasks: vec![
//!         ImportTask::new("./event_mock.json", "events", true),
//!         ImportTask::new("./MOCK_DATA.json", "users", false),
//!     ],
//!     ..Default::default()
//! };
//!
//! let report = run_import(config).await?;
//! println!("Imported {} documents", report.total_documents());
//! # Ok(())
//! # }
//! ```
//!
//! The uploader itself is generic over [`store::DocumentStore`], so it can be
//! driven against [`store::MemoryStore`] without any network access.

mod app;
pub mod auth;
pub mod config;
pub mod error_handling;
pub mod import;
pub mod initialization;
pub mod store;

// Re-export public API
pub use config::{Config, ImportTask, LogFormat, LogLevel, Opt};
pub use import::{run_imports, ImportReport, TaskOutcome, TaskStatus, UploadSummary};
pub use run::run_import;

// Internal run module (wires configuration, credentials and the store together)
mod run {
    use anyhow::{Context, Result};
    use log::info;

    use crate::app::print_import_statistics;
    use crate::config::Config;
    use crate::import::{run_imports, ImportReport};
    use crate::initialization::{init_client, init_store};

    /// Runs every configured import against Firestore.
    ///
    /// Validates the configuration, loads credentials once, then executes the
    /// task list in order.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid
    /// - The credential file cannot be loaded
    /// - A source file is not valid JSON
    /// - A batch commit fails (remaining batches and tasks are not attempted)
    pub async fn run_import(config: Config) -> Result<ImportReport> {
        config.validate().context("Invalid configuration")?;

        let client =
            init_client(config.timeout_seconds).context("Failed to initialize HTTP client")?;
        let store = init_store(&config, client)
            .await
            .context("Failed to initialize Firestore")?;

        info!(
            "Starting import of {} task{}",
            config.tasks.len(),
            if config.tasks.len() == 1 { "" } else { "s" }
        );
        let report = run_imports(&store, &config).await.context("Import failed")?;
        print_import_statistics(&report);
        Ok(report)
    }
}
