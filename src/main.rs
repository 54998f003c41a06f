//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `firestore_import` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use firestore_import::initialization::init_logger_with;
use firestore_import::{run_import, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();
    let config = match Config::try_from(opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("firestore_import error: {e}");
            process::exit(2);
        }
    };

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_import(config).await {
        Ok(report) => {
            println!(
                "✅ Imported {} document{} into {} collection{} ({} skipped) in {:.1}s",
                report.total_documents(),
                if report.total_documents() == 1 { "" } else { "s" },
                report.imported_tasks(),
                if report.imported_tasks() == 1 { "" } else { "s" },
                report.skipped_tasks(),
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("firestore_import error: {:#}", e);
            process::exit(1);
        }
    }
}
