//! Import task execution.
//!
//! Each task reads one JSON file, optionally normalizes dates, and uploads
//! the records into its collection. Tasks run in configuration order.

use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{error, info};

use super::date::convert_date_field;
use super::uploader::{upload_records, UploadSummary};
use crate::config::{Config, ImportTask};
use crate::error_handling::{ImportError, ImportStats, WarningType};
use crate::store::{DocumentStore, Record};

/// How a single task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Imported(UploadSummary),
    /// The source file did not exist; nothing was written.
    SkippedMissingFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub collection: String,
    pub file: PathBuf,
    pub status: TaskStatus,
}

/// Results of an import run, one outcome per task in configuration order.
#[derive(Debug)]
pub struct ImportReport {
    pub tasks: Vec<TaskOutcome>,
    pub stats: ImportStats,
    pub elapsed_seconds: f64,
}

impl ImportReport {
    pub fn total_documents(&self) -> usize {
        self.imported().map(|s| s.documents).sum()
    }

    pub fn total_batches(&self) -> usize {
        self.imported().map(|s| s.batches).sum()
    }

    pub fn imported_tasks(&self) -> usize {
        self.imported().count()
    }

    pub fn skipped_tasks(&self) -> usize {
        self.tasks.len() - self.imported_tasks()
    }

    fn imported(&self) -> impl Iterator<Item = &UploadSummary> {
        self.tasks.iter().filter_map(|t| match &t.status {
            TaskStatus::Imported(summary) => Some(summary),
            TaskStatus::SkippedMissingFile => None,
        })
    }
}

/// Reads a JSON array of objects.
///
/// # Errors
///
/// `ImportError::Read` if the file cannot be read, `ImportError::MalformedJson`
/// if it is not valid JSON or not an array of objects.
pub async fn read_records(path: &Path) -> Result<Vec<Record>, ImportError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| ImportError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs one import task.
///
/// A missing source file is logged and reported as skipped. Read, parse and
/// store failures are returned as errors.
pub async fn import_task<S: DocumentStore + ?Sized>(
    store: &S,
    task: &ImportTask,
    batch_size: usize,
    stats: &ImportStats,
) -> Result<TaskOutcome, ImportError> {
    let outcome = |status| TaskOutcome {
        collection: task.collection.clone(),
        file: task.file.clone(),
        status,
    };

    if !tokio::fs::try_exists(&task.file).await.unwrap_or(false) {
        error!("File not found: {} - Skipping.", task.file.display());
        stats.increment_warning(WarningType::MissingSourceFile);
        return Ok(outcome(TaskStatus::SkippedMissingFile));
    }

    info!(
        "Processing '{}' from {}",
        task.collection,
        task.file.display()
    );
    let mut records = read_records(&task.file).await?;

    if task.convert_date {
        info!("Converting dates to ISO format...");
        for record in &mut records {
            convert_date_field(record, stats);
        }
    }

    info!("Prepare to upload {} documents.", records.len());
    let summary = upload_records(store, &task.collection, records, batch_size, stats)
        .await
        .map_err(|source| ImportError::Store {
            collection: task.collection.clone(),
            source,
        })?;

    info!(
        "Finished '{}': {} docs.",
        task.collection, summary.documents
    );
    Ok(outcome(TaskStatus::Imported(summary)))
}

/// Runs every configured task against `store`.
///
/// With `parallel_tasks == 1` tasks run strictly one after another. Larger
/// values let that many tasks upload at once; outcomes stay in task order.
/// The first error aborts the run and no further tasks are started.
pub async fn run_imports<S: DocumentStore + ?Sized>(
    store: &S,
    config: &Config,
) -> Result<ImportReport, ImportError> {
    let start_time = Instant::now();
    let stats = ImportStats::new();

    let tasks: Vec<TaskOutcome> = stream::iter(&config.tasks)
        .map(|task| import_task(store, task, config.batch_size, &stats))
        .buffered(config.parallel_tasks.max(1))
        .try_collect()
        .await?;

    info!("All imports complete!");
    Ok(ImportReport {
        tasks,
        stats,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
