//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and the immutable configuration passed to the import runner.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CREDENTIALS_PATH, DEFAULT_DATABASE, DEFAULT_PARALLEL_TASKS,
    DEFAULT_TIMEOUT_SECS, MAX_BATCH_SIZE,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A single file-to-collection import.
///
/// Deserializes from manifest entries written either in snake_case or in the
/// camelCase shape (`filePath`, `collectionName`, `shouldConvertDate`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportTask {
    /// JSON file holding an array of records
    #[serde(alias = "filePath")]
    pub file: PathBuf,

    /// Destination collection
    #[serde(alias = "collectionName")]
    pub collection: String,

    /// Normalize each record's `date` field to an ISO-8601 timestamp
    #[serde(default, alias = "shouldConvertDate")]
    pub convert_date: bool,
}

impl ImportTask {
    pub fn new(file: impl Into<PathBuf>, collection: impl Into<String>, convert_date: bool) -> Self {
        Self {
            file: file.into(),
            collection: collection.into(),
            convert_date,
        }
    }
}

/// Parses `PATH:COLLECTION` or `PATH:COLLECTION:date`.
///
/// Splits from the right so paths containing `:` still parse.
impl FromStr for ImportTask {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTaskArg(s.to_string());

        let (rest, convert_date) = match s.rsplit_once(':') {
            Some((rest, "date")) if rest.contains(':') => (rest, true),
            _ => (s, false),
        };
        let (file, collection) = rest.rsplit_once(':').ok_or_else(invalid)?;
        if file.is_empty() || collection.is_empty() {
            return Err(invalid());
        }

        Ok(ImportTask::new(file, collection, convert_date))
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the immutable configuration handed to the import runner. It can be
/// constructed programmatically or built from parsed CLI options with
/// [`Config::try_from`].
///
/// # Examples
///
/// ```no_run
/// use firestore_import::{Config, ImportTask};
///
/// let config = Config {
///     tasks: vec![ImportTask::new("./event_mock.json", "events", true)],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Service-account credential file
    pub credentials: PathBuf,

    /// Project id; taken from the credential file when absent
    pub project_id: Option<String>,

    /// Ordered list of imports
    pub tasks: Vec<ImportTask>,

    /// Writes per committed batch (1..=499)
    pub batch_size: usize,

    /// Maximum number of tasks uploading at once (1 = sequential)
    pub parallel_tasks: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Firestore emulator `host:port`; disables authentication when set
    pub emulator_host: Option<String>,

    /// Pre-issued OAuth2 bearer token; skips the service-account exchange
    pub access_token: Option<String>,

    /// Firestore database id
    pub database: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            project_id: None,
            tasks: Vec::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_tasks: DEFAULT_PARALLEL_TASKS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            emulator_host: None,
            access_token: None,
            database: DEFAULT_DATABASE.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks the configuration before any store access happens.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tasks.is_empty() {
            return Err(ConfigError::NoTasks);
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(ConfigError::InvalidBatchSize {
                got: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        if self.parallel_tasks == 0 {
            return Err(ConfigError::InvalidParallelism);
        }
        for task in &self.tasks {
            if task.collection.trim().is_empty() || task.collection.contains('/') {
                return Err(ConfigError::InvalidCollection(task.collection.clone()));
            }
        }
        Ok(())
    }
}

/// Reads a JSON manifest: an array of import tasks.
pub fn load_manifest(path: &Path) -> Result<Vec<ImportTask>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Import events (with date normalization) and users
/// firestore_import --task ./event_mock.json:events:date --task ./MOCK_DATA.json:users
///
/// # Read the task list from a manifest and write to the local emulator
/// firestore_import --manifest imports.json --emulator-host localhost:8080 --project-id demo
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "firestore_import",
    about = "Uploads JSON files into Firestore collections using batched writes."
)]
pub struct Opt {
    /// Service-account credential file
    #[arg(
        long,
        env = "GOOGLE_APPLICATION_CREDENTIALS",
        default_value = DEFAULT_CREDENTIALS_PATH
    )]
    pub credentials: PathBuf,

    /// Project id (defaults to the credential file's project)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Import task as PATH:COLLECTION, or PATH:COLLECTION:date to normalize dates.
    /// Repeatable; tasks run in the order given.
    #[arg(long = "task", value_name = "PATH:COLLECTION[:date]")]
    pub tasks: Vec<ImportTask>,

    /// JSON manifest listing import tasks (run before any --task entries)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Writes per committed batch (max 499)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Number of tasks allowed to upload at once
    #[arg(long, default_value_t = DEFAULT_PARALLEL_TASKS)]
    pub parallel_tasks: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Firestore emulator host:port
    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    /// Pre-issued OAuth2 access token (used instead of the credential file)
    #[arg(long, env = "FIRESTORE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Firestore database id
    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl TryFrom<Opt> for Config {
    type Error = ConfigError;

    fn try_from(opt: Opt) -> Result<Self, Self::Error> {
        let mut tasks = match &opt.manifest {
            Some(path) => load_manifest(path)?,
            None => Vec::new(),
        };
        tasks.extend(opt.tasks);

        let config = Config {
            credentials: opt.credentials,
            project_id: opt.project_id,
            tasks,
            batch_size: opt.batch_size,
            parallel_tasks: opt.parallel_tasks,
            timeout_seconds: opt.timeout_seconds,
            emulator_host: opt.emulator_host.filter(|h| !h.trim().is_empty()),
            access_token: opt.access_token.filter(|t| !t.trim().is_empty()),
            database: opt.database,
            log_level: opt.log_level,
            log_format: opt.log_format,
        };
        config.validate()?;
        Ok(config)
    }
}
