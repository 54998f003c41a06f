//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error loading the service-account credentials.
    #[error("Credential initialization error: {0}")]
    CredentialError(#[from] AuthError),

    /// The store endpoint could not be built from the configured host.
    #[error("Store endpoint error: {0}")]
    EndpointError(#[from] url::ParseError),

    /// Configuration is incomplete for the chosen store.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Error types for configuration problems.
///
/// These are raised before any store access happens.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `--task` nor `--manifest` produced a task.
    #[error("No import tasks configured (use --task or --manifest)")]
    NoTasks,

    #[error("Batch size must be between 1 and {max}, got {got}")]
    InvalidBatchSize { got: usize, max: usize },

    #[error("Parallel task count must be at least 1")]
    InvalidParallelism,

    #[error("Invalid collection name '{0}'")]
    InvalidCollection(String),

    #[error("Invalid task '{0}': expected PATH:COLLECTION[:date]")]
    InvalidTaskArg(String),

    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Emulator mode without a project id and without a readable credential file.
    #[error("No project id configured (use --project-id or provide a credential file)")]
    MissingProjectId,
}

/// Error types for service-account authentication.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to read credential file {}: {source}", path.display())]
    CredentialRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse credential file: {0}")]
    CredentialParse(#[from] serde_json::Error),

    /// Only `service_account` credentials can mint tokens here.
    #[error("Unsupported credential type '{0}' (expected service_account)")]
    UnsupportedCredentialType(String),

    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token request failed: {0}")]
    TokenRequest(#[from] ReqwestError),

    #[error("Token endpoint returned HTTP {status}: {body}")]
    TokenRejected { status: u16, body: String },
}

/// Error types for document store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network or protocol failure talking to the store.
    #[error("Store request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The store refused the batch; no write in it was applied.
    #[error("Batch commit rejected with HTTP {status}: {message}")]
    CommitRejected { status: u16, message: String },

    #[error("Store authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Batch of {len} writes exceeds the limit of {max}")]
    BatchTooLarge { len: usize, max: usize },
}

/// Error types that abort an import run.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file is not a JSON array of objects.
    #[error("Malformed JSON in {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Upload to '{collection}' failed: {source}")]
    Store {
        collection: String,
        #[source]
        source: StoreError,
    },
}

/// Types of warnings that can occur during an import.
///
/// Warnings are recoverable: the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    UnparseableDate,   // Date kept as-is
    MissingSourceFile, // Task skipped
}

/// Types of informational metrics tracked during an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    ExplicitIdKey,
    EmailKey,
    GeneratedKey,
    DateConverted,
    BatchCommitted,
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::UnparseableDate => "Unparseable date",
            WarningType::MissingSourceFile => "Missing source file",
        }
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::ExplicitIdKey => "Keyed by id",
            InfoType::EmailKey => "Keyed by email",
            InfoType::GeneratedKey => "Generated key",
            InfoType::DateConverted => "Date converted",
            InfoType::BatchCommitted => "Batches committed",
        }
    }
}
