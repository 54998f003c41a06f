//! Configuration constants.
//!
//! This module defines the limits, defaults, and endpoints used throughout the
//! importer.

/// Largest batch the importer stages before committing.
/// One under the store's hard limit, leaving headroom.
pub const MAX_BATCH_SIZE: usize = 499;

/// Writes staged per batch before it is committed.
pub const DEFAULT_BATCH_SIZE: usize = MAX_BATCH_SIZE;

/// Hard upper bound on writes in a single Firestore commit.
pub const MAX_BATCH_WRITES: usize = 500;

/// Default number of import tasks allowed to run at once (sequential).
pub const DEFAULT_PARALLEL_TASKS: usize = 1;

/// Default service-account credential file.
pub const DEFAULT_CREDENTIALS_PATH: &str = "./serviceAccountKey.json";

/// Firestore database id used when none is configured.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Per-request HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production Firestore REST endpoint.
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// OAuth2 scope required for document writes.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Token endpoint used when a credential file does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for the signed JWT assertion.
pub const JWT_LIFETIME_SECS: i64 = 3600;

/// Access tokens are refreshed this long before they actually expire.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Bearer token accepted by the Firestore emulator.
pub const EMULATOR_BEARER_TOKEN: &str = "owner";

/// Length of store-generated document keys (matches Firestore auto-IDs).
pub const AUTO_ID_LENGTH: usize = 20;

// Record field names
pub const ID_FIELD: &str = "id";
pub const EMAIL_FIELD: &str = "email";
pub const DATE_FIELD: &str = "date";
