//! Document key resolution.

use serde_json::Value;

use crate::config::{EMAIL_FIELD, ID_FIELD};
use crate::error_handling::InfoType;
use crate::store::{DocumentStore, Record};

/// Where a record's document key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKey {
    /// The record's own `id`
    Id(String),
    /// The record's `email`, for user-like records without an id
    Email(String),
    /// Neither field is usable; the store picks a key
    Generated,
}

impl DocumentKey {
    /// The concrete key, asking the store for one when needed.
    pub fn into_key<S: DocumentStore + ?Sized>(self, store: &S) -> String {
        match self {
            DocumentKey::Id(key) | DocumentKey::Email(key) => key,
            DocumentKey::Generated => store.generate_key(),
        }
    }

    pub fn info_type(&self) -> InfoType {
        match self {
            DocumentKey::Id(_) => InfoType::ExplicitIdKey,
            DocumentKey::Email(_) => InfoType::EmailKey,
            DocumentKey::Generated => InfoType::GeneratedKey,
        }
    }
}

/// Picks the document key for a record: a truthy `id`, else a truthy
/// `email`, else a store-generated key.
pub fn resolve_document_key(record: &Record) -> DocumentKey {
    if let Some(id) = truthy_key(record.get(ID_FIELD)) {
        DocumentKey::Id(id)
    } else if let Some(email) = truthy_key(record.get(EMAIL_FIELD)) {
        DocumentKey::Email(email)
    } else {
        DocumentKey::Generated
    }
}

/// Non-empty strings are used verbatim; non-zero numbers are stringified.
fn truthy_key(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
