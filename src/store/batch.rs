//! Staged batch of document writes.

use super::Record;

/// A full-document "set": creates the document or replaces it entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub collection: String,
    pub key: String,
    pub fields: Record,
}

/// Ordered writes waiting to be committed as one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<SetOperation>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a set of `fields` at `collection/key`.
    pub fn set(&mut self, collection: &str, key: String, fields: Record) {
        self.writes.push(SetOperation {
            collection: collection.to_string(),
            key,
            fields,
        });
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[SetOperation] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<SetOperation> {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_preserves_order() {
        let mut batch = WriteBatch::new();
        assert!(batch.is_empty());

        for key in ["b", "a", "c"] {
            let mut fields = Record::new();
            fields.insert("name".to_string(), json!(key));
            batch.set("users", key.to_string(), fields);
        }

        assert_eq!(batch.len(), 3);
        let keys: Vec<&str> = batch.writes().iter().map(|w| w.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert!(batch.writes().iter().all(|w| w.collection == "users"));
    }
}
