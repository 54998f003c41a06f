// Shared test helpers for writing JSON fixtures and building records.

use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

use firestore_import::store::Record;

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_json(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create fixture file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write fixture file");
    path
}

/// Builds a JSON array of `n` event records with ids `evt_0000`.. and a date.
#[allow(dead_code)] // Used by other test files
pub fn events_json(n: usize) -> String {
    let events: Vec<Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "id": format!("evt_{i:04}"),
                "title": format!("Event {i}"),
                "date": "14 March 1990",
            })
        })
        .collect();
    Value::Array(events).to_string()
}

/// Converts a `json!` object literal into a record.
#[allow(dead_code)] // Used by other test files
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
