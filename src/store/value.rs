//! JSON to Firestore typed-value encoding.
//!
//! Firestore's REST API wraps every value in a single-key object naming its
//! type (`stringValue`, `integerValue`, `mapValue`, ...). Integers travel as
//! decimal strings.

use serde_json::{json, Map, Value};

use super::Record;

/// Encodes one JSON value as a Firestore `Value`.
pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                // u64 above i64::MAX and all floats become doubles
                json!({ "doubleValue": n.as_f64().unwrap_or(0.0) })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(to_firestore_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": to_firestore_fields(map) } }),
    }
}

/// Encodes a record as a Firestore `fields` map.
pub fn to_firestore_fields(record: &Record) -> Map<String, Value> {
    record
        .iter()
        .map(|(name, value)| (name.clone(), to_firestore_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(to_firestore_value(&json!(null)), json!({"nullValue": null}));
        assert_eq!(to_firestore_value(&json!(true)), json!({"booleanValue": true}));
        assert_eq!(
            to_firestore_value(&json!("Ada")),
            json!({"stringValue": "Ada"})
        );
        assert_eq!(to_firestore_value(&json!(42)), json!({"integerValue": "42"}));
        assert_eq!(to_firestore_value(&json!(-7)), json!({"integerValue": "-7"}));
        assert_eq!(to_firestore_value(&json!(1.5)), json!({"doubleValue": 1.5}));
    }

    #[test]
    fn test_u64_beyond_i64_becomes_double() {
        let encoded = to_firestore_value(&json!(u64::MAX));
        assert!(encoded.get("doubleValue").is_some());
    }

    #[test]
    fn test_nested_structures() {
        let encoded = to_firestore_value(&json!({
            "tags": ["a", 1],
            "address": {"city": "Oslo"}
        }));
        assert_eq!(
            encoded,
            json!({
                "mapValue": {"fields": {
                    "tags": {"arrayValue": {"values": [
                        {"stringValue": "a"},
                        {"integerValue": "1"}
                    ]}},
                    "address": {"mapValue": {"fields": {
                        "city": {"stringValue": "Oslo"}
                    }}}
                }}
            })
        );
    }

    #[test]
    fn test_empty_array_and_map() {
        assert_eq!(
            to_firestore_value(&json!([])),
            json!({"arrayValue": {"values": []}})
        );
        assert_eq!(
            to_firestore_value(&json!({})),
            json!({"mapValue": {"fields": {}}})
        );
    }
}
