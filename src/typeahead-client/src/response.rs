//! Turning a search response body into records.

use serde_json::Value;
use tracing::warn;
use typeahead_core::Record;

/// Object keys that commonly wrap a result array.
const ENVELOPE_KEYS: &[&str] = &["data", "results", "items"];

/// Extract records from a decoded response.
///
/// Accepts a bare array or an object wrapping one under a common envelope
/// key. Anything else is malformed and yields no records. Array elements that
/// are not objects are skipped.
pub fn decode_records(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => objects(items),
        Value::Object(mut map) => {
            for key in ENVELOPE_KEYS {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return objects(items);
                }
            }
            warn!("Search response object has no result array; treating as empty");
            Vec::new()
        }
        other => {
            warn!(kind = kind(&other), "Search response is not an array; treating as empty");
            Vec::new()
        }
    }
}

fn objects(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
