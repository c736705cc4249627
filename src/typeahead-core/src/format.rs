//! Projection of raw records onto `{id, label}` pairs.

use serde_json::Value;

use crate::option::{Record, SelectOption};

/// Fields probed, in order, for an identifier.
const ID_FIELDS: &[&str] = &["id", "_id", "code", "value", "key"];

/// Fields probed, in order, for a label.
const LABEL_FIELDS: &[&str] = &[
    "label",
    "name",
    "title",
    "displayName",
    "display_name",
    "description",
];

/// Turns a raw search record into the option the dropdown shows.
///
/// Returning `None` drops the record from the result set.
pub trait DisplayFormatter: Send + Sync {
    fn format(&self, record: &Record) -> Option<SelectOption>;
}

impl<F> DisplayFormatter for F
where
    F: Fn(&Record) -> Option<SelectOption> + Send + Sync,
{
    fn format(&self, record: &Record) -> Option<SelectOption> {
        self(record)
    }
}

/// Looks for the usual identifier and name fields.
///
/// The label falls back to the identifier when no name-like field is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl DisplayFormatter for DefaultFormatter {
    fn format(&self, record: &Record) -> Option<SelectOption> {
        let id = first_scalar(record, ID_FIELDS)?;
        let label = first_scalar(record, LABEL_FIELDS).unwrap_or_else(|| id.clone());
        Some(SelectOption { id, label })
    }
}

/// Reads the identifier and label from explicitly named fields.
#[derive(Debug, Clone)]
pub struct FieldFormatter {
    pub id_field: String,
    pub label_field: String,
}

impl FieldFormatter {
    pub fn new(id_field: impl Into<String>, label_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            label_field: label_field.into(),
        }
    }
}

impl DisplayFormatter for FieldFormatter {
    fn format(&self, record: &Record) -> Option<SelectOption> {
        let id = record.get(&self.id_field).and_then(scalar_text)?;
        let label = record
            .get(&self.label_field)
            .and_then(scalar_text)
            .unwrap_or_else(|| id.clone());
        Some(SelectOption { id, label })
    }
}

fn first_scalar(record: &Record, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| record.get(*field).and_then(scalar_text))
}

/// Text form of a scalar JSON value. Empty strings count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_default_formatter_common_fields() {
        let option = DefaultFormatter.format(&record(json!({"_id": "P9", "title": "Port Said"})));
        assert_eq!(option, Some(SelectOption::new("P9", "Port Said")));

        let option = DefaultFormatter.format(&record(json!({"code": 42, "name": "Rotterdam"})));
        assert_eq!(option, Some(SelectOption::new("42", "Rotterdam")));
    }

    #[test]
    fn test_default_formatter_label_falls_back_to_id() {
        let option = DefaultFormatter.format(&record(json!({"id": "X1", "name": ""})));
        assert_eq!(option, Some(SelectOption::new("X1", "X1")));
    }

    #[test]
    fn test_default_formatter_skips_non_scalar_ids() {
        let option = DefaultFormatter.format(&record(json!({"id": {"nested": 1}, "code": "C3"})));
        assert_eq!(option, Some(SelectOption::new("C3", "C3")));

        assert_eq!(DefaultFormatter.format(&record(json!({"name": "Orphan"}))), None);
    }

    #[test]
    fn test_field_formatter() {
        let formatter = FieldFormatter::new("customerNo", "companyName");
        let option = formatter.format(&record(json!({
            "customerNo": "C-100",
            "companyName": "Blue Anchor Logistics",
            "id": "ignored"
        })));
        assert_eq!(option, Some(SelectOption::new("C-100", "Blue Anchor Logistics")));
    }

    #[test]
    fn test_closure_formatter() {
        let formatter = |record: &Record| {
            let id = record.get("iata")?.as_str()?;
            Some(SelectOption::new(id, format!("{id} airport")))
        };
        let option = formatter.format(&record(json!({"iata": "HKG"})));
        assert_eq!(option, Some(SelectOption::new("HKG", "HKG airport")));
    }
}
