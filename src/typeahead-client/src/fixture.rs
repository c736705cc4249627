//! In-memory search provider.

use std::path::Path;

use async_trait::async_trait;
use typeahead_core::{DefaultFormatter, DisplayFormatter, Record};

use crate::error::{ClientError, ClientResult};
use crate::response::decode_records;
use crate::SearchProvider;

/// Answers queries from a fixed list of records.
///
/// A record matches when its default label or identifier contains the query,
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticSearchProvider {
    records: Vec<Record>,
}

impl StaticSearchProvider {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Build from a JSON document shaped like a search response.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self::new(decode_records(value))
    }

    /// Load a JSON fixture file.
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ClientError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        Ok(Self::from_json(value))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(record: &Record, needle: &str) -> bool {
        DefaultFormatter.format(record).is_some_and(|option| {
            option.label.to_lowercase().contains(needle) || option.id.to_lowercase().contains(needle)
        })
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, query: &str) -> ClientResult<Vec<Record>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|record| Self::matches(record, &needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn provider() -> StaticSearchProvider {
        StaticSearchProvider::from_json(json!([
            {"id": "NLRTM", "name": "Rotterdam"},
            {"id": "DEHAM", "name": "Hamburg"},
            {"id": "BEANR", "name": "Antwerp"}
        ]))
    }

    #[tokio::test]
    async fn test_matches_label_case_insensitively() {
        let records = provider().search("HAM").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], json!("DEHAM"));
    }

    #[test]
    fn test_matches_identifier() {
        let records = tokio_test::block_on(provider().search("beanr")).unwrap();
        assert_eq!(records[0]["name"], json!("Antwerp"));
    }

    #[tokio::test]
    async fn test_load_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"items": [{{"id": "X", "name": "Xiamen"}}]}}"#).unwrap();

        let provider = StaticSearchProvider::load(file.path()).unwrap();
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.search("xia").await.unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_fixture() {
        let err = StaticSearchProvider::load("/nonexistent/fixture.json").unwrap_err();
        assert!(matches!(err, ClientError::Fixture { .. }));
    }
}
