//! Selector configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use typeahead_core::{DEFAULT_MIN_SEARCH_LENGTH, SearchPolicy};

/// Default quiet interval between the last keystroke and the search.
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Per-selector settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeaheadConfig {
    /// Characters required before a search is issued.
    #[serde(default = "default_min_search_length")]
    pub min_search_length: usize,
    /// Quiet interval in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Hand the raw record to `on_change` alongside the option.
    #[serde(default)]
    pub passthrough_records: bool,
}

fn default_min_search_length() -> usize {
    DEFAULT_MIN_SEARCH_LENGTH
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            min_search_length: default_min_search_length(),
            debounce_ms: default_debounce_ms(),
            passthrough_records: false,
        }
    }
}

impl TypeaheadConfig {
    pub fn with_min_search_length(mut self, min: usize) -> Self {
        self.min_search_length = min;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_passthrough_records(mut self, passthrough: bool) -> Self {
        self.passthrough_records = passthrough;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub(crate) fn policy(&self, searchable: bool) -> SearchPolicy {
        SearchPolicy {
            min_search_length: self.min_search_length,
            searchable,
        }
    }
}
