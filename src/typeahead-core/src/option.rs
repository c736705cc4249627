//! Search results as the dropdown sees them.
//!
//! Every displayed [`SelectOption`] travels together with the raw [`Record`]
//! it was projected from, so the two lists can never drift apart.

use serde::{Deserialize, Serialize};

use crate::format::DisplayFormatter;

/// A raw record returned by the search collaborator. Opaque to the control.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// One search result formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Identifier handed back to the host on commit
    pub id: String,
    /// Text shown in the input and the dropdown row
    pub label: String,
}

impl SelectOption {
    /// Create a new option.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// An option plus the record behind it.
///
/// Synthetic options (a committed value mirrored into the list) carry no record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub option: SelectOption,
    pub record: Option<Record>,
}

/// The option list currently backing the dropdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<ResultEntry>,
}

impl ResultSet {
    /// Project raw records through `formatter`.
    ///
    /// Records the formatter cannot project are dropped along with their
    /// option, keeping rows and records aligned.
    pub fn from_records(records: Vec<Record>, formatter: &dyn DisplayFormatter) -> Self {
        let entries = records
            .into_iter()
            .filter_map(|record| {
                formatter.format(&record).map(|option| ResultEntry {
                    option,
                    record: Some(record),
                })
            })
            .collect();
        Self { entries }
    }

    /// A result set holding a single synthetic option.
    pub fn single(option: SelectOption) -> Self {
        Self {
            entries: vec![ResultEntry {
                option,
                record: None,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Option at a rendered row.
    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.entries.get(index).map(|entry| &entry.option)
    }

    /// Entry at a rendered row.
    pub fn entry(&self, index: usize) -> Option<&ResultEntry> {
        self.entries.get(index)
    }

    /// Options in row order.
    pub fn options(&self) -> impl Iterator<Item = &SelectOption> + '_ {
        self.entries.iter().map(|entry| &entry.option)
    }

    /// Row index of the option with the given identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.option.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// The original record whose formatted identifier is `id`.
    pub fn record_for(&self, id: &str) -> Option<&Record> {
        self.entries
            .iter()
            .find(|entry| entry.option.id == id)
            .and_then(|entry| entry.record.as_ref())
    }

    /// Make sure `option` is listed, prepending it when missing.
    ///
    /// Returns the row it occupies afterwards.
    pub fn ensure(&mut self, option: SelectOption) -> usize {
        if let Some(index) = self.position(&option.id) {
            return index;
        }
        self.entries.insert(
            0,
            ResultEntry {
                option,
                record: None,
            },
        );
        0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<SelectOption> for ResultSet {
    fn from_iter<I: IntoIterator<Item = SelectOption>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|option| ResultEntry {
                    option,
                    record: None,
                })
                .collect(),
        }
    }
}
