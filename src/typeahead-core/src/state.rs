//! Selector state and read accessors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::option::{ResultSet, SelectOption};

/// Default minimum number of characters before a search is issued.
pub const DEFAULT_MIN_SEARCH_LENGTH: usize = 3;

/// What the input text currently represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Nothing selected, nothing typed
    #[default]
    Neutral,
    /// Showing a committed selection's label
    Display,
    /// Text is an in-progress query
    Searching,
}

/// A committed choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: String,
    /// Absent when committed by raw identifier with no matching option
    pub label: Option<String>,
}

impl Selection {
    /// Text the input shows for this selection.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

impl From<&SelectOption> for Selection {
    fn from(option: &SelectOption) -> Self {
        Self {
            id: option.id.clone(),
            label: Some(option.label.clone()),
        }
    }
}

/// When typing is allowed to reach the search collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    /// Minimum text length (in characters) before searching
    pub min_search_length: usize,
    /// Whether a search endpoint is configured at all
    pub searchable: bool,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            min_search_length: DEFAULT_MIN_SEARCH_LENGTH,
            searchable: true,
        }
    }
}

/// Inline affordance shown under the input instead of an error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// Query is shorter than the minimum; carries the missing count
    TypeMore(usize),
    /// A search is outstanding
    Searching,
    /// The last search came back empty
    NoResults,
    /// The last search failed
    SearchFailed,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::TypeMore(1) => write!(f, "Type 1 more character"),
            Hint::TypeMore(n) => write!(f, "Type {n} more characters"),
            Hint::Searching => write!(f, "Searching..."),
            Hint::NoResults => write!(f, "No results"),
            Hint::SearchFailed => write!(f, "Search failed"),
        }
    }
}

/// Complete state of one selector.
///
/// Mutated only through [`crate::reduce`] / [`SelectorState::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorState {
    /// Last `value` prop seen from the host
    pub(crate) value: Option<String>,
    /// Last `displayValue` prop seen from the host
    pub(crate) display_value: Option<String>,
    /// Selection consistent with the current text
    pub(crate) selection: Option<Selection>,
    /// Selection the host was last told about; survives typing over it
    pub(crate) committed: Option<Selection>,
    pub(crate) text: String,
    pub(crate) mode: Mode,
    /// Text of the last completed search
    pub(crate) last_queried_text: Option<String>,
    pub(crate) results: ResultSet,
    pub(crate) cursor: Cursor,
    pub(crate) open: bool,
    pub(crate) focused: bool,
    pub(crate) loading: bool,
    pub(crate) failed: bool,
    /// Token of the most recently issued search
    pub(crate) latest_token: u64,
    pub(crate) policy: SearchPolicy,
    pub(crate) passthrough_records: bool,
}

impl SelectorState {
    /// Create state for a selector with the given search policy.
    pub fn new(policy: SearchPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Include the original record in commit notifications.
    pub fn with_passthrough_records(mut self, passthrough: bool) -> Self {
        self.passthrough_records = passthrough;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The option under the cursor, if any.
    pub fn highlighted(&self) -> Option<&SelectOption> {
        self.cursor
            .valid_index(self.results.len())
            .and_then(|index| self.results.get(index))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Whether the dropdown should be drawn.
    pub fn is_open(&self) -> bool {
        self.open && (!self.results.is_empty() || self.hint().is_some())
    }

    /// Inline affordance for the current query, if one applies.
    pub fn hint(&self) -> Option<Hint> {
        if self.mode != Mode::Searching {
            return None;
        }
        if self.loading {
            return Some(Hint::Searching);
        }
        let typed = self.text.chars().count();
        if self.policy.searchable && typed < self.policy.min_search_length {
            return Some(Hint::TypeMore(self.policy.min_search_length - typed));
        }
        if self.failed {
            return Some(Hint::SearchFailed);
        }
        if self.results.is_empty() && self.last_queried_text.is_some() {
            return Some(Hint::NoResults);
        }
        None
    }

    /// Whether `text` is long enough and non-blank for a search.
    pub(crate) fn is_searchable_text(&self, text: &str) -> bool {
        self.policy.searchable
            && !text.trim().is_empty()
            && text.chars().count() >= self.policy.min_search_length
    }
}
