//! Inputs to and outputs of the reducer.

use serde::Serialize;

use crate::option::{Record, ResultSet, SelectOption};
use crate::state::SelectorState;

/// Keys the selector reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Home,
    End,
    /// Select-on-tab-out
    Tab,
    /// Commit the highlighted option
    Enter,
    /// Close the list and drop uncommitted edits
    Escape,
}

/// Everything that can happen to a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEvent {
    /// The host passed new `value` / `displayValue` props.
    PropsChanged {
        value: Option<String>,
        display_value: Option<String>,
    },
    /// The input text changed to the given string.
    TextEdited(String),
    Focused,
    Blurred,
    Key(NavKey),
    /// Commit by identifier; `None` clears.
    Commit(Option<String>),
    /// The quiet interval after the last keystroke passed.
    DebounceElapsed,
    /// A search completed.
    FetchSucceeded {
        token: u64,
        query: String,
        results: ResultSet,
    },
    /// A search failed.
    FetchFailed {
        token: u64,
        query: String,
        message: String,
    },
}

/// Payload of the host's `onChange` callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Change {
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
}

impl Change {
    /// A null selection.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_cleared(&self) -> bool {
        self.id.is_none()
    }
}

/// Work the runtime performs on the reducer's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Invoke the host's `onChange`.
    Notify(Change),
    /// (Re)start the quiet-interval timer, superseding any running one.
    RestartDebounce,
    /// Stop the timer without restarting it.
    CancelDebounce,
    /// Call the search collaborator; report back with `token`.
    Fetch { token: u64, query: String },
    /// Select the whole input text so typing replaces it.
    SelectAllText,
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SelectorState,
    pub effects: Vec<Effect>,
}
