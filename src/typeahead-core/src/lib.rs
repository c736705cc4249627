//! # Typeahead Core
//!
//! Headless state machine for an asynchronous typeahead selector: a combo box
//! that either displays a previously committed selection or searches a remote
//! catalog as the user types.
//!
//! The crate owns no I/O and no clock. Everything that happens to the control
//! (prop changes from the host, keystrokes, focus changes, debounce ticks and
//! search responses) is a [`SelectorEvent`], and [`reduce`] turns the current
//! [`SelectorState`] plus one event into the next state and a list of
//! [`Effect`]s for the runtime to carry out.
//!
//! ```rust
//! use typeahead_core::{Effect, SelectorEvent, SelectorState};
//!
//! let mut state = SelectorState::default();
//! let effects = state.apply(SelectorEvent::PropsChanged {
//!     value: Some("A1".into()),
//!     display_value: Some("Acme Corp".into()),
//! });
//!
//! assert_eq!(state.text(), "Acme Corp");
//! assert!(effects.iter().all(|e| !matches!(e, Effect::Notify(_))));
//! ```
//!
//! ## Architecture
//!
//! ```text
//!  host props ─┐
//!  keystrokes ─┤                 ┌──────────────┐
//!  focus/blur ─┼─ SelectorEvent ─▶    reduce    ├─▶ SelectorState
//!  debounce   ─┤                 └──────┬───────┘
//!  responses  ─┘                        │
//!                                       ▼
//!                         Effect (notify, debounce, fetch)
//! ```

pub mod cursor;
pub mod event;
pub mod format;
pub mod option;
pub mod placeholder;
pub mod reducer;
pub mod state;

pub use cursor::Cursor;
pub use event::{Change, Effect, NavKey, SelectorEvent, Transition};
pub use format::{DefaultFormatter, DisplayFormatter, FieldFormatter};
pub use option::{Record, ResultEntry, ResultSet, SelectOption};
pub use placeholder::{PLACEHOLDER_PREFIX, is_placeholder_id, placeholder_id};
pub use reducer::reduce;
pub use state::{DEFAULT_MIN_SEARCH_LENGTH, Hint, Mode, SearchPolicy, Selection, SelectorState};

#[cfg(test)]
mod tests;
