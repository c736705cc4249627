//! Terminal front end for the typeahead selector.
//!
//! - [`TextBuffer`]: grapheme-aware editing of the input line
//! - [`map_key`]: crossterm key events to [`KeyAction`]s
//! - [`TypeaheadView`]: ratatui widget for the input, dropdown and hint
//! - [`Picker`]: ties the three to a [`typeahead::Typeahead`]

pub mod keymap;
pub mod picker;
pub mod text_buffer;
pub mod theme;
pub mod view;

pub use keymap::{KeyAction, map_key};
pub use picker::{Picker, PickerStatus};
pub use text_buffer::TextBuffer;
pub use view::TypeaheadView;
