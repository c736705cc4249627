//! Single-line editing buffer.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text of the input line plus a caret measured in graphemes.
///
/// When `selected_all` is set the next insertion replaces the whole text and
/// the next deletion empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor: usize,
    selected_all: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `value` with the caret at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.set(value);
        buffer
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Caret position in graphemes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected_all(&self) -> bool {
        self.selected_all
    }

    /// Replace the text and move the caret to the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self.selected_all = false;
    }

    pub fn select_all(&mut self) {
        self.selected_all = !self.value.is_empty();
    }

    /// Insert a character at the caret.
    pub fn insert(&mut self, c: char) {
        self.replace_selection();
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        // A combining mark joins the previous grapheme.
        self.cursor = self.value[..byte_offset + c.len_utf8()].graphemes(true).count();
    }

    /// Insert pasted text at the caret.
    pub fn insert_str(&mut self, text: &str) {
        self.replace_selection();
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert_str(byte_offset, text);
        self.cursor = self.value[..byte_offset + text.len()].graphemes(true).count();
    }

    /// Delete the grapheme before the caret.
    pub fn backspace(&mut self) {
        if self.selected_all {
            self.clear();
            return;
        }
        if self.cursor > 0 {
            let start = self.grapheme_to_byte_offset(self.cursor - 1);
            let end = self.grapheme_to_byte_offset(self.cursor);
            self.value.replace_range(start..end, "");
            self.cursor -= 1;
        }
    }

    /// Delete the grapheme under the caret.
    pub fn delete(&mut self) {
        if self.selected_all {
            self.clear();
            return;
        }
        if self.cursor < self.grapheme_count() {
            let start = self.grapheme_to_byte_offset(self.cursor);
            let end = self.grapheme_to_byte_offset(self.cursor + 1);
            self.value.replace_range(start..end, "");
        }
    }

    pub fn move_left(&mut self) {
        self.selected_all = false;
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.selected_all = false;
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.selected_all = false;
    }

    /// Display width of the text before the caret.
    pub fn caret_column(&self) -> usize {
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value[..byte_offset].width()
    }

    fn replace_selection(&mut self) {
        if self.selected_all {
            self.clear();
        }
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_to_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.value.len())
    }
}
