//! Interactive picker: one selector, its input buffer and the host's view of
//! the last change.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use typeahead::{Change, NavKey, Typeahead};

use crate::keymap::KeyAction;
use crate::text_buffer::TextBuffer;
use crate::view::TypeaheadView;

/// Where the picker stands after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStatus {
    Editing,
    /// Focus left the control; the last change is final.
    Done,
    /// Abandoned without leaving the control.
    Cancelled,
}

pub struct Picker {
    selector: Typeahead,
    buffer: TextBuffer,
    label: String,
    last_change: Arc<Mutex<Option<Change>>>,
}

impl Picker {
    /// Wrap `selector`, taking over its change callback.
    pub fn new(mut selector: Typeahead, label: impl Into<String>) -> Self {
        let last_change = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last_change);
        selector.on_change(move |change: &Change| {
            *sink.lock() = Some(change.clone());
        });
        let buffer = TextBuffer::with_value(selector.text());
        Self {
            selector,
            buffer,
            label: label.into(),
            last_change,
        }
    }

    pub fn selector(&self) -> &Typeahead {
        &self.selector
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The most recent change reported to the host, if any.
    pub fn last_change(&self) -> Option<Change> {
        self.last_change.lock().clone()
    }

    pub fn view(&self) -> TypeaheadView<'_> {
        TypeaheadView::new(&self.selector, &self.buffer)
            .label(&self.label)
            .placeholder("Type to search")
    }

    pub fn focus(&mut self) {
        self.selector.focus();
        self.sync();
    }

    pub fn has_pending(&self) -> bool {
        self.selector.has_pending()
    }

    /// Apply one background result. See [`Typeahead::next_wakeup`].
    pub async fn next_wakeup(&mut self) -> bool {
        let woke = self.selector.next_wakeup().await;
        self.sync();
        woke
    }

    pub fn handle_action(&mut self, action: KeyAction) -> PickerStatus {
        let status = match action {
            KeyAction::Quit => PickerStatus::Cancelled,
            KeyAction::Nav(NavKey::Tab) => {
                self.selector.key(NavKey::Tab);
                self.selector.blur();
                PickerStatus::Done
            }
            KeyAction::Nav(NavKey::Enter) => {
                self.selector.key(NavKey::Enter);
                if self.selector.selection().is_some() {
                    self.selector.blur();
                    PickerStatus::Done
                } else {
                    PickerStatus::Editing
                }
            }
            KeyAction::Nav(NavKey::Escape) if !self.selector.is_open() => {
                PickerStatus::Cancelled
            }
            KeyAction::Nav(key) => {
                self.selector.key(key);
                PickerStatus::Editing
            }
            KeyAction::CaretLeft => {
                self.buffer.move_left();
                PickerStatus::Editing
            }
            KeyAction::CaretRight => {
                self.buffer.move_right();
                PickerStatus::Editing
            }
            edit => {
                self.edit(edit);
                PickerStatus::Editing
            }
        };
        self.sync();
        debug!(?status, text = self.selector.text(), "Picker action handled");
        status
    }

    fn edit(&mut self, action: KeyAction) {
        let before = self.buffer.value().to_owned();
        match action {
            KeyAction::Insert(c) => self.buffer.insert(c),
            KeyAction::Paste(text) => self.buffer.insert_str(&text),
            KeyAction::Backspace => self.buffer.backspace(),
            KeyAction::Delete => self.buffer.delete(),
            KeyAction::ClearLine => self.buffer.clear(),
            _ => {}
        }
        if self.buffer.value() != before {
            self.selector.input(self.buffer.value());
        }
    }

    /// Mirror selector text and select-all requests into the buffer.
    fn sync(&mut self) {
        if self.selector.text() != self.buffer.value() {
            self.buffer.set(self.selector.text());
        }
        if self.selector.take_select_all() {
            self.buffer.select_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use typeahead::{DefaultFormatter, SearchProvider, TypeaheadConfig};
    use typeahead_client::StaticSearchProvider;

    fn picker() -> Picker {
        let provider: Arc<dyn SearchProvider> =
            Arc::new(StaticSearchProvider::from_json(serde_json::json!([
                {"id": "NLRTM", "name": "Rotterdam"},
                {"id": "DEBRV", "name": "Bremerhaven"}
            ])));
        let selector = Typeahead::new(
            TypeaheadConfig::default(),
            Some(provider),
            Arc::new(DefaultFormatter),
        );
        Picker::new(selector, "Port:")
    }

    fn type_text(picker: &mut Picker, text: &str) {
        for c in text.chars() {
            picker.handle_action(KeyAction::Insert(c));
        }
    }

    async fn settle(picker: &mut Picker) {
        while picker.next_wakeup().await {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_then_enter_finishes() {
        let mut picker = picker();
        picker.focus();
        type_text(&mut picker, "bre");
        settle(&mut picker).await;

        assert_eq!(picker.handle_action(KeyAction::Nav(NavKey::Enter)), PickerStatus::Done);
        let change = picker.last_change().expect("change");
        assert_eq!(change.id.as_deref(), Some("DEBRV"));
        assert_eq!(picker.buffer().value(), "Bremerhaven");
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_selects_committed_text() {
        let mut picker = picker();
        picker.selector.set_props(Some("NLRTM"), Some("Rotterdam"));
        picker.sync();
        picker.focus();
        assert!(picker.buffer().is_selected_all());

        picker.handle_action(KeyAction::Insert('b'));
        assert_eq!(picker.buffer().value(), "b");
        assert_eq!(picker.selector().text(), "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_line_reports_null() {
        let mut picker = picker();
        picker.selector.set_props(Some("NLRTM"), Some("Rotterdam"));
        picker.sync();
        picker.focus();

        assert_eq!(picker.handle_action(KeyAction::ClearLine), PickerStatus::Editing);
        assert_eq!(picker.last_change(), Some(Change::cleared()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_twice_cancels() {
        let mut picker = picker();
        picker.focus();
        type_text(&mut picker, "ro");
        assert_eq!(picker.handle_action(KeyAction::Nav(NavKey::Escape)), PickerStatus::Editing);
        assert_eq!(picker.handle_action(KeyAction::Nav(NavKey::Escape)), PickerStatus::Cancelled);
        assert_eq!(picker.last_change(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caret_moves_do_not_search() {
        let mut picker = picker();
        picker.focus();
        type_text(&mut picker, "rot");
        settle(&mut picker).await;
        picker.handle_action(KeyAction::CaretLeft);

        assert!(!picker.has_pending());
        assert_eq!(picker.buffer().cursor(), 2);
    }
}
