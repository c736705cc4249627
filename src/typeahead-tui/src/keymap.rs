//! Key bindings for the picker.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use typeahead::NavKey;

/// What a key press asks the picker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// List navigation and commit keys.
    Nav(NavKey),
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
    CaretLeft,
    CaretRight,
    /// Empty the input (Ctrl+U).
    ClearLine,
    /// Abandon the picker (Ctrl+C).
    Quit,
}

/// Translate a crossterm key event. Releases and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('u') if ctrl => KeyAction::ClearLine,
        KeyCode::Char('n') if ctrl => KeyAction::Nav(NavKey::Down),
        KeyCode::Char('p') if ctrl => KeyAction::Nav(NavKey::Up),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return None,
        KeyCode::Char(c) => KeyAction::Insert(c),
        KeyCode::Down => KeyAction::Nav(NavKey::Down),
        KeyCode::Up => KeyAction::Nav(NavKey::Up),
        KeyCode::Home => KeyAction::Nav(NavKey::Home),
        KeyCode::End => KeyAction::Nav(NavKey::End),
        KeyCode::Tab | KeyCode::BackTab => KeyAction::Nav(NavKey::Tab),
        KeyCode::Enter => KeyAction::Nav(NavKey::Enter),
        KeyCode::Esc => KeyAction::Nav(NavKey::Escape),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Delete => KeyAction::Delete,
        KeyCode::Left => KeyAction::CaretLeft,
        KeyCode::Right => KeyAction::CaretRight,
        _ => return None,
    };
    Some(action)
}
