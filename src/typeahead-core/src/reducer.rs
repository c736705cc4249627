//! The selector's transition function.
//!
//! Host prop changes go through the same path as user actions, so
//! reconciliation is one deterministic transition rather than a reaction to
//! prop diffs.

use tracing::trace;

use crate::cursor::Cursor;
use crate::event::{Change, Effect, NavKey, SelectorEvent, Transition};
use crate::option::{ResultSet, SelectOption};
use crate::placeholder::placeholder_id;
use crate::state::{Mode, Selection, SelectorState};

/// Reduce one event against `state`.
pub fn reduce(mut state: SelectorState, event: SelectorEvent) -> Transition {
    let effects = state.apply(event);
    Transition { state, effects }
}

impl SelectorState {
    /// In-place form of [`reduce`].
    pub fn apply(&mut self, event: SelectorEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            SelectorEvent::PropsChanged {
                value,
                display_value,
            } => self.reconcile(value, display_value, &mut effects),
            SelectorEvent::TextEdited(text) => self.edit(text, &mut effects),
            SelectorEvent::Focused => self.focus(&mut effects),
            SelectorEvent::Blurred => self.blur(&mut effects),
            SelectorEvent::Key(key) => self.navigate(key, &mut effects),
            SelectorEvent::Commit(None) => self.clear(&mut effects),
            SelectorEvent::Commit(Some(id)) => self.commit_id(id, &mut effects),
            SelectorEvent::DebounceElapsed => self.debounce_elapsed(&mut effects),
            SelectorEvent::FetchSucceeded {
                token,
                query,
                results,
            } => self.fetch_succeeded(token, query, results),
            SelectorEvent::FetchFailed {
                token,
                query,
                message,
            } => self.fetch_failed(token, query, &message),
        }
        effects
    }

    // ------------------------------------------------------------------
    // Host props
    // ------------------------------------------------------------------

    fn reconcile(
        &mut self,
        value: Option<String>,
        display_value: Option<String>,
        fx: &mut Vec<Effect>,
    ) {
        let value = value.filter(|v| !v.is_empty());
        let display_value = display_value.filter(|v| !v.is_empty());
        if value == self.value && display_value == self.display_value {
            return;
        }
        self.value.clone_from(&value);
        self.display_value.clone_from(&display_value);

        let option = match (value, display_value) {
            (Some(id), Some(label)) => SelectOption::new(id, label),
            (Some(id), None) => {
                let label = self.known_label(&id).unwrap_or_else(|| id.clone());
                SelectOption::new(id, label)
            }
            (None, Some(label)) => SelectOption::new(placeholder_id(&label), label),
            (None, None) => {
                self.reset(fx);
                return;
            }
        };
        self.show(option, fx);
    }

    /// Label already known for `id`, from the list or the last commit.
    fn known_label(&self, id: &str) -> Option<String> {
        self.results
            .position(id)
            .and_then(|index| self.results.get(index))
            .map(|option| option.label.clone())
            .or_else(|| {
                self.committed
                    .as_ref()
                    .filter(|committed| committed.id == id)
                    .and_then(|committed| committed.label.clone())
            })
    }

    /// Mirror `option` as the committed selection without notifying the host.
    fn show(&mut self, option: SelectOption, fx: &mut Vec<Effect>) {
        self.leave_search(fx);
        let selection = Selection::from(&option);
        self.text = option.label.clone();
        self.cursor = Cursor::at(self.results.ensure(option));
        self.selection = Some(selection.clone());
        self.committed = Some(selection);
        self.mode = Mode::Display;
    }

    // ------------------------------------------------------------------
    // Typing
    // ------------------------------------------------------------------

    fn edit(&mut self, text: String, fx: &mut Vec<Effect>) {
        if text.is_empty() {
            self.clear(fx);
            return;
        }
        self.open = true;

        if self
            .committed
            .as_ref()
            .is_some_and(|committed| committed.display_text() == text)
        {
            self.restore_committed(fx);
            return;
        }

        let fresh_query = self
            .last_queried_text
            .as_deref()
            .is_none_or(|last| !same_query(last, &text));

        self.selection = None;
        self.mode = Mode::Searching;
        self.text = text;
        self.failed = false;
        if fresh_query {
            self.cursor.clear();
        }
        fx.push(Effect::RestartDebounce);
    }

    fn debounce_elapsed(&mut self, fx: &mut Vec<Effect>) {
        if self.mode != Mode::Searching || !self.is_searchable_text(&self.text) {
            return;
        }
        self.latest_token += 1;
        self.loading = true;
        self.failed = false;
        fx.push(Effect::Fetch {
            token: self.latest_token,
            query: self.text.trim().to_owned(),
        });
    }

    fn fetch_succeeded(&mut self, token: u64, query: String, results: ResultSet) {
        if token != self.latest_token {
            trace!(token, latest = self.latest_token, "dropping stale search response");
            return;
        }
        self.loading = false;
        self.failed = false;
        self.cursor = Cursor::reset_for(results.len());
        self.results = results;
        self.last_queried_text = Some(query);
    }

    fn fetch_failed(&mut self, token: u64, query: String, message: &str) {
        if token != self.latest_token {
            trace!(token, latest = self.latest_token, %message, "dropping stale search failure");
            return;
        }
        self.loading = false;
        self.failed = true;
        self.results.clear();
        self.cursor.clear();
        self.last_queried_text = Some(query);
    }

    /// Silence the debounce timer and orphan any outstanding search.
    fn leave_search(&mut self, fx: &mut Vec<Effect>) {
        if self.mode == Mode::Searching {
            fx.push(Effect::CancelDebounce);
        }
        if self.loading {
            self.loading = false;
            self.latest_token += 1;
        }
        self.failed = false;
    }

    // ------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------

    fn commit_id(&mut self, id: String, fx: &mut Vec<Effect>) {
        if id.is_empty() {
            self.clear(fx);
            return;
        }
        if let Some(index) = self.results.position(&id) {
            self.commit_index(index, fx);
            return;
        }

        self.leave_search(fx);
        let selection = Selection {
            id: id.clone(),
            label: None,
        };
        self.text.clone_from(&id);
        self.selection = Some(selection.clone());
        self.committed = Some(selection);
        self.mode = Mode::Display;
        self.cursor.clear();
        self.open = false;
        fx.push(Effect::Notify(Change {
            id: Some(id),
            option: None,
            record: None,
        }));
    }

    fn commit_index(&mut self, index: usize, fx: &mut Vec<Effect>) {
        let Some(entry) = self.results.entry(index).cloned() else {
            return;
        };
        self.leave_search(fx);
        let selection = Selection::from(&entry.option);
        self.text.clone_from(&entry.option.label);
        self.selection = Some(selection.clone());
        self.committed = Some(selection);
        self.mode = Mode::Display;
        self.cursor = Cursor::at(index);
        self.open = false;

        let record = if self.passthrough_records {
            entry.record
        } else {
            None
        };
        fx.push(Effect::Notify(Change {
            id: Some(entry.option.id.clone()),
            option: Some(entry.option),
            record,
        }));
    }

    /// Drop the selection and tell the host.
    fn clear(&mut self, fx: &mut Vec<Effect>) {
        self.reset(fx);
        fx.push(Effect::Notify(Change::cleared()));
    }

    /// Back to the neutral state: no selection, no text, no options.
    fn reset(&mut self, fx: &mut Vec<Effect>) {
        self.leave_search(fx);
        self.selection = None;
        self.committed = None;
        self.text.clear();
        self.results.clear();
        self.cursor.clear();
        self.last_queried_text = None;
        self.mode = Mode::Neutral;
    }

    /// Put the last committed selection back after an abandoned edit.
    fn restore_committed(&mut self, fx: &mut Vec<Effect>) {
        let Some(committed) = self.committed.clone() else {
            return;
        };
        self.leave_search(fx);
        self.text = committed.display_text().to_owned();
        if let Some(label) = &committed.label {
            let option = SelectOption::new(committed.id.clone(), label.clone());
            self.cursor = Cursor::at(self.results.ensure(option));
        }
        self.selection = Some(committed);
        self.mode = Mode::Display;
    }

    // ------------------------------------------------------------------
    // Focus and keys
    // ------------------------------------------------------------------

    fn focus(&mut self, fx: &mut Vec<Effect>) {
        self.focused = true;
        self.open = true;
        fx.push(Effect::SelectAllText);

        if let Some(Selection {
            id,
            label: Some(label),
        }) = &self.selection
        {
            let option = SelectOption::new(id.clone(), label.clone());
            self.cursor = Cursor::at(self.results.ensure(option));
        }
    }

    fn blur(&mut self, fx: &mut Vec<Effect>) {
        self.focused = false;
        self.open = false;

        if let Some(selection) = &self.selection {
            if self.text != selection.display_text() {
                self.text = selection.display_text().to_owned();
                self.mode = Mode::Display;
            }
            return;
        }

        if self.mode == Mode::Searching && !self.results.is_empty() && self.results_match_text() {
            let index = self.cursor.valid_index(self.results.len()).unwrap_or(0);
            let reverts = match (&self.committed, self.results.get(index)) {
                (Some(committed), Some(option)) => committed.id == option.id,
                _ => false,
            };
            if reverts {
                self.restore_committed(fx);
            } else {
                self.commit_index(index, fx);
            }
        } else if self.committed.is_some() {
            self.restore_committed(fx);
        }
    }

    /// The options on hand answer the text as typed, not an earlier query.
    fn results_match_text(&self) -> bool {
        !self.loading
            && self
                .last_queried_text
                .as_deref()
                .is_some_and(|last| same_query(last, &self.text))
    }

    fn navigate(&mut self, key: NavKey, fx: &mut Vec<Effect>) {
        let len = self.results.len();
        match key {
            NavKey::Tab => {
                if self.open
                    && self.selection.is_none()
                    && let Some(index) = self.cursor.valid_index(len)
                {
                    self.commit_index(index, fx);
                }
                self.open = false;
            }
            NavKey::Escape => {
                self.open = false;
                if self.selection.is_none() {
                    self.restore_committed(fx);
                }
            }
            _ if !self.open => {
                if key == NavKey::Down && self.focused {
                    self.open = true;
                }
            }
            NavKey::Down => self.cursor.next(len),
            NavKey::Up => self.cursor.prev(len),
            NavKey::Home => self.cursor.first(len),
            NavKey::End => self.cursor.last(len),
            NavKey::Enter => {
                if let Some(index) = self.cursor.valid_index(len) {
                    self.commit_index(index, fx);
                }
            }
        }
    }
}

/// Trimmed, case-insensitive query comparison.
fn same_query(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_query() {
        assert!(same_query("Acme", " acme "));
        assert!(!same_query("acm", "acme"));
    }

    #[test]
    fn test_reduce_is_pure_over_input_state() {
        let state = SelectorState::default();
        let before = state.clone();
        let transition = reduce(
            state,
            SelectorEvent::PropsChanged {
                value: None,
                display_value: Some("Acme Corp".into()),
            },
        );
        assert_eq!(before, SelectorState::default());
        assert_eq!(transition.state.text(), "Acme Corp");
    }
}
