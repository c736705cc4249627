//! Keyboard highlight position in the option list.

/// Highlighted row, independent of the text caret.
///
/// The index is always the literal rendered row; `None` means nothing is
/// highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(Option<usize>);

impl Cursor {
    /// No row highlighted.
    pub const NONE: Cursor = Cursor(None);

    /// Highlight a specific row.
    pub fn at(index: usize) -> Self {
        Self(Some(index))
    }

    /// Cursor for a freshly loaded list: first row, or none when empty.
    pub fn reset_for(len: usize) -> Self {
        if len > 0 { Self(Some(0)) } else { Self::NONE }
    }

    pub fn index(self) -> Option<usize> {
        self.0
    }

    pub fn is_set(self) -> bool {
        self.0.is_some()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Advance one row, clamped to the last. An unset cursor lands on 0.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.0 = None;
            return;
        }
        self.0 = Some(match self.0 {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    /// Retreat one row, floored at 0.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.0 = None;
            return;
        }
        self.0 = Some(match self.0 {
            None => 0,
            Some(i) => i.saturating_sub(1).min(len - 1),
        });
    }

    pub fn first(&mut self, len: usize) {
        if len > 0 {
            self.0 = Some(0);
        }
    }

    pub fn last(&mut self, len: usize) {
        if len > 0 {
            self.0 = Some(len - 1);
        }
    }

    /// The highlighted row if it exists in a list of `len` rows.
    pub fn valid_index(self, len: usize) -> Option<usize> {
        self.0.filter(|&i| i < len)
    }

    /// The item under the cursor.
    pub fn selected<T>(self, items: &[T]) -> Option<&T> {
        self.valid_index(items.len()).and_then(|i| items.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_for() {
        assert_eq!(Cursor::reset_for(3), Cursor::at(0));
        assert_eq!(Cursor::reset_for(0), Cursor::NONE);
    }

    #[test]
    fn test_next_clamps_to_last() {
        let mut cursor = Cursor::NONE;
        cursor.next(2);
        assert_eq!(cursor.index(), Some(0));
        cursor.next(2);
        assert_eq!(cursor.index(), Some(1));
        cursor.next(2);
        assert_eq!(cursor.index(), Some(1));
    }

    #[test]
    fn test_prev_floors_at_zero() {
        let mut cursor = Cursor::at(1);
        cursor.prev(3);
        assert_eq!(cursor.index(), Some(0));
        cursor.prev(3);
        assert_eq!(cursor.index(), Some(0));

        let mut unset = Cursor::NONE;
        unset.prev(3);
        assert_eq!(unset.index(), Some(0));
    }

    #[test]
    fn test_home_end() {
        let mut cursor = Cursor::NONE;
        cursor.last(4);
        assert_eq!(cursor.index(), Some(3));
        cursor.first(4);
        assert_eq!(cursor.index(), Some(0));

        let mut empty = Cursor::NONE;
        empty.last(0);
        empty.first(0);
        assert!(!empty.is_set());
    }

    #[test]
    fn test_valid_index() {
        assert_eq!(Cursor::at(2).valid_index(3), Some(2));
        assert_eq!(Cursor::at(3).valid_index(3), None);
        assert_eq!(Cursor::NONE.valid_index(3), None);
    }

    #[test]
    fn test_selected() {
        let rows = ["Acme", "Bolt"];
        assert_eq!(Cursor::at(1).selected(&rows), Some(&"Bolt"));
        assert_eq!(Cursor::at(2).selected(&rows), None);
    }
}
