//! Rendering of the selector.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Widget};
use typeahead::{Hint, SelectOption, Typeahead};

use crate::text_buffer::TextBuffer;
use crate::theme::{ACCENT, BORDER, ERROR, SURFACE, SURFACE_HIGHLIGHT, TEXT, TEXT_DIM, TEXT_MUTED};

const DEFAULT_MAX_ROWS: usize = 8;

/// Input line followed, while the list is open, by the dropdown and hint.
pub struct TypeaheadView<'a> {
    selector: &'a Typeahead,
    buffer: &'a TextBuffer,
    label: Option<&'a str>,
    placeholder: &'a str,
    max_rows: usize,
}

impl<'a> TypeaheadView<'a> {
    pub fn new(selector: &'a Typeahead, buffer: &'a TextBuffer) -> Self {
        Self {
            selector,
            buffer,
            label: None,
            placeholder: "",
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Maximum option rows shown at once.
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows.max(1);
        self
    }

    /// Lines needed to draw everything without clipping.
    pub fn desired_height(&self) -> u16 {
        if !self.selector.is_open() {
            return 1;
        }
        let rows = self.selector.options().len().min(self.max_rows);
        let hint = usize::from(self.selector.hint().is_some());
        u16::try_from(1 + rows + hint + 2).unwrap_or(u16::MAX)
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let mut x = area.x;
        if let Some(label) = self.label {
            let (end, _) = buf.set_stringn(
                x,
                area.y,
                format!("{label} "),
                area.width as usize,
                Style::default().fg(TEXT_DIM),
            );
            x = end;
        }
        if x >= area.right() {
            return;
        }
        let width = area.right() - x;
        let focused = self.selector.state().is_focused();

        for col in x..area.right() {
            if let Some(cell) = buf.cell_mut((col, area.y)) {
                cell.set_char(' ').set_style(Style::default().bg(SURFACE));
            }
        }

        let text = self.buffer.value();
        if text.is_empty() {
            buf.set_stringn(
                x,
                area.y,
                self.placeholder,
                width as usize,
                Style::default().fg(TEXT_MUTED).bg(SURFACE),
            );
        } else {
            let bg = if self.buffer.is_selected_all() {
                SURFACE_HIGHLIGHT
            } else {
                SURFACE
            };
            buf.set_stringn(
                x,
                area.y,
                text,
                width as usize,
                Style::default().fg(TEXT).bg(bg),
            );
        }

        if focused {
            let caret = u16::try_from(self.buffer.caret_column()).unwrap_or(u16::MAX);
            let caret_x = x.saturating_add(caret);
            if caret_x < area.right()
                && let Some(cell) = buf.cell_mut((caret_x, area.y))
            {
                cell.set_bg(ACCENT).set_fg(SURFACE);
            }
        }
    }

    fn render_row(option: &SelectOption, highlighted: bool, area: Rect, buf: &mut Buffer) {
        let bg = if highlighted { SURFACE_HIGHLIGHT } else { SURFACE };
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ').set_bg(bg);
            }
        }

        let style = if highlighted {
            Style::default()
                .fg(ACCENT)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT).bg(bg)
        };
        buf.set_stringn(
            area.x + 1,
            area.y,
            &option.label,
            area.width.saturating_sub(1) as usize,
            style,
        );

        if highlighted && let Some(cell) = buf.cell_mut((area.x, area.y)) {
            cell.set_char('>').set_style(Style::default().fg(ACCENT).bg(bg));
        }
    }

    fn render_hint(hint: Hint, area: Rect, buf: &mut Buffer) {
        let fg = match hint {
            Hint::SearchFailed => ERROR,
            _ => TEXT_DIM,
        };
        buf.set_stringn(
            area.x + 1,
            area.y,
            hint.to_string(),
            area.width.saturating_sub(1) as usize,
            Style::default()
                .fg(fg)
                .bg(SURFACE)
                .add_modifier(Modifier::ITALIC),
        );
    }
}

impl Widget for TypeaheadView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 5 {
            return;
        }
        self.render_input(Rect::new(area.x, area.y, area.width, 1), buf);

        if !self.selector.is_open() || area.height < 4 {
            return;
        }

        let options = self.selector.options();
        let hint = self.selector.hint();
        let wanted = self.desired_height().saturating_sub(1);
        let popup = Rect::new(area.x, area.y + 1, area.width, wanted.min(area.height - 1));

        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let hint_lines = u16::from(hint.is_some());
        let row_capacity = usize::from(inner.height.saturating_sub(hint_lines)).min(self.max_rows);
        let cursor = self.selector.cursor().valid_index(options.len());
        for (line, index) in visible_window(options.len(), cursor, row_capacity).enumerate() {
            let y = inner.y + line as u16;
            let row = Rect::new(inner.x, y, inner.width, 1);
            Self::render_row(options[index], cursor == Some(index), row, buf);
        }

        if let Some(hint) = hint
            && inner.height > 0
        {
            let y = inner.bottom() - 1;
            Self::render_hint(hint, Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

/// Rows to draw so the cursor row stays on screen.
pub fn visible_window(len: usize, cursor: Option<usize>, rows: usize) -> Range<usize> {
    if rows == 0 {
        return 0..0;
    }
    if len <= rows {
        return 0..len;
    }
    let start = cursor
        .map(|index| (index + 1).saturating_sub(rows))
        .unwrap_or(0)
        .min(len - rows);
    start..start + rows
}
