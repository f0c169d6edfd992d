//! Cursor & Selection
//!
//! [`Cursor`] owns the insertion point and an optional selection anchor. It does not own the
//! document: every operation borrows the [`Buffer`] it is bound to, and the resulting position
//! is clamped into that buffer's bounds.
//!
//! # Sticky column
//!
//! Vertical movement targets a remembered *desired* column, kept as a visual cell offset
//! (tabs expand to the tab width, wide characters take two cells). Horizontal movement and
//! edits update it; vertical movement alone never does, so moving through a short line and
//! back restores the original horizontal position.
//!
//! # Example
//!
//! ```rust
//! use textedit_core::{Buffer, Cursor, Position};
//!
//! let buffer = Buffer::from_text("long line\nab\nlong line");
//! let mut cursor = Cursor::new();
//! cursor.set_position(&buffer, 0, 7);
//! cursor.move_down(&buffer);
//! assert_eq!(cursor.position(), Position::new(1, 2));
//! cursor.move_down(&buffer);
//! assert_eq!(cursor.position(), Position::new(2, 7));
//! ```

use crate::text::{
    char_len, column_for_visual_x, leading_whitespace, visual_x_for_column, word_end_after,
    word_start_before,
};
use crate::{Buffer, Position, Selection};
use textedit_lang::PairConfig;

/// Insertion point plus optional selection anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    anchor: Option<Position>,
    desired_x: usize,
    tab_width: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    /// A cursor at the document start with no selection.
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            anchor: None,
            desired_x: 0,
            tab_width: 4,
        }
    }

    /// Current line.
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Current column.
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Selection anchor, if a selection is active.
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Line of the selection anchor.
    pub fn selection_anchor_line(&self) -> Option<usize> {
        self.anchor.map(|a| a.line)
    }

    /// Column of the selection anchor.
    pub fn selection_anchor_column(&self) -> Option<usize> {
        self.anchor.map(|a| a.column)
    }

    /// Returns `true` while a selection anchor is set.
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns `true` if the selection covers at least one character.
    pub fn has_nonempty_selection(&self) -> bool {
        self.anchor.is_some_and(|a| a != self.position)
    }

    /// Normalized selection range (`start <= end`) regardless of drag direction.
    pub fn selection(&self) -> Option<Selection> {
        self.anchor
            .map(|anchor| Selection::from_anchor(anchor, self.position))
    }

    /// Drop the anchor at the current position. Does nothing while a selection is active.
    pub fn start_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.position);
        }
    }

    /// Remove the anchor. The cursor does not move.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Visual cell offset of the cursor within its line.
    pub fn visual_x(&self, buffer: &Buffer) -> usize {
        let line = buffer.line(self.position.line).unwrap_or_default();
        visual_x_for_column(line, self.position.column, self.tab_width)
    }

    /// Tab width used to measure the sticky column.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Set the tab width used to measure the sticky column.
    pub fn set_tab_width(&mut self, buffer: &Buffer, tab_width: usize) {
        self.tab_width = tab_width.max(1);
        self.update_desired(buffer);
    }

    /// Move to `(line, column)`, clamped.
    pub fn set_position(&mut self, buffer: &Buffer, line: usize, column: usize) {
        self.position = buffer.clamp_position(Position::new(line, column));
        self.update_desired(buffer);
    }

    /// Restore a full cursor state (position and anchor), clamped.
    pub(crate) fn restore(&mut self, buffer: &Buffer, position: Position, anchor: Option<Position>) {
        self.anchor = anchor.map(|a| buffer.clamp_position(a));
        self.set_position(buffer, position.line, position.column);
    }

    /// Re-clamp position and anchor after the buffer changed underneath.
    pub fn clamp(&mut self, buffer: &Buffer) {
        self.position = buffer.clamp_position(self.position);
        self.anchor = self.anchor.map(|a| buffer.clamp_position(a));
    }

    fn update_desired(&mut self, buffer: &Buffer) {
        let line = buffer.line(self.position.line).unwrap_or_default();
        self.desired_x = visual_x_for_column(line, self.position.column, self.tab_width);
    }

    fn move_vertically_to(&mut self, buffer: &Buffer, line: usize) {
        let text = buffer.line(line).unwrap_or_default();
        let column = column_for_visual_x(text, self.desired_x, self.tab_width);
        self.position = Position::new(line, column);
    }

    /// Move one line up, keeping the sticky column. No-op on the first line.
    pub fn move_up(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        if self.position.line > 0 {
            self.move_vertically_to(buffer, self.position.line - 1);
        }
    }

    /// Move one line down, keeping the sticky column. No-op on the last line.
    pub fn move_down(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        if self.position.line + 1 < buffer.line_count() {
            self.move_vertically_to(buffer, self.position.line + 1);
        }
    }

    /// Move one character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        let Position { line, column } = self.position;
        if column > 0 {
            self.position.column -= 1;
        } else if line > 0 {
            self.position = Position::new(line - 1, buffer.line_len(line - 1));
        }
        self.update_desired(buffer);
    }

    /// Move one character right, wrapping to the start of the next line.
    pub fn move_right(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        let Position { line, column } = self.position;
        if column < buffer.line_len(line) {
            self.position.column += 1;
        } else if line + 1 < buffer.line_count() {
            self.position = Position::new(line + 1, 0);
        }
        self.update_desired(buffer);
    }

    /// Move to the start of the previous word (crossing to the previous line at column 0).
    pub fn move_word_left(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        if self.position.column == 0 {
            self.move_left(buffer);
            return;
        }
        let text = buffer.line(self.position.line).unwrap_or_default();
        self.position.column = word_start_before(text, self.position.column);
        self.update_desired(buffer);
    }

    /// Move past the next word and its trailing whitespace (crossing lines at end-of-line).
    pub fn move_word_right(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        if self.position.column >= buffer.line_len(self.position.line) {
            self.move_right(buffer);
            return;
        }
        let text = buffer.line(self.position.line).unwrap_or_default();
        self.position.column = word_end_after(text, self.position.column);
        self.update_desired(buffer);
    }

    /// Smart home: first non-blank column, or column 0 when already there.
    pub fn move_line_start(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        let text = buffer.line(self.position.line).unwrap_or_default();
        let first_non_blank = char_len(leading_whitespace(text));
        self.position.column = if self.position.column == first_non_blank {
            0
        } else {
            first_non_blank
        };
        self.update_desired(buffer);
    }

    /// Move to the end of the current line.
    pub fn move_line_end(&mut self, buffer: &Buffer) {
        self.clamp(buffer);
        self.position.column = buffer.line_len(self.position.line);
        self.update_desired(buffer);
    }

    /// Move to `(0, 0)`.
    pub fn move_document_start(&mut self, buffer: &Buffer) {
        self.set_position(buffer, 0, 0);
    }

    /// Move to the end of the last line.
    pub fn move_document_end(&mut self, buffer: &Buffer) {
        let end = buffer.end_position();
        self.set_position(buffer, end.line, end.column);
    }

    /// Anchor at the document start, cursor at the document end.
    pub fn select_all(&mut self, buffer: &Buffer) {
        self.anchor = Some(Position::new(0, 0));
        self.move_document_end(buffer);
    }

    /// Insert `ch` at the cursor and advance past it. `'\n'` performs a plain line break.
    pub fn insert(&mut self, buffer: &mut Buffer, ch: char) {
        if ch == '\n' {
            self.break_line(buffer);
            return;
        }
        self.clamp(buffer);
        self.position = buffer.insert_char(self.position.line, self.position.column, ch);
        self.update_desired(buffer);
    }

    /// Insert `text` at the cursor and move past it.
    pub fn insert_str(&mut self, buffer: &mut Buffer, text: &str) {
        self.clamp(buffer);
        self.position = buffer.insert(self.position.line, self.position.column, text);
        self.update_desired(buffer);
    }

    /// Delete the character before the cursor (joining lines at column 0).
    pub fn backspace(&mut self, buffer: &mut Buffer) {
        self.clamp(buffer);
        let Position { line, column } = self.position;
        let target = if column > 0 {
            Position::new(line, column - 1)
        } else if line > 0 {
            Position::new(line - 1, buffer.line_len(line - 1))
        } else {
            return;
        };
        if buffer.backspace(line, column) {
            self.position = target;
        }
        self.clamp(buffer);
        self.update_desired(buffer);
    }

    /// Delete the character after the cursor (joining the next line at end-of-line).
    pub fn delete(&mut self, buffer: &mut Buffer) {
        self.clamp(buffer);
        buffer.delete(self.position.line, self.position.column);
        self.clamp(buffer);
        self.update_desired(buffer);
    }

    /// Plain line break: split at the cursor and land at column 0 of the new line.
    pub fn break_line(&mut self, buffer: &mut Buffer) {
        self.clamp(buffer);
        buffer.break_line(self.position.line, self.position.column);
        self.position = Position::new(self.position.line + 1, 0);
        self.update_desired(buffer);
    }

    /// Smart newline.
    ///
    /// The current line's leading whitespace (up to the cursor) is the base indent. Between an
    /// empty bracket pair the pair is expanded onto three lines, the middle one indented one
    /// `indent_unit` deeper; otherwise the base indent is copied onto the new line.
    pub fn enter(&mut self, buffer: &mut Buffer, pairs: &PairConfig, indent_unit: &str) {
        self.clamp(buffer);
        let Position { line, column } = self.position;
        let text = buffer.line(line).unwrap_or_default();

        let base: String = leading_whitespace(text).chars().take(column).collect();
        let before = column.checked_sub(1).and_then(|c| text.chars().nth(c));
        let after = text.chars().nth(column);
        let expand = match (before, after) {
            (Some(open), Some(close)) => pairs
                .pairs
                .iter()
                .any(|p| !p.is_symmetric() && p.open == open && p.close == close),
            _ => false,
        };

        buffer.break_line(line, column);
        buffer.insert(line + 1, 0, &base);

        if expand {
            let inner = format!("{base}{indent_unit}");
            buffer.insert_line(line + 1, &inner);
            self.position = Position::new(line + 1, char_len(&inner));
        } else {
            self.position = Position::new(line + 1, char_len(&base));
        }
        self.update_desired(buffer);
    }
}
