//! Document Buffer
//!
//! Owns document content as an ordered sequence of mutable lines. The buffer knows nothing
//! about cursors or selections; it is pure data plus clamped editing primitives.
//!
//! # Invariants
//!
//! - The line collection is never empty. Operations that would remove the last remaining line
//!   clear its content instead.
//! - Lines never contain `'\n'` or `'\r'`.
//!
//! # Coordinates
//!
//! Positions are `(line, column)` pairs with columns counted in characters. Every operation
//! clamps its inputs into valid bounds instead of rejecting them: callers routinely compute
//! positions against a buffer state that may have shifted by the time the operation runs.
//!
//! # Example
//!
//! ```rust
//! use textedit_core::Buffer;
//!
//! let mut buffer = Buffer::from_text("abc\ndef");
//! buffer.backspace(1, 0);
//! assert_eq!(buffer.lines(), ["abcdef"]);
//! ```

use crate::line_ending::normalize_newlines;
use crate::memento::Memento;
use crate::search::{SearchError, SearchHit, SearchOptions, search_lines};
use crate::text::{byte_index, char_len};
use crate::Position;
use thiserror::Error;
use tracing::warn;

/// Errors produced when loading raw document bytes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The bytes are not valid UTF-8. The buffer was left untouched.
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Line-oriented document storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create an empty buffer (one empty line).
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Create a buffer from text, normalizing newlines.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.load_text(text);
        buffer
    }

    /// Total line count (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of line `index`, if it exists.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// All lines in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Length of line `index` in characters (0 for a line that does not exist).
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(|l| char_len(l)).unwrap_or(0)
    }

    /// Total character count, counting one character per newline between lines.
    pub fn char_count(&self) -> usize {
        let content: usize = self.lines.iter().map(|l| char_len(l)).sum();
        content + self.lines.len() - 1
    }

    /// Character at `pos`, or `None` at end-of-line / out of range.
    pub fn char_at(&self, pos: Position) -> Option<char> {
        self.lines.get(pos.line)?.chars().nth(pos.column)
    }

    /// The append point of the last line.
    pub fn end_position(&self) -> Position {
        let last = self.last_line();
        Position::new(last, self.line_len(last))
    }

    /// Clamp `pos` into valid buffer coordinates.
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        Position::new(line, pos.column.min(self.line_len(line)))
    }

    fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    /// Extend the collection with empty lines until `line` exists.
    /// Extend the document so `line` exists and return it. The extension is capped at
    /// `line_count()` new lines; a line further out is clamped to the last added one.
    fn ensure_line(&mut self, line: usize) -> usize {
        let line = line.min(self.lines.len().saturating_mul(2));
        while self.lines.len() <= line {
            self.lines.push(String::new());
        }
        line
    }

    /// Insert `text` at `(line, column)` and return the position just after it.
    ///
    /// The column is clamped to the line length. A `line` beyond the end extends the document
    /// with empty lines (at most `line_count()` of them). Newlines inside `text` split the line.
    pub fn insert(&mut self, line: usize, column: usize, text: &str) -> Position {
        let line = self.ensure_line(line);
        let text = normalize_newlines(text);
        let column = column.min(self.line_len(line));

        let current = &mut self.lines[line];
        let at = byte_index(current, column);
        let tail = current.split_off(at);

        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();
        current.push_str(first);

        let mut row = line;
        let mut end = Position::new(line, column + char_len(first));
        for segment in segments {
            row += 1;
            self.lines.insert(row, segment.to_string());
            end = Position::new(row, char_len(segment));
        }
        self.lines[row].push_str(&tail);
        end
    }

    /// Insert a single character at `(line, column)`; `'\n'` breaks the line.
    pub fn insert_char(&mut self, line: usize, column: usize, ch: char) -> Position {
        if ch == '\n' {
            let pos = self.clamp_after_extend(line, column);
            self.break_line(pos.line, pos.column);
            return Position::new(pos.line + 1, 0);
        }

        let line = self.ensure_line(line);
        let current = &mut self.lines[line];
        let column = column.min(char_len(current));
        let at = byte_index(current, column);
        current.insert(at, ch);
        Position::new(line, column + 1)
    }

    fn clamp_after_extend(&mut self, line: usize, column: usize) -> Position {
        let line = self.ensure_line(line);
        Position::new(line, column.min(self.line_len(line)))
    }

    /// Insert a whole new line at `index` (clamped to `[0, line_count]`).
    pub fn insert_line(&mut self, index: usize, text: &str) {
        let index = index.min(self.lines.len());
        let text = normalize_newlines(text);
        for (offset, segment) in text.split('\n').enumerate() {
            self.lines.insert(index + offset, segment.to_string());
        }
    }

    /// Remove line `index` (clamped) and return its content.
    ///
    /// Removing the sole remaining line clears it instead.
    pub fn remove_line(&mut self, index: usize) -> String {
        let index = index.min(self.last_line());
        if self.lines.len() == 1 {
            return std::mem::take(&mut self.lines[0]);
        }
        self.lines.remove(index)
    }

    /// Replace the content of line `index` (clamped).
    pub fn set_line(&mut self, index: usize, text: &str) {
        let index = index.min(self.last_line());
        let text = normalize_newlines(text);
        let mut segments = text.split('\n');
        self.lines[index] = segments.next().unwrap_or_default().to_string();
        for (offset, segment) in segments.enumerate() {
            self.lines.insert(index + 1 + offset, segment.to_string());
        }
    }

    /// Split line `line` at `column`; the tail becomes a new line at `line + 1`.
    pub fn break_line(&mut self, line: usize, column: usize) {
        let pos = self.clamp_position(Position::new(line, column));
        let current = &mut self.lines[pos.line];
        let at = byte_index(current, pos.column);
        let tail = current.split_off(at);
        self.lines.insert(pos.line + 1, tail);
    }

    /// Delete the character before `(line, column)`, joining with the previous line at column 0.
    ///
    /// Returns `false` (and changes nothing) at the start of the document.
    pub fn backspace(&mut self, line: usize, column: usize) -> bool {
        let pos = self.clamp_position(Position::new(line, column));
        if pos.column > 0 {
            let current = &mut self.lines[pos.line];
            let at = byte_index(current, pos.column - 1);
            current.remove(at);
            true
        } else if pos.line > 0 {
            let current = self.lines.remove(pos.line);
            self.lines[pos.line - 1].push_str(&current);
            true
        } else {
            false
        }
    }

    /// Delete the character at `(line, column)`, joining the next line at end-of-line.
    ///
    /// Returns `false` (and changes nothing) at the end of the document.
    pub fn delete(&mut self, line: usize, column: usize) -> bool {
        let pos = self.clamp_position(Position::new(line, column));
        if pos.column < self.line_len(pos.line) {
            let current = &mut self.lines[pos.line];
            let at = byte_index(current, pos.column);
            current.remove(at);
            true
        } else if pos.line < self.last_line() {
            let next = self.lines.remove(pos.line + 1);
            self.lines[pos.line].push_str(&next);
            true
        } else {
            false
        }
    }

    /// Remove the text between two positions and return it (joined with `'\n'`).
    ///
    /// Both endpoints are clamped; reversed endpoints are swapped.
    pub fn remove_range(
        &mut self,
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> String {
        let a = self.clamp_position(Position::new(start_line, start_column));
        let b = self.clamp_position(Position::new(end_line, end_column));
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        if start == end {
            return String::new();
        }

        if start.line == end.line {
            let current = &mut self.lines[start.line];
            let from = byte_index(current, start.column);
            let to = byte_index(current, end.column);
            return current.drain(from..to).collect();
        }

        let first = &mut self.lines[start.line];
        let cut = byte_index(first, start.column);
        let mut removed = first.split_off(cut);

        for enclosed in self.lines.drain(start.line + 1..end.line) {
            removed.push('\n');
            removed.push_str(&enclosed);
        }

        // The end line now sits right after the start line.
        let last = self.lines.remove(start.line + 1);
        let cut = byte_index(&last, end.column);
        removed.push('\n');
        removed.push_str(&last[..cut]);
        self.lines[start.line].push_str(&last[cut..]);

        removed
    }

    /// Full document text, lines joined by `'\n'`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole document. CR and CRLF are normalized to LF.
    pub fn load_text(&mut self, content: &str) {
        let content = normalize_newlines(content);
        self.lines = content.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    /// Validate `bytes` as UTF-8 and load them.
    ///
    /// On failure nothing is modified.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        self.load_text(decode_utf8(bytes)?);
        Ok(())
    }

    /// Up to `length` characters of the joined text starting at flat `offset`.
    pub fn text_in_range(&self, offset: usize, length: usize) -> String {
        let start = self.position_at_offset(offset);
        let end = self.position_at_offset(offset.saturating_add(length));
        self.text_between(start, end)
    }

    /// Text between two (clamped, ordered) positions.
    pub fn text_between(&self, start: Position, end: Position) -> String {
        let a = self.clamp_position(start);
        let b = self.clamp_position(end);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        if start.line == end.line {
            let line = &self.lines[start.line];
            return line[byte_index(line, start.column)..byte_index(line, end.column)].to_string();
        }

        let first = &self.lines[start.line];
        let mut out = first[byte_index(first, start.column)..].to_string();
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line);
        }
        let last = &self.lines[end.line];
        out.push('\n');
        out.push_str(&last[..byte_index(last, end.column)]);
        out
    }

    /// Flat character offset of `(line, column)` over the newline-joined text.
    pub fn flat_offset(&self, line: usize, column: usize) -> usize {
        let pos = self.clamp_position(Position::new(line, column));
        let before: usize = self.lines[..pos.line].iter().map(|l| char_len(l) + 1).sum();
        before + pos.column
    }

    /// Inverse of [`flat_offset`](Self::flat_offset); offsets past the end map to the end.
    pub fn position_at_offset(&self, offset: usize) -> Position {
        let mut remaining = offset;
        for (index, line) in self.lines.iter().enumerate() {
            let len = char_len(line);
            if remaining <= len {
                return Position::new(index, remaining);
            }
            remaining -= len + 1;
        }
        self.end_position()
    }

    /// Deep-copy the document together with a cursor position.
    pub fn take_snapshot(&self, line: usize, column: usize) -> Memento {
        Memento::capture(&self.lines, Position::new(line, column))
    }

    /// Replace the document wholesale with a snapshot, returning its (clamped) position.
    pub fn restore_snapshot(&mut self, memento: &Memento) -> Position {
        self.lines = memento.lines().to_vec();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.clamp_position(memento.position())
    }

    /// Case-insensitive substring search over all lines.
    pub fn search_all(&self, term: &str) -> Vec<SearchHit> {
        match search_lines(&self.lines, term, SearchOptions::plain()) {
            Ok(hits) => hits,
            Err(err) => {
                warn!(error = %err, "literal search failed");
                Vec::new()
            }
        }
    }

    /// Search with explicit options (case sensitivity, whole word, regex).
    pub fn search_with(
        &self,
        term: &str,
        options: SearchOptions,
    ) -> Result<Vec<SearchHit>, SearchError> {
        search_lines(&self.lines, term, options)
    }

    /// First case-insensitive match at or after `(from_line, from_column)`.
    ///
    /// Wraps around to the first match in the document; `None` if `term` never occurs.
    pub fn find_next(&self, term: &str, from_line: usize, from_column: usize) -> Option<SearchHit> {
        let from = Position::new(from_line, from_column);
        let hits = self.search_all(term);
        hits.iter()
            .find(|hit| hit.start() >= from)
            .or_else(|| hits.first())
            .copied()
    }
}

/// Validate document bytes as UTF-8.
pub(crate) fn decode_utf8(bytes: &[u8]) -> Result<&str, LoadError> {
    let text = std::str::from_utf8(bytes).inspect_err(|err| {
        warn!(error = %err, len = bytes.len(), "rejecting non-UTF-8 document");
    })?;
    Ok(text)
}
