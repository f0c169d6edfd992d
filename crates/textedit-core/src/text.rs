//! Character-level helpers shared by the buffer, cursor and commands.
//!
//! All columns in `textedit-core` are counted in Unicode scalar values (`char`s), while Rust
//! strings are indexed by bytes. These helpers perform the conversion (always clamping) and
//! provide the visual-width and word-class measurements used for cursor movement.

use unicode_width::UnicodeWidthChar;

/// Number of characters in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of character column `column` in `s`, clamped to `s.len()`.
pub(crate) fn byte_index(s: &str, column: usize) -> usize {
    s.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// The leading run of spaces and tabs of `line`.
pub(crate) fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, ch)| *ch != ' ' && *ch != '\t')
        .map(|(byte, _)| byte)
        .unwrap_or(line.len());
    &line[..end]
}

/// Calculate visual width (in cells) for a character, following UAX #11.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Calculate visual width (in cells) for a character at a specific cell offset within the line.
///
/// `'\t'` advances to the next tab stop based on `tab_width`.
pub fn cell_width_at(ch: char, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset_in_line % tab_width
    } else {
        char_width(ch)
    }
}

/// Calculate the visual cell offset from the start of the line to the given character column.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for ch in line.chars().take(column) {
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    x
}

/// Inverse of [`visual_x_for_column`]: the first column whose cell offset reaches `target_x`.
///
/// Returns the line length when `target_x` lies past the end of the line.
pub fn column_for_visual_x(line: &str, target_x: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for (column, ch) in line.chars().enumerate() {
        if x >= target_x {
            return column;
        }
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    char_len(line)
}

/// Coarse character classes used for word-wise movement and deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Spaces, tabs and other Unicode whitespace.
    Whitespace,
    /// Letters, digits and `_`.
    Word,
    /// Everything else.
    Punctuation,
}

/// Classify `ch` for word boundaries.
pub fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch == '_' || ch.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Column of the start of the word that ends at (or before) `column`.
///
/// Skips whitespace to the left, then the run of same-class characters. Returns `column`
/// unchanged only when `column == 0`.
pub(crate) fn word_start_before(line: &str, column: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut i = column.min(chars.len());

    while i > 0 && char_class(chars[i - 1]) == CharClass::Whitespace {
        i -= 1;
    }
    if i > 0 {
        let class = char_class(chars[i - 1]);
        while i > 0 && char_class(chars[i - 1]) == class {
            i -= 1;
        }
    }
    i
}

/// Column just past the word that starts at (or after) `column`, including trailing whitespace.
pub(crate) fn word_end_after(line: &str, column: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut i = column.min(chars.len());

    if i < chars.len() {
        let class = char_class(chars[i]);
        if class != CharClass::Whitespace {
            while i < chars.len() && char_class(chars[i]) == class {
                i += 1;
            }
        }
    }
    while i < chars.len() && char_class(chars[i]) == CharClass::Whitespace {
        i += 1;
    }
    i
}
