//! Per-document editing state.

use crate::{Buffer, Cursor, EditorConfig, Memento, Position, Selection};

/// View-level scalar state that commands may change (and must be able to restore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Zoom level in percent.
    pub zoom_percent: u16,
}

/// Editor Core state
///
/// `EditorCore` aggregates everything one open document owns:
///
/// - **Buffer**: the document lines
/// - **Cursor**: insertion point and selection anchor
/// - **ViewState**: zoom level
/// - **EditorConfig**: indentation, pairing and zoom settings
///
/// Commands receive `&mut EditorCore`, so their side effects stay inside one document.
///
/// # Example
///
/// ```rust
/// use textedit_core::EditorCore;
///
/// let core = EditorCore::new("Hello\nWorld");
/// assert_eq!(core.line_count(), 2);
/// assert_eq!(core.text(), "Hello\nWorld");
/// ```
#[derive(Debug, Clone)]
pub struct EditorCore {
    /// Document content
    pub buffer: Buffer,
    /// Cursor and selection
    pub cursor: Cursor,
    /// View state
    pub view: ViewState,
    /// Editing configuration
    pub config: EditorConfig,
}

impl EditorCore {
    /// Create a core over `text` with the default configuration.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, EditorConfig::default())
    }

    /// Create a core over `text` with an explicit configuration.
    pub fn with_config(text: &str, config: EditorConfig) -> Self {
        let buffer = Buffer::from_text(text);
        let mut cursor = Cursor::new();
        cursor.set_tab_width(&buffer, config.tab_width);
        Self {
            buffer,
            cursor,
            view: ViewState {
                zoom_percent: config.zoom.default_percent,
            },
            config,
        }
    }

    /// Document text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Line count.
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Cursor position.
    pub fn cursor_position(&self) -> Position {
        self.cursor.position()
    }

    /// Normalized selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.cursor.selection()
    }

    /// Snapshot of the buffer at the current cursor position.
    pub fn snapshot(&self) -> Memento {
        let pos = self.cursor.position();
        self.buffer.take_snapshot(pos.line, pos.column)
    }

    /// Restore a snapshot: lines replaced wholesale, cursor moved to the captured position,
    /// selection cleared.
    pub fn restore(&mut self, memento: &Memento) {
        let pos = self.buffer.restore_snapshot(memento);
        self.cursor.restore(&self.buffer, pos, None);
    }

    /// Remove the selected text, leaving the cursor at the selection start.
    ///
    /// Returns the removed text, or `None` when there was nothing selected.
    pub fn delete_selection(&mut self) -> Option<String> {
        let selection = self.cursor.selection()?;
        self.cursor.clear_selection();
        if selection.is_empty() {
            return None;
        }

        let removed = self.buffer.remove_range(
            selection.start.line,
            selection.start.column,
            selection.end.line,
            selection.end.column,
        );
        self.cursor
            .set_position(&self.buffer, selection.start.line, selection.start.column);
        Some(removed)
    }

    /// Text currently selected, if any.
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.cursor.selection().filter(|s| !s.is_empty())?;
        Some(self.buffer.text_between(selection.start, selection.end))
    }

    /// Lines touched by the selection, or the cursor line (inclusive range).
    pub(crate) fn affected_lines(&self) -> (usize, usize) {
        match self.cursor.selection() {
            Some(sel) if !sel.is_empty() => {
                // A selection ending at column 0 does not include that line.
                let end = if sel.end.column == 0 && sel.end.line > sel.start.line {
                    sel.end.line - 1
                } else {
                    sel.end.line
                };
                (sel.start.line, end)
            }
            _ => (self.cursor.line(), self.cursor.line()),
        }
    }
}
