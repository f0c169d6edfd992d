//! Cursor and view commands.
//!
//! These go through the same [`Command`] contract as edits but never enter the undo history
//! ([`Command::records_history`] is `false`). Their invert is a no-op except for
//! [`ZoomCommand`], which puts the previous zoom level back.

use crate::search::SearchHit;
use crate::{Command, EditorCore, Position};

/// A cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One character left, wrapping lines.
    Left,
    /// One character right, wrapping lines.
    Right,
    /// One line up (sticky column).
    Up,
    /// One line down (sticky column).
    Down,
    /// Start of the previous word.
    WordLeft,
    /// Past the next word.
    WordRight,
    /// Smart home.
    LineStart,
    /// End of line.
    LineEnd,
    /// `(0, 0)`.
    DocumentStart,
    /// End of the last line.
    DocumentEnd,
    /// An explicit position (clamped).
    To(Position),
}

/// Move the cursor, optionally extending the selection.
#[derive(Debug, Clone, Copy)]
pub struct MoveCursorCommand {
    motion: Motion,
    extend: bool,
}

impl MoveCursorCommand {
    /// Move without selecting (clears any selection).
    pub fn new(motion: Motion) -> Self {
        Self {
            motion,
            extend: false,
        }
    }

    /// Move while extending the selection from the current anchor.
    pub fn extending(motion: Motion) -> Self {
        Self {
            motion,
            extend: true,
        }
    }
}

impl Command for MoveCursorCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        if self.extend {
            core.cursor.start_selection();
        } else {
            core.cursor.clear_selection();
        }

        let buffer = &core.buffer;
        let cursor = &mut core.cursor;
        match self.motion {
            Motion::Left => cursor.move_left(buffer),
            Motion::Right => cursor.move_right(buffer),
            Motion::Up => cursor.move_up(buffer),
            Motion::Down => cursor.move_down(buffer),
            Motion::WordLeft => cursor.move_word_left(buffer),
            Motion::WordRight => cursor.move_word_right(buffer),
            Motion::LineStart => cursor.move_line_start(buffer),
            Motion::LineEnd => cursor.move_line_end(buffer),
            Motion::DocumentStart => cursor.move_document_start(buffer),
            Motion::DocumentEnd => cursor.move_document_end(buffer),
            Motion::To(pos) => cursor.set_position(buffer, pos.line, pos.column),
        }
    }

    fn invert(&mut self, _core: &mut EditorCore) {}

    fn name(&self) -> &'static str {
        "move-cursor"
    }

    fn records_history(&self) -> bool {
        false
    }
}

/// Select the whole document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAllCommand;

impl Command for SelectAllCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        core.cursor.select_all(&core.buffer);
    }

    fn invert(&mut self, _core: &mut EditorCore) {}

    fn name(&self) -> &'static str {
        "select-all"
    }

    fn records_history(&self) -> bool {
        false
    }
}

/// Find the next case-insensitive occurrence of a query and select it.
///
/// The search starts at the end of the current selection (or the cursor) and wraps around to
/// the top of the document.
#[derive(Debug, Clone)]
pub struct FindCommand {
    query: String,
    found: Option<SearchHit>,
}

impl FindCommand {
    /// Find `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            found: None,
        }
    }

    /// The match selected by the last apply, if any.
    pub fn found(&self) -> Option<SearchHit> {
        self.found
    }
}

impl Command for FindCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        let from = core
            .selection()
            .map(|sel| sel.end)
            .unwrap_or_else(|| core.cursor_position());
        self.found = core.buffer.find_next(&self.query, from.line, from.column);

        if let Some(hit) = self.found {
            let start = hit.start();
            let end = hit.end();
            core.cursor.clear_selection();
            core.cursor.set_position(&core.buffer, start.line, start.column);
            core.cursor.start_selection();
            core.cursor.set_position(&core.buffer, end.line, end.column);
        }
    }

    fn invert(&mut self, _core: &mut EditorCore) {}

    fn name(&self) -> &'static str {
        "find"
    }

    fn records_history(&self) -> bool {
        false
    }
}

/// Zoom change requested by a [`ZoomCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    /// One step larger.
    In,
    /// One step smaller.
    Out,
    /// Back to the configured default.
    Reset,
}

/// Change the view zoom level within the configured bounds.
#[derive(Debug, Clone, Copy)]
pub struct ZoomCommand {
    change: ZoomChange,
    previous: Option<u16>,
}

impl ZoomCommand {
    /// Create a zoom command.
    pub fn new(change: ZoomChange) -> Self {
        Self {
            change,
            previous: None,
        }
    }
}

impl Command for ZoomCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        let zoom = core.config.zoom;
        let current = core.view.zoom_percent;
        self.previous = Some(current);

        let step = i32::from(zoom.step_percent);
        core.view.zoom_percent = match self.change {
            ZoomChange::In => zoom.clamp(i32::from(current) + step),
            ZoomChange::Out => zoom.clamp(i32::from(current) - step),
            ZoomChange::Reset => zoom.default_percent,
        };
    }

    fn invert(&mut self, core: &mut EditorCore) {
        if let Some(previous) = self.previous {
            core.view.zoom_percent = previous;
        }
    }

    fn name(&self) -> &'static str {
        "zoom"
    }

    fn records_history(&self) -> bool {
        false
    }
}
