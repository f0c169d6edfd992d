//! Immutable document snapshots used to roll back mutations.

use crate::Position;

/// A deep copy of every buffer line plus a cursor position, captured at one point in time.
///
/// The snapshot owns its line storage; later edits to the live [`crate::Buffer`] never reach
/// it. Create one with [`crate::Buffer::take_snapshot`] and roll back with
/// [`crate::Buffer::restore_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memento {
    lines: Vec<String>,
    position: Position,
}

impl Memento {
    pub(crate) fn capture(lines: &[String], position: Position) -> Self {
        Self {
            lines: lines.to_vec(),
            position,
        }
    }

    /// Captured line contents.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Captured cursor position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of captured lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
