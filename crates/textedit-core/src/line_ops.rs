//! Whole-line commands.
//!
//! These store only what they need to reverse themselves (a line index, the removed text)
//! instead of a snapshot of the whole document. Each command remembers the cursor position of
//! its first run and replays against the same line on redo. Undo puts the selection back.

use crate::{Command, EditorCore, Position};

/// Delete the cursor line.
///
/// Deleting the sole line of a document clears it instead; invert then writes the text back
/// into that line rather than inserting a second one.
#[derive(Debug, Default)]
pub struct DeleteLineCommand {
    origin: Option<Position>,
    anchor: Option<Position>,
    removed: String,
    sole: bool,
}

impl DeleteLineCommand {
    /// Create the command; the line is taken from the cursor on first apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the deleted line.
    pub fn removed(&self) -> &str {
        &self.removed
    }
}

impl Command for DeleteLineCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        if self.origin.is_none() {
            self.anchor = core.cursor.anchor();
        }
        let origin = *self.origin.get_or_insert(core.cursor.position());
        self.sole = core.buffer.line_count() == 1;
        self.removed = core.buffer.remove_line(origin.line);

        core.cursor.clear_selection();
        core.cursor
            .set_position(&core.buffer, origin.line, origin.column);
    }

    fn invert(&mut self, core: &mut EditorCore) {
        let Some(origin) = self.origin else {
            return;
        };
        if self.sole {
            core.buffer.set_line(0, &self.removed);
        } else {
            core.buffer.insert_line(origin.line, &self.removed);
        }
        core.cursor.restore(&core.buffer, origin, self.anchor);
    }

    fn name(&self) -> &'static str {
        "delete-line"
    }
}

/// Insert a copy of the cursor line below it and move the cursor onto the copy.
#[derive(Debug, Default)]
pub struct DuplicateLineCommand {
    origin: Option<Position>,
    anchor: Option<Position>,
}

impl DuplicateLineCommand {
    /// Create the command; the line is taken from the cursor on first apply.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for DuplicateLineCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        if self.origin.is_none() {
            self.anchor = core.cursor.anchor();
        }
        let origin = *self.origin.get_or_insert(core.cursor.position());
        let text = core.buffer.line(origin.line).unwrap_or_default().to_owned();
        core.buffer.insert_line(origin.line + 1, &text);

        core.cursor.clear_selection();
        core.cursor
            .set_position(&core.buffer, origin.line + 1, origin.column);
    }

    fn invert(&mut self, core: &mut EditorCore) {
        let Some(origin) = self.origin else {
            return;
        };
        core.buffer.remove_line(origin.line + 1);
        core.cursor.restore(&core.buffer, origin, self.anchor);
    }

    fn name(&self) -> &'static str {
        "duplicate-line"
    }
}

/// Direction of a [`MoveLineCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    /// Swap with the line above.
    Up,
    /// Swap with the line below.
    Down,
}

impl LineDirection {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Swap the cursor line with its neighbour; the cursor travels with the line.
///
/// Moving the first line up or the last line down does nothing. Invert applies the opposite
/// move from the line's new position.
#[derive(Debug)]
pub struct MoveLineCommand {
    direction: LineDirection,
    origin: Option<Position>,
    anchor: Option<Position>,
    moved: bool,
}

impl MoveLineCommand {
    /// Move in `direction`, starting from the cursor line on first apply.
    pub fn new(direction: LineDirection) -> Self {
        Self {
            direction,
            origin: None,
            anchor: None,
            moved: false,
        }
    }

    /// Move the cursor line up.
    pub fn up() -> Self {
        Self::new(LineDirection::Up)
    }

    /// Move the cursor line down.
    pub fn down() -> Self {
        Self::new(LineDirection::Down)
    }

    fn at(direction: LineDirection, origin: Position) -> Self {
        Self {
            direction,
            origin: Some(origin),
            anchor: None,
            moved: false,
        }
    }

    /// Whether the command can move `line` in `direction` within a document of `line_count`.
    pub fn can_move(direction: LineDirection, line: usize, line_count: usize) -> bool {
        match direction {
            LineDirection::Up => line > 0 && line < line_count,
            LineDirection::Down => line + 1 < line_count,
        }
    }

    fn target(&self, line: usize) -> usize {
        match self.direction {
            LineDirection::Up => line - 1,
            LineDirection::Down => line + 1,
        }
    }
}

impl Command for MoveLineCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        if self.origin.is_none() {
            self.anchor = core.cursor.anchor();
        }
        let origin = *self.origin.get_or_insert(core.cursor.position());
        self.moved = Self::can_move(self.direction, origin.line, core.buffer.line_count());
        if !self.moved {
            return;
        }

        let target = self.target(origin.line);
        let text = core.buffer.remove_line(origin.line);
        core.buffer.insert_line(target, &text);

        core.cursor.clear_selection();
        core.cursor
            .set_position(&core.buffer, target, origin.column);
    }

    fn invert(&mut self, core: &mut EditorCore) {
        let Some(origin) = self.origin.filter(|_| self.moved) else {
            return;
        };
        let target = self.target(origin.line);
        let mut opposite =
            Self::at(self.direction.opposite(), Position::new(target, origin.column));
        opposite.apply(core);
        core.cursor.restore(&core.buffer, origin, self.anchor);
    }

    fn name(&self) -> &'static str {
        match self.direction {
            LineDirection::Up => "move-line-up",
            LineDirection::Down => "move-line-down",
        }
    }
}
