//! Command contract and snapshot-based edit commands.
//!
//! Every reversible edit implements [`Command`]: `apply` performs the forward mutation and
//! `invert` undoes it. Commands only ever touch the [`EditorCore`] they are handed, so a
//! command cannot reach the undo history while it runs.
//!
//! The commands in this module restore a before-snapshot on invert. Line-level commands with
//! minimal deltas live in [`crate::line_ops`]; cursor and view commands in
//! [`crate::navigation`]; the typing coalescer in [`crate::typing`].

use crate::text::word_start_before;
use crate::{EditorCore, Memento, Position};
use std::fmt;

/// A reversible operation on one document.
pub trait Command: fmt::Debug {
    /// Perform the forward mutation (first run or redo).
    fn apply(&mut self, core: &mut EditorCore);

    /// Undo the effect of the last [`apply`](Self::apply).
    fn invert(&mut self, core: &mut EditorCore);

    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Whether the executor should record this command in the undo history.
    ///
    /// Cursor-only and view-only commands return `false`.
    fn records_history(&self) -> bool {
        true
    }
}

/// Before-state of a snapshot-restore command: the document plus the cursor and anchor.
#[derive(Debug, Clone, Default)]
pub(crate) struct EditSnapshot {
    memento: Option<Memento>,
    anchor: Option<Position>,
}

impl EditSnapshot {
    pub(crate) fn capture(core: &EditorCore) -> Self {
        Self {
            memento: Some(core.snapshot()),
            anchor: core.cursor.anchor(),
        }
    }

    /// Capture on the first run. On a replay (redo) the buffer already equals the captured
    /// state, so only the cursor and anchor are put back before the forward logic re-runs.
    pub(crate) fn begin(&mut self, core: &mut EditorCore) {
        if self.memento.is_none() {
            *self = Self::capture(core);
            return;
        }
        if let Some(memento) = &self.memento {
            core.cursor
                .restore(&core.buffer, memento.position(), self.anchor);
        }
    }

    pub(crate) fn restore(&self, core: &mut EditorCore) {
        if let Some(memento) = &self.memento {
            let pos = core.buffer.restore_snapshot(memento);
            core.cursor.restore(&core.buffer, pos, self.anchor);
        }
    }
}

macro_rules! snapshot_invert {
    () => {
        fn invert(&mut self, core: &mut EditorCore) {
            self.before.restore(core);
        }
    };
}

/// Backspace: delete the selection, or the character before the cursor.
#[derive(Debug, Default)]
pub struct BackspaceCommand {
    before: EditSnapshot,
}

impl BackspaceCommand {
    /// Create the command; the before-snapshot is taken on first apply.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for BackspaceCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        if core.delete_selection().is_none() {
            core.cursor.backspace(&mut core.buffer);
        }
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "backspace"
    }
}

/// Forward delete: delete the selection, or the character after the cursor.
#[derive(Debug, Default)]
pub struct DeleteCommand {
    before: EditSnapshot,
}

impl DeleteCommand {
    /// Create the command; the before-snapshot is taken on first apply.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for DeleteCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        if core.delete_selection().is_none() {
            core.cursor.delete(&mut core.buffer);
        }
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "delete"
    }
}

/// Smart newline (see [`crate::Cursor::enter`]); replaces the selection if there is one.
#[derive(Debug, Default)]
pub struct NewlineCommand {
    before: EditSnapshot,
}

impl NewlineCommand {
    /// Create the command; the before-snapshot is taken on first apply.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for NewlineCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        core.delete_selection();
        let indent = core.config.indent_unit();
        core.cursor
            .enter(&mut core.buffer, &core.config.language.pairs, &indent);
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "newline"
    }
}

/// Delete the selected text (cut).
#[derive(Debug, Default)]
pub struct DeleteSelectionCommand {
    before: EditSnapshot,
    removed: Option<String>,
}

impl DeleteSelectionCommand {
    /// Create the command; the before-snapshot is taken on first apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text removed by the last apply.
    pub fn removed(&self) -> Option<&str> {
        self.removed.as_deref()
    }
}

impl Command for DeleteSelectionCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        self.removed = core.delete_selection();
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "delete-selection"
    }
}

/// Paste `text` at the cursor, replacing the selection.
///
/// The resulting state is cached the first time the command runs and redo restores that cached
/// state instead of inserting again.
#[derive(Debug)]
pub struct PasteCommand {
    text: String,
    before: EditSnapshot,
    after: Option<Memento>,
}

impl PasteCommand {
    /// Create a paste of `text` (newlines are normalized to LF).
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self {
            text: crate::line_ending::normalize_newlines(&text).into_owned(),
            before: EditSnapshot::default(),
            after: None,
        }
    }
}

impl Command for PasteCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        if let Some(after) = &self.after {
            core.restore(after);
            return;
        }

        self.before.begin(core);
        core.delete_selection();
        core.cursor.insert_str(&mut core.buffer, &self.text);
        self.after = Some(core.snapshot());
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "paste"
    }
}

/// Replace `length` characters at flat offset `start` with `text`.
///
/// This is how results from an external analysis/completion service are applied, so they stay
/// undoable like any other edit. The cursor ends up after the inserted text.
#[derive(Debug)]
pub struct ReplaceRangeCommand {
    start: usize,
    length: usize,
    text: String,
    before: EditSnapshot,
}

impl ReplaceRangeCommand {
    /// Create the command. Offsets follow [`crate::Buffer::flat_offset`].
    pub fn new(start: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            length,
            text: text.into(),
            before: EditSnapshot::default(),
        }
    }
}

impl Command for ReplaceRangeCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        let from = core.buffer.position_at_offset(self.start);
        let to = core
            .buffer
            .position_at_offset(self.start.saturating_add(self.length));
        core.buffer
            .remove_range(from.line, from.column, to.line, to.column);
        let end = core.buffer.insert(from.line, from.column, &self.text);
        core.cursor.clear_selection();
        core.cursor.set_position(&core.buffer, end.line, end.column);
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "replace-range"
    }
}

/// Indent or outdent the cursor line, or every line touched by the selection.
#[derive(Debug)]
pub struct IndentCommand {
    outdent: bool,
    before: EditSnapshot,
}

impl IndentCommand {
    /// Indent by one level.
    pub fn indent() -> Self {
        Self {
            outdent: false,
            before: EditSnapshot::default(),
        }
    }

    /// Outdent by one level.
    pub fn outdent() -> Self {
        Self {
            outdent: true,
            before: EditSnapshot::default(),
        }
    }

    /// Characters of leading indentation one outdent removes from `line`.
    fn outdent_width(line: &str, tab_width: usize) -> usize {
        if line.starts_with('\t') {
            return 1;
        }
        line.chars()
            .take(tab_width.max(1))
            .take_while(|ch| *ch == ' ')
            .count()
    }
}

impl Command for IndentCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        let (first, last) = core.affected_lines();
        let unit = core.config.indent_unit();
        let unit_len = unit.chars().count();

        // Column shift applied to each touched line, used to carry cursor and anchor along.
        let mut shifts: Vec<(usize, isize)> = Vec::with_capacity(last - first + 1);
        for line in first..=last {
            if self.outdent {
                let text = core.buffer.line(line).unwrap_or_default();
                let width = Self::outdent_width(text, core.config.tab_width);
                if width > 0 {
                    core.buffer.remove_range(line, 0, line, width);
                }
                shifts.push((line, -(width as isize)));
            } else {
                core.buffer.insert(line, 0, &unit);
                shifts.push((line, unit_len as isize));
            }
        }

        let shift = |pos: Position| -> Position {
            let delta = shifts
                .iter()
                .find(|(line, _)| *line == pos.line)
                .map(|(_, d)| *d)
                .unwrap_or(0);
            Position::new(pos.line, pos.column.saturating_add_signed(delta))
        };
        let position = shift(core.cursor.position());
        let anchor = core.cursor.anchor().map(shift);
        core.cursor.restore(&core.buffer, position, anchor);
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        if self.outdent { "outdent" } else { "indent" }
    }
}

/// Delete back to the start of the previous word in one undo step.
///
/// Runs primitive backspaces through the cursor, all covered by one before-snapshot. Word
/// boundaries separate whitespace, word characters and punctuation. At column 0 it joins with
/// the previous line like a single backspace.
#[derive(Debug, Default)]
pub struct DeleteWordLeftCommand {
    before: EditSnapshot,
}

impl DeleteWordLeftCommand {
    /// Create the command; the before-snapshot is taken on first apply.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for DeleteWordLeftCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        self.before.begin(core);
        if core.delete_selection().is_some() {
            return;
        }

        let Position { line, column } = core.cursor.position();
        if column == 0 {
            core.cursor.backspace(&mut core.buffer);
            return;
        }

        let text = core.buffer.line(line).unwrap_or_default();
        let target = word_start_before(text, column);
        for _ in target..column {
            core.cursor.backspace(&mut core.buffer);
        }
    }

    snapshot_invert!();

    fn name(&self) -> &'static str {
        "delete-word-left"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn core_at(text: &str, line: usize, column: usize) -> EditorCore {
        let mut core = EditorCore::new(text);
        core.cursor.set_position(&core.buffer, line, column);
        core
    }

    fn state(core: &EditorCore) -> (Vec<String>, Position) {
        (core.buffer.lines().to_vec(), core.cursor.position())
    }

    /// Checks `undo(apply(c, S)) == S` and `redo(undo(apply(c, S))) == apply(c, S)`.
    fn assert_reversible(core: &mut EditorCore, mut command: impl Command) {
        let initial = state(core);
        command.apply(core);
        let applied = state(core);
        command.invert(core);
        assert_eq!(state(core), initial);
        command.apply(core);
        assert_eq!(state(core), applied);
    }

    #[test]
    fn backspace_command_is_reversible() {
        let mut core = core_at("abc\ndef", 1, 0);
        assert_reversible(&mut core, BackspaceCommand::new());
        assert_eq!(core.buffer.lines(), ["abcdef"]);
        assert_eq!(core.cursor_position(), Position::new(0, 3));
    }

    #[test]
    fn redo_replays_at_original_cursor() {
        let mut core = core_at("abc", 0, 2);
        let mut cmd = DeleteCommand::new();
        cmd.apply(&mut core);
        cmd.invert(&mut core);
        core.cursor.set_position(&core.buffer, 0, 0);
        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["ab"]);
        assert_eq!(core.cursor_position(), Position::new(0, 2));
    }

    #[test]
    fn delete_selection_restores_selection_on_undo() {
        let mut core = core_at("hello world", 0, 0);
        core.cursor.start_selection();
        core.cursor.set_position(&core.buffer, 0, 6);

        let mut cmd = DeleteSelectionCommand::new();
        cmd.apply(&mut core);
        assert_eq!(cmd.removed(), Some("hello "));
        assert_eq!(core.buffer.lines(), ["world"]);
        assert!(!core.cursor.has_selection());

        cmd.invert(&mut core);
        assert_eq!(core.buffer.lines(), ["hello world"]);
        assert_eq!(core.selected_text().as_deref(), Some("hello "));

        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["world"]);
    }

    #[test]
    fn paste_redo_restores_cached_state() {
        let mut core = core_at("ab", 0, 1);
        assert_reversible(&mut core, PasteCommand::new("x\r\ny"));
        assert_eq!(core.buffer.lines(), ["ax", "yb"]);

        let mut core = core_at("ab", 0, 1);
        let mut cmd = PasteCommand::new("x\ny");
        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["ax", "yb"]);
        assert_eq!(core.cursor_position(), Position::new(1, 1));

        cmd.invert(&mut core);
        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["ax", "yb"]);
        assert_eq!(core.cursor_position(), Position::new(1, 1));
    }

    #[test]
    fn newline_command_expands_pair_and_undoes() {
        let mut core = core_at("if (x) {}", 0, 8);
        let mut cmd = NewlineCommand::new();
        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["if (x) {", "    ", "}"]);
        assert_eq!(core.cursor_position(), Position::new(1, 4));
        cmd.invert(&mut core);
        assert_eq!(core.buffer.lines(), ["if (x) {}"]);
        assert_eq!(core.cursor_position(), Position::new(0, 8));
    }

    #[test]
    fn replace_range_uses_flat_offsets() {
        let mut core = core_at("let foo = 1;\nfoo", 0, 0);
        let mut cmd = ReplaceRangeCommand::new(13, 3, "bar()");
        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["let foo = 1;", "bar()"]);
        assert_eq!(core.cursor_position(), Position::new(1, 5));
        assert_reversible(&mut core_at("abc", 0, 1), ReplaceRangeCommand::new(0, 2, "z\nz"));
    }

    #[test]
    fn indent_and_outdent_shift_cursor() {
        let mut core = core_at("a\n  b", 1, 3);
        let mut indent = IndentCommand::indent();
        indent.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["a", "      b"]);
        assert_eq!(core.cursor_position(), Position::new(1, 7));

        IndentCommand::outdent().apply(&mut core);
        IndentCommand::outdent().apply(&mut core);
        assert_eq!(core.buffer.lines(), ["a", "b"]);
        assert_eq!(core.cursor_position(), Position::new(1, 1));
    }

    #[test]
    fn indent_covers_selected_lines() {
        let mut core = core_at("a\nb\nc", 0, 0);
        core.cursor.start_selection();
        core.cursor.set_position(&core.buffer, 1, 1);
        assert_reversible(&mut core, IndentCommand::indent());
        assert_eq!(core.buffer.lines(), ["    a", "    b", "c"]);
        let sel = core.selection().expect("selection kept");
        assert_eq!(sel.start, Position::new(0, 4));
        assert_eq!(sel.end, Position::new(1, 5));
    }

    #[test]
    fn delete_word_left_is_one_step() {
        let mut core = core_at("call foo.bar", 0, 12);
        let mut cmd = DeleteWordLeftCommand::new();
        cmd.apply(&mut core);
        assert_eq!(core.buffer.lines(), ["call foo."]);
        cmd.invert(&mut core);
        assert_eq!(core.buffer.lines(), ["call foo.bar"]);
        assert_eq!(core.cursor_position(), Position::new(0, 12));

        let mut core = core_at("one  two", 0, 5);
        assert_reversible(&mut core, DeleteWordLeftCommand::new());
        assert_eq!(core.buffer.lines(), ["two"]);
        assert_eq!(core.cursor_position(), Position::new(0, 0));
    }

    #[test]
    fn delete_word_left_at_line_start_joins() {
        let mut core = core_at("ab\ncd", 1, 0);
        DeleteWordLeftCommand::new().apply(&mut core);
        assert_eq!(core.buffer.lines(), ["abcd"]);
        assert_eq!(core.cursor_position(), Position::new(0, 2));
    }
}
