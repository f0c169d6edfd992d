//! Command executor.
//!
//! [`CommandExecutor`] is the single entry point hosts drive: it owns one document's
//! [`EditorCore`], its [`UndoManager`] and the open typing run, turns [`Action`] requests into
//! commands, and decides what enters the undo history.
//!
//! # Typing runs
//!
//! Printable characters are coalesced: the first character of a run opens a [`TypingCommand`],
//! later ones go straight through the cursor, and the run is recorded as one undo step when a
//! whitespace or punctuation character is typed (that character belongs to the run), when any
//! other action executes, or when focus is lost.
//!
//! # Example
//!
//! ```rust
//! use textedit_core::{Action, CommandExecutor, EditAction};
//!
//! let mut executor = CommandExecutor::empty();
//! for ch in "ab ".chars() {
//!     executor.type_char(ch);
//! }
//! assert_eq!(executor.text(), "ab ");
//!
//! executor.execute(Action::Edit(EditAction::Undo));
//! assert_eq!(executor.text(), "");
//! ```

use crate::blocks::{BlockRange, find_blocks};
use crate::buffer::decode_utf8;
use crate::command::{
    BackspaceCommand, DeleteCommand, DeleteSelectionCommand, DeleteWordLeftCommand,
    IndentCommand, NewlineCommand, PasteCommand, ReplaceRangeCommand,
};
use crate::line_ops::{DeleteLineCommand, DuplicateLineCommand, LineDirection, MoveLineCommand};
use crate::navigation::{
    FindCommand, Motion, MoveCursorCommand, SelectAllCommand, ZoomChange, ZoomCommand,
};
use crate::search::SearchHit;
use crate::typing::{TypingCommand, is_run_terminator};
use crate::{
    Command, EditorConfig, EditorCore, LineEnding, LoadError, Position, TabKeyBehavior,
    UndoManager,
};
use textedit_lang::LanguageConfig;
use tracing::{debug, trace, warn};

/// Text editing actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Type one character (coalesced into the open typing run).
    Type(char),
    /// Insert one indentation step at the cursor (tab or spaces to the next tab stop).
    InsertTab,
    /// Paste text at the cursor, replacing the selection.
    Paste(String),
    /// Delete the selection or the character before the cursor.
    Backspace,
    /// Delete the selection or the character after the cursor.
    DeleteForward,
    /// Smart newline.
    Newline,
    /// Delete the selection, returning its text (cut).
    DeleteSelection,
    /// Delete back to the start of the previous word.
    DeleteWordLeft,
    /// Delete the cursor line.
    DeleteLine,
    /// Duplicate the cursor line.
    DuplicateLine,
    /// Swap the cursor line with the line above.
    MoveLineUp,
    /// Swap the cursor line with the line below.
    MoveLineDown,
    /// Indent the cursor line or the selected lines.
    Indent,
    /// Outdent the cursor line or the selected lines.
    Outdent,
    /// Replace `length` characters at flat offset `start` with `text`.
    Replace {
        /// Flat character offset.
        start: usize,
        /// Characters to remove.
        length: usize,
        /// Replacement text.
        text: String,
    },
    /// Undo.
    Undo,
    /// Redo.
    Redo,
    /// Close the open typing run.
    EndUndoGroup,
}

/// Cursor and selection actions. None of them touch the undo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorAction {
    /// Apply a motion, optionally extending the selection.
    Move {
        /// Motion to apply.
        motion: Motion,
        /// Extend the selection instead of clearing it.
        extend: bool,
    },
    /// Select the whole document.
    SelectAll,
    /// Drop the selection.
    ClearSelection,
    /// Select the next case-insensitive occurrence of `query`, wrapping around.
    FindNext {
        /// Search term.
        query: String,
    },
}

/// View and configuration actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Zoom in one step.
    ZoomIn,
    /// Zoom out one step.
    ZoomOut,
    /// Back to the default zoom.
    ZoomReset,
    /// Set the tab width (clamped to at least 1).
    SetTabWidth(usize),
    /// Choose what one indentation level inserts.
    SetTabKeyBehavior(TabKeyBehavior),
    /// Enable or disable auto-pairing.
    SetAutoPair(bool),
    /// Swap the language configuration (pair table and block syntax).
    SetLanguage(LanguageConfig),
}

/// A request to the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Text editing.
    Edit(EditAction),
    /// Cursor and selection.
    Cursor(CursorAction),
    /// View and configuration.
    View(ViewAction),
}

/// Outcome of [`CommandExecutor::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The action ran.
    Success,
    /// The action had nothing to do; state is unchanged and nothing was recorded.
    NoOp,
    /// The action ran and produced text (the removed text of a cut).
    Text(String),
    /// A search matched and the match is now selected.
    SearchMatch(SearchHit),
    /// A search found nothing.
    SearchNotFound,
}

/// Document summary for status bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Line count
    pub line_count: usize,
    /// Character count (newlines count as one)
    pub char_count: usize,
    /// UTF-8 byte count of the text with LF newlines
    pub byte_count: usize,
    /// Whether the document differs from the last save
    pub is_modified: bool,
    /// Document version (incremented on every mutation)
    pub version: u64,
    /// Line ending used on save
    pub line_ending: LineEnding,
}

/// Undo/redo availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRedoState {
    /// Can undo
    pub can_undo: bool,
    /// Can redo
    pub can_redo: bool,
    /// Undo stack depth, including an open typing run
    pub undo_depth: usize,
    /// Redo stack depth
    pub redo_depth: usize,
    /// Whether a typing run is open (it becomes an undo step when closed)
    pub typing_open: bool,
}

/// Input for background analysis: an owned copy of the document at one version.
///
/// Results computed from it are applied through [`CommandExecutor::apply_analysis_edit`],
/// which drops them if the document changed in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Full text with LF newlines.
    pub text: String,
    /// Flat character offset of the cursor.
    pub offset: usize,
    /// Document version the request was built from.
    pub version: u64,
}

/// Command executor for one document.
#[derive(Debug)]
pub struct CommandExecutor {
    core: EditorCore,
    undo: UndoManager,
    typing: Option<TypingCommand>,
    version: u64,
    line_ending: LineEnding,
}

impl CommandExecutor {
    /// Create an executor over `text` with the default configuration.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, EditorConfig::default())
    }

    /// Create an executor over `text` with an explicit configuration.
    pub fn with_config(text: &str, config: EditorConfig) -> Self {
        Self {
            core: EditorCore::with_config(text, config),
            undo: UndoManager::new(),
            typing: None,
            version: 0,
            line_ending: LineEnding::detect_in_text(text),
        }
    }

    /// Create an executor over an empty document.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Execute an action.
    ///
    /// Every action except typing closes the open typing run first.
    pub fn execute(&mut self, action: Action) -> ActionResult {
        if !matches!(
            action,
            Action::Edit(EditAction::Type(_) | EditAction::InsertTab)
        ) {
            self.flush_typing();
        }

        match action {
            Action::Edit(edit) => self.execute_edit(edit),
            Action::Cursor(cursor) => self.execute_cursor(cursor),
            Action::View(view) => self.execute_view(view),
        }
    }

    /// Type one character. `'\n'` runs the smart newline; other control characters except
    /// `'\t'` are ignored.
    pub fn type_char(&mut self, ch: char) -> ActionResult {
        if ch == '\n' {
            return self.execute(Action::Edit(EditAction::Newline));
        }
        if ch.is_control() && ch != '\t' {
            return ActionResult::NoOp;
        }

        self.type_into_run(&ch.to_string());
        if is_run_terminator(ch) {
            self.flush_typing();
        }
        ActionResult::Success
    }

    fn type_into_run(&mut self, text: &str) {
        let mut run = self
            .typing
            .take()
            .unwrap_or_else(|| TypingCommand::begin(&self.core));
        run.type_str(&mut self.core, text);
        self.typing = Some(run);
        self.touch();
    }

    /// Paste `text` as one undo step.
    pub fn paste(&mut self, text: &str) -> ActionResult {
        self.execute(Action::Edit(EditAction::Paste(text.to_string())))
    }

    /// Close the open typing run and record it. Does nothing if no run is open.
    pub fn flush_typing(&mut self) {
        if let Some(mut run) = self.typing.take() {
            run.finish(&self.core);
            trace!(typed = run.typed(), "typing run finished");
            self.undo.record(Box::new(run));
        }
    }

    /// The host's editing surface lost focus.
    pub fn focus_lost(&mut self) {
        self.flush_typing();
    }

    /// Undo the last step. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.execute(Action::Edit(EditAction::Undo)) == ActionResult::Success
    }

    /// Redo the last undone step. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.execute(Action::Edit(EditAction::Redo)) == ActionResult::Success
    }

    /// Replace the document with `text`, detecting its line ending.
    ///
    /// History is cleared, the cursor returns to `(0, 0)` and the new state is clean.
    pub fn load_text(&mut self, text: &str) {
        self.typing = None;
        self.line_ending = LineEnding::detect_in_text(text);
        self.core.buffer.load_text(text);
        self.core.cursor.clear_selection();
        self.core.cursor.set_position(&self.core.buffer, 0, 0);
        self.undo.clear();
        self.touch();
        debug!(
            lines = self.core.line_count(),
            line_ending = ?self.line_ending,
            version = self.version,
            "document loaded"
        );
    }

    /// Replace the document with UTF-8 `bytes`.
    ///
    /// On invalid UTF-8 the current document is left untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        self.load_text(decode_utf8(bytes)?);
        Ok(())
    }

    /// Document text with LF newlines.
    pub fn text(&self) -> String {
        self.core.text()
    }

    /// Document text with the detected line ending re-applied, for writing to disk.
    pub fn text_for_save(&self) -> String {
        self.line_ending.apply_to_text(&self.core.text())
    }

    /// Line ending used by [`text_for_save`](Self::text_for_save).
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Override the line ending used on save.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Record that the current state was saved.
    pub fn mark_clean(&mut self) {
        self.flush_typing();
        self.undo.mark_clean();
    }

    /// Returns `true` if the document differs from the last save.
    pub fn is_modified(&self) -> bool {
        self.typing.is_some() || !self.undo.is_clean()
    }

    /// Current document version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Read-only access to the editing state (for rendering).
    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    /// Read-only access to the undo history.
    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    /// Document summary.
    pub fn document_state(&self) -> DocumentState {
        let text = self.core.text();
        DocumentState {
            line_count: self.core.line_count(),
            char_count: self.core.buffer.char_count(),
            byte_count: text.len(),
            is_modified: self.is_modified(),
            version: self.version,
            line_ending: self.line_ending,
        }
    }

    /// Undo/redo availability. An open typing run counts as one undo step and hides the redo
    /// stack it will discard.
    pub fn undo_redo_state(&self) -> UndoRedoState {
        let typing_open = self.typing.is_some();
        let redo_depth = if typing_open {
            0
        } else {
            self.undo.undone_count()
        };
        UndoRedoState {
            can_undo: typing_open || self.undo.can_undo(),
            can_redo: redo_depth > 0,
            undo_depth: self.undo.done_count() + usize::from(typing_open),
            redo_depth,
            typing_open,
        }
    }

    /// Structural blocks of the current document.
    pub fn blocks(&self) -> Vec<BlockRange> {
        find_blocks(&self.core.buffer, &self.core.config.language.blocks)
    }

    /// Snapshot the document for background analysis.
    pub fn analysis_request(&self) -> AnalysisRequest {
        let pos = self.core.cursor_position();
        AnalysisRequest {
            text: self.core.text(),
            offset: self.core.buffer.flat_offset(pos.line, pos.column),
            version: self.version,
        }
    }

    /// Apply an analysis result computed against `version` as an undoable replacement.
    ///
    /// Returns `false` (and changes nothing) if the document moved on since `version`.
    pub fn apply_analysis_edit(
        &mut self,
        version: u64,
        start: usize,
        length: usize,
        text: &str,
    ) -> bool {
        if version != self.version {
            warn!(
                result_version = version,
                current_version = self.version,
                "discarding stale analysis result"
            );
            return false;
        }
        let result = self.execute(Action::Edit(EditAction::Replace {
            start,
            length,
            text: text.to_string(),
        }));
        result == ActionResult::Success
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Apply `command`, recording it when it belongs in the history.
    fn run(&mut self, mut command: Box<dyn Command>) -> ActionResult {
        if command.records_history() {
            self.undo.apply(command, &mut self.core);
            self.touch();
        } else {
            command.apply(&mut self.core);
        }
        ActionResult::Success
    }

    fn at_document_start(&self) -> bool {
        self.core.cursor_position() == Position::new(0, 0)
    }

    fn at_document_end(&self) -> bool {
        self.core.cursor_position() == self.core.buffer.end_position()
    }

    fn can_outdent(&self) -> bool {
        let (first, last) = self.core.affected_lines();
        (first..=last).any(|line| {
            self.core
                .buffer
                .line(line)
                .is_some_and(|text| text.starts_with([' ', '\t']))
        })
    }

    fn execute_edit(&mut self, edit: EditAction) -> ActionResult {
        let has_selection = self.core.cursor.has_nonempty_selection();

        match edit {
            EditAction::Type(ch) => self.type_char(ch),
            EditAction::InsertTab => {
                let text = self.tab_text();
                self.type_into_run(&text);
                self.flush_typing();
                ActionResult::Success
            }
            EditAction::Paste(text) => {
                if text.is_empty() && !has_selection {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(PasteCommand::new(text)))
            }
            EditAction::Backspace => {
                if !has_selection && self.at_document_start() {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(BackspaceCommand::new()))
            }
            EditAction::DeleteForward => {
                if !has_selection && self.at_document_end() {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(DeleteCommand::new()))
            }
            EditAction::Newline => self.run(Box::new(NewlineCommand::new())),
            EditAction::DeleteSelection => {
                if !has_selection {
                    return ActionResult::NoOp;
                }
                let mut command = DeleteSelectionCommand::new();
                command.apply(&mut self.core);
                let removed = command.removed().unwrap_or_default().to_string();
                self.undo.record(Box::new(command));
                self.touch();
                ActionResult::Text(removed)
            }
            EditAction::DeleteWordLeft => {
                if !has_selection && self.at_document_start() {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(DeleteWordLeftCommand::new()))
            }
            EditAction::DeleteLine => {
                if self.core.line_count() == 1 && self.core.buffer.line_len(0) == 0 {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(DeleteLineCommand::new()))
            }
            EditAction::DuplicateLine => self.run(Box::new(DuplicateLineCommand::new())),
            EditAction::MoveLineUp => self.move_line(LineDirection::Up),
            EditAction::MoveLineDown => self.move_line(LineDirection::Down),
            EditAction::Indent => self.run(Box::new(IndentCommand::indent())),
            EditAction::Outdent => {
                if !self.can_outdent() {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(IndentCommand::outdent()))
            }
            EditAction::Replace {
                start,
                length,
                text,
            } => {
                if length == 0 && text.is_empty() {
                    return ActionResult::NoOp;
                }
                self.run(Box::new(ReplaceRangeCommand::new(start, length, text)))
            }
            EditAction::Undo => {
                if !self.undo.undo(&mut self.core) {
                    return ActionResult::NoOp;
                }
                self.touch();
                ActionResult::Success
            }
            EditAction::Redo => {
                if !self.undo.redo(&mut self.core) {
                    return ActionResult::NoOp;
                }
                self.touch();
                ActionResult::Success
            }
            EditAction::EndUndoGroup => {
                self.flush_typing();
                ActionResult::Success
            }
        }
    }

    fn move_line(&mut self, direction: LineDirection) -> ActionResult {
        let line = self.core.cursor.line();
        if !MoveLineCommand::can_move(direction, line, self.core.line_count()) {
            return ActionResult::NoOp;
        }
        self.run(Box::new(MoveLineCommand::new(direction)))
    }

    fn tab_text(&self) -> String {
        let config = &self.core.config;
        let x = self.core.cursor.visual_x(&self.core.buffer);
        config.tab_text_at(x)
    }

    fn execute_cursor(&mut self, cursor: CursorAction) -> ActionResult {
        match cursor {
            CursorAction::Move { motion, extend } => {
                let command = if extend {
                    MoveCursorCommand::extending(motion)
                } else {
                    MoveCursorCommand::new(motion)
                };
                self.run(Box::new(command))
            }
            CursorAction::SelectAll => self.run(Box::new(SelectAllCommand)),
            CursorAction::ClearSelection => {
                self.core.cursor.clear_selection();
                ActionResult::Success
            }
            CursorAction::FindNext { query } => {
                let mut command = FindCommand::new(query);
                command.apply(&mut self.core);
                match command.found() {
                    Some(hit) => ActionResult::SearchMatch(hit),
                    None => ActionResult::SearchNotFound,
                }
            }
        }
    }

    fn execute_view(&mut self, view: ViewAction) -> ActionResult {
        match view {
            ViewAction::ZoomIn => self.run(Box::new(ZoomCommand::new(ZoomChange::In))),
            ViewAction::ZoomOut => self.run(Box::new(ZoomCommand::new(ZoomChange::Out))),
            ViewAction::ZoomReset => self.run(Box::new(ZoomCommand::new(ZoomChange::Reset))),
            ViewAction::SetTabWidth(width) => {
                let width = width.max(1);
                self.core.config.tab_width = width;
                self.core.cursor.set_tab_width(&self.core.buffer, width);
                ActionResult::Success
            }
            ViewAction::SetTabKeyBehavior(behavior) => {
                self.core.config.tab_key_behavior = behavior;
                ActionResult::Success
            }
            ViewAction::SetAutoPair(enabled) => {
                self.core.config.auto_pair = enabled;
                ActionResult::Success
            }
            ViewAction::SetLanguage(language) => {
                self.core.config.language = language;
                ActionResult::Success
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn move_to(executor: &mut CommandExecutor, line: usize, column: usize) {
        executor.execute(Action::Cursor(CursorAction::Move {
            motion: Motion::To(Position::new(line, column)),
            extend: false,
        }));
    }

    #[test]
    fn word_characters_stay_in_one_run() {
        let mut executor = CommandExecutor::empty();
        executor.type_char('a');
        executor.type_char('b');
        assert!(executor.undo_redo_state().typing_open);
        assert_eq!(executor.undo_manager().done_count(), 0);

        executor.type_char('.');
        assert!(!executor.undo_redo_state().typing_open);
        assert_eq!(executor.undo_manager().done_count(), 1);
    }

    #[test]
    fn open_run_hides_redo_stack() {
        let mut executor = CommandExecutor::empty();
        executor.paste("abc");
        assert!(executor.undo());
        assert_eq!(executor.undo_redo_state().redo_depth, 1);

        executor.type_char('x');
        let state = executor.undo_redo_state();
        assert!(state.typing_open);
        assert!(state.can_undo);
        assert!(!state.can_redo);
        assert_eq!(state.undo_depth, 1);
        assert_eq!(state.redo_depth, 0);

        executor.flush_typing();
        let state = executor.undo_redo_state();
        assert_eq!((state.undo_depth, state.redo_depth), (1, 0));
        assert!(!executor.redo());
    }

    #[test]
    fn navigation_closes_run() {
        let mut executor = CommandExecutor::empty();
        executor.type_char('a');
        move_to(&mut executor, 0, 0);
        executor.type_char('b');
        executor.flush_typing();
        assert_eq!(executor.text(), "ba");
        assert_eq!(executor.undo_manager().done_count(), 2);
    }

    #[test]
    fn noop_edits_are_not_recorded() {
        let mut executor = CommandExecutor::new("ab");
        let version = executor.version();
        assert_eq!(
            executor.execute(Action::Edit(EditAction::Backspace)),
            ActionResult::NoOp
        );
        assert_eq!(
            executor.execute(Action::Edit(EditAction::MoveLineUp)),
            ActionResult::NoOp
        );
        assert_eq!(
            executor.execute(Action::Edit(EditAction::Outdent)),
            ActionResult::NoOp
        );
        move_to(&mut executor, 0, 2);
        assert_eq!(
            executor.execute(Action::Edit(EditAction::DeleteForward)),
            ActionResult::NoOp
        );
        assert!(!executor.undo_redo_state().can_undo);
        assert_eq!(executor.version(), version);
    }

    #[test]
    fn cursor_actions_are_not_recorded() {
        let mut executor = CommandExecutor::new("one two");
        executor.execute(Action::Cursor(CursorAction::SelectAll));
        executor.execute(Action::View(ViewAction::ZoomIn));
        assert_eq!(executor.core().view.zoom_percent, 110);
        assert_eq!(executor.undo_manager().done_count(), 0);
        assert!(!executor.undo());
    }

    #[test]
    fn cut_returns_removed_text() {
        let mut executor = CommandExecutor::new("hello world");
        executor.execute(Action::Cursor(CursorAction::Move {
            motion: Motion::WordRight,
            extend: true,
        }));
        assert_eq!(
            executor.execute(Action::Edit(EditAction::DeleteSelection)),
            ActionResult::Text("hello ".to_string())
        );
        assert_eq!(executor.text(), "world");
        assert!(executor.undo());
        assert_eq!(executor.text(), "hello world");
    }

    #[test]
    fn insert_tab_pads_to_tab_stop() {
        let mut executor = CommandExecutor::new("ab");
        move_to(&mut executor, 0, 1);
        executor.execute(Action::Edit(EditAction::InsertTab));
        assert_eq!(executor.text(), "a   b");

        executor.execute(Action::View(ViewAction::SetTabKeyBehavior(TabKeyBehavior::Tab)));
        executor.execute(Action::Edit(EditAction::InsertTab));
        assert_eq!(executor.text(), "a   \tb");
    }

    #[test]
    fn modified_flag_follows_clean_point() {
        let mut executor = CommandExecutor::new("x");
        assert!(!executor.is_modified());
        executor.type_char('a');
        assert!(executor.is_modified());
        executor.mark_clean();
        assert!(!executor.is_modified());
        executor.undo();
        assert!(executor.is_modified());
        executor.redo();
        assert!(!executor.is_modified());
    }

    #[test]
    fn language_switch_changes_blocks() {
        let mut executor = CommandExecutor::new("<div>\n{\n}\n</div>");
        assert_eq!(executor.blocks().len(), 1);
        assert_eq!(executor.blocks()[0].start_line, 1);

        executor.execute(Action::View(ViewAction::SetLanguage(LanguageConfig::markup())));
        assert_eq!(executor.blocks().len(), 1);
        assert_eq!(executor.blocks()[0].start_line, 0);
    }
}
