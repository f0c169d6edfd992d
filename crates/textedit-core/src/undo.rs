//! Linear undo/redo history.
//!
//! [`UndoManager`] keeps two stacks of boxed [`Command`]s. Applying or recording a new command
//! clears the redo stack. The manager also tracks a *clean point* (the history depth at the last
//! save) so hosts can show a modified marker.

use crate::{Command, EditorCore};
use tracing::{debug, trace};

/// Undo/redo stacks over boxed commands.
#[derive(Debug)]
pub struct UndoManager {
    done: Vec<Box<dyn Command>>,
    undone: Vec<Box<dyn Command>>,
    max_depth: usize,
    /// History depth at the clean point. May exceed `done.len()` while the clean state sits on
    /// the redo stack; `None` once that state became unreachable.
    clean_index: Option<usize>,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoManager {
    /// An empty, unbounded history whose initial state is clean.
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// An empty history keeping at most `max_depth` undo steps (at least 1).
    pub fn with_limit(max_depth: usize) -> Self {
        Self {
            done: Vec::new(),
            undone: Vec::new(),
            max_depth: max_depth.max(1),
            clean_index: Some(0),
        }
    }

    /// Apply `command` to `core` and record it.
    pub fn apply(&mut self, mut command: Box<dyn Command>, core: &mut EditorCore) {
        command.apply(core);
        self.record(command);
    }

    /// Record a command whose effect is already present in the document.
    pub fn record(&mut self, command: Box<dyn Command>) {
        self.clear_redo_and_adjust_clean();

        if self.done.len() >= self.max_depth {
            self.done.remove(0);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(index) => Some(index - 1),
            };
        }

        trace!(
            command = command.name(),
            done = self.done.len() + 1,
            "command recorded"
        );
        self.done.push(command);
    }

    /// Undo the most recent command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, core: &mut EditorCore) -> bool {
        let Some(mut command) = self.done.pop() else {
            return false;
        };
        command.invert(core);
        trace!(
            command = command.name(),
            done = self.done.len(),
            undone = self.undone.len() + 1,
            "undo"
        );
        self.undone.push(command);
        true
    }

    /// Re-apply the most recently undone command. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, core: &mut EditorCore) -> bool {
        let Some(mut command) = self.undone.pop() else {
            return false;
        };
        command.apply(core);
        trace!(
            command = command.name(),
            done = self.done.len() + 1,
            undone = self.undone.len(),
            "redo"
        );
        self.done.push(command);
        true
    }

    /// Number of commands that can be undone.
    pub fn done_count(&self) -> usize {
        self.done.len()
    }

    /// Number of commands that can be redone.
    pub fn undone_count(&self) -> usize {
        self.undone.len()
    }

    /// Returns `true` if there is something to undo.
    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    /// Returns `true` if there is something to redo.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Name of the command the next undo would invert.
    pub fn undo_name(&self) -> Option<&'static str> {
        self.done.last().map(|c| c.name())
    }

    /// Name of the command the next redo would apply.
    pub fn redo_name(&self) -> Option<&'static str> {
        self.undone.last().map(|c| c.name())
    }

    /// Drop all history. The current state becomes the clean point.
    pub fn clear(&mut self) {
        debug!(
            done = self.done.len(),
            undone = self.undone.len(),
            "undo history cleared"
        );
        self.done.clear();
        self.undone.clear();
        self.clean_index = Some(0);
    }

    /// Mark the current state as saved.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.done.len());
    }

    /// Returns `true` if the document is at the clean point.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.done.len())
    }

    fn clear_redo_and_adjust_clean(&mut self) {
        if self.undone.is_empty() {
            return;
        }

        // A clean point on the redo stack is unreachable once that stack is gone.
        if let Some(clean_index) = self.clean_index
            && clean_index > self.done.len()
        {
            self.clean_index = None;
        }

        trace!(cleared = self.undone.len(), "redo stack cleared");
        self.undone.clear();
    }
}
