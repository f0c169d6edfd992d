//! Typing coalescer.
//!
//! A run of consecutive printable characters becomes one [`TypingCommand`] and therefore one undo
//! step. The executor opens a run lazily on the first character (capturing the before-snapshot),
//! sends every following character straight through the cursor, and records the command once the
//! run is finished (see [`is_run_terminator`] and [`crate::CommandExecutor::flush_typing`]).
//!
//! Auto-pairing happens inside the run, so the inserted closer is undone together with the
//! characters around it.

use crate::command::EditSnapshot;
use crate::text::{CharClass, char_class};
use crate::{Command, EditorCore, Memento, Position};

/// Whether `ch` closes the typing run it is part of.
pub fn is_run_terminator(ch: char) -> bool {
    char_class(ch) != CharClass::Word
}

/// One coalesced run of typed characters.
///
/// Undo restores the state before the first character; redo restores the state captured by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct TypingCommand {
    before: EditSnapshot,
    after: Option<Memento>,
    typed: usize,
}

impl TypingCommand {
    /// Open a run at the current state.
    pub fn begin(core: &EditorCore) -> Self {
        Self {
            before: EditSnapshot::capture(core),
            after: None,
            typed: 0,
        }
    }

    /// Number of characters typed into this run.
    pub fn typed(&self) -> usize {
        self.typed
    }

    /// Type `ch` at the cursor, replacing the selection.
    pub fn type_char(&mut self, core: &mut EditorCore, ch: char) {
        self.after = None;
        core.delete_selection();
        self.typed += 1;

        if core.config.auto_pair && Self::auto_pair(core, ch) {
            return;
        }
        core.cursor.insert(&mut core.buffer, ch);
    }

    /// Type every character of `text`.
    pub fn type_str(&mut self, core: &mut EditorCore, text: &str) {
        for ch in text.chars() {
            self.type_char(core, ch);
        }
    }

    /// Close the run, capturing the state redo returns to.
    pub fn finish(&mut self, core: &EditorCore) {
        self.after = Some(core.snapshot());
    }

    /// Step over an existing closer, or insert an opener with its closer. Returns `false` when
    /// `ch` needs a plain insert.
    fn auto_pair(core: &mut EditorCore, ch: char) -> bool {
        let pairs = &core.config.language.pairs;
        let pos = core.cursor.position();

        if pairs.is_closer(ch) && core.buffer.char_at(pos) == Some(ch) {
            core.cursor.move_right(&core.buffer);
            return true;
        }

        let Some(close) = pairs.closer_for(ch) else {
            return false;
        };
        if close == ch {
            // Quotes directly after a word are apostrophes or closing quotes.
            let prev = pos
                .column
                .checked_sub(1)
                .and_then(|c| core.buffer.char_at(Position::new(pos.line, c)));
            if prev.is_some_and(|p| char_class(p) == CharClass::Word) {
                return false;
            }
        }

        core.cursor.insert(&mut core.buffer, ch);
        core.cursor.insert(&mut core.buffer, close);
        core.cursor.move_left(&core.buffer);
        true
    }
}

impl Command for TypingCommand {
    fn apply(&mut self, core: &mut EditorCore) {
        if let Some(after) = &self.after {
            core.restore(after);
        } else {
            self.finish(core);
        }
    }

    fn invert(&mut self, core: &mut EditorCore) {
        self.before.restore(core);
    }

    fn name(&self) -> &'static str {
        "typing"
    }
}
