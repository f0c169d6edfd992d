#![warn(missing_docs)]
//! Textedit Core - Headless Text Editing Engine
//!
//! # Overview
//!
//! `textedit-core` is the in-process editing engine behind a text editor window. It owns the
//! document lines, the cursor and selection, a command-based linear undo/redo history and the
//! rules that make typing feel right (coalesced undo steps, auto-paired brackets, smart
//! newlines). It does no rendering and no file I/O: hosts read lines and cursor state, and
//! persist text themselves.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  CommandExecutor (Action dispatch, typing)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  UndoManager (done / undone stacks)         │  ← History
//! ├─────────────────────────────────────────────┤
//! │  Commands (apply / invert)                  │  ← Edits
//! ├─────────────────────────────────────────────┤
//! │  EditorCore (Buffer + Cursor + View)        │  ← Per-document state
//! ├─────────────────────────────────────────────┤
//! │  Buffer (Vec of lines) / Memento            │  ← Text storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use textedit_core::{Action, CommandExecutor, CursorAction, EditAction, Motion, Position};
//!
//! let mut executor = CommandExecutor::new("if (x) {}");
//!
//! executor.execute(Action::Cursor(CursorAction::Move {
//!     motion: Motion::To(Position::new(0, 8)),
//!     extend: false,
//! }));
//! executor.execute(Action::Edit(EditAction::Newline));
//!
//! assert_eq!(executor.text(), "if (x) {\n    \n}");
//! assert_eq!(executor.core().cursor_position(), Position::new(1, 4));
//!
//! executor.undo();
//! assert_eq!(executor.text(), "if (x) {}");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Line storage and clamped editing primitives
//! - [`cursor`] - Cursor, selection anchor and sticky column
//! - [`command`] - Command contract and snapshot-restore commands
//! - [`line_ops`] - Whole-line commands
//! - [`navigation`] - Cursor and view commands
//! - [`typing`] - Typing coalescer and auto-pairing
//! - [`undo`] - Undo/redo history
//! - [`blocks`] - Derived block ranges
//! - [`executor`] - Action dispatch
//!
//! # Unicode Support
//!
//! - Columns count Unicode scalar values
//! - The sticky column is measured in terminal cells, so CJK double-width characters and tabs
//!   line up visually

pub mod blocks;
pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
mod editor;
pub mod executor;
pub mod line_ending;
pub mod line_ops;
mod memento;
pub mod navigation;
mod position;
pub mod search;
mod text;
pub mod typing;
pub mod undo;

pub use blocks::{BlockRange, find_blocks};
pub use buffer::{Buffer, LoadError};
pub use command::{
    BackspaceCommand, Command, DeleteCommand, DeleteSelectionCommand, DeleteWordLeftCommand,
    IndentCommand, NewlineCommand, PasteCommand, ReplaceRangeCommand,
};
pub use config::{EditorConfig, TabKeyBehavior, ZoomConfig};
pub use cursor::Cursor;
pub use editor::{EditorCore, ViewState};
pub use executor::{
    Action, ActionResult, AnalysisRequest, CommandExecutor, CursorAction, DocumentState,
    EditAction, UndoRedoState, ViewAction,
};
pub use line_ending::LineEnding;
pub use line_ops::{DeleteLineCommand, DuplicateLineCommand, LineDirection, MoveLineCommand};
pub use memento::Memento;
pub use navigation::{
    FindCommand, Motion, MoveCursorCommand, SelectAllCommand, ZoomChange, ZoomCommand,
};
pub use position::{Position, Selection, SelectionDirection};
pub use search::{SearchError, SearchHit, SearchOptions};
pub use text::{CharClass, char_class, char_width};
pub use textedit_lang::{BlockSyntax, DelimiterPair, LanguageConfig, PairConfig};
pub use typing::{TypingCommand, is_run_terminator};
pub use undo::UndoManager;
