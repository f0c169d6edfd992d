use pretty_assertions::assert_eq;
use textedit_core::{
    Action, ActionResult, CommandExecutor, CursorAction, EditAction, Motion, Position,
};

fn state(executor: &CommandExecutor) -> (Vec<String>, Position) {
    (
        executor.core().buffer.lines().to_vec(),
        executor.core().cursor_position(),
    )
}

fn move_to(executor: &mut CommandExecutor, line: usize, column: usize) {
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::To(Position::new(line, column)),
        extend: false,
    }));
}

/// Runs `action` at `(line, column)` and checks undo restores the prior state and redo the
/// applied one.
fn assert_undo_redo(text: &str, line: usize, column: usize, action: EditAction) {
    let mut executor = CommandExecutor::new(text);
    move_to(&mut executor, line, column);
    let before = state(&executor);

    assert_eq!(
        executor.execute(Action::Edit(action.clone())),
        ActionResult::Success,
        "{action:?} should apply"
    );
    let after = state(&executor);

    assert!(executor.undo());
    assert_eq!(state(&executor), before, "undo of {action:?}");
    assert!(executor.redo());
    assert_eq!(state(&executor), after, "redo of {action:?}");
}

#[test]
fn test_every_edit_round_trips() {
    let text = "fn main() {\n    let x = (1, 2);\n}";
    let cases = [
        (1, 8, EditAction::Backspace),
        (1, 8, EditAction::DeleteForward),
        (0, 11, EditAction::Newline),
        (1, 4, EditAction::Paste("a\nb".to_string())),
        (1, 14, EditAction::DeleteWordLeft),
        (1, 0, EditAction::DeleteLine),
        (1, 3, EditAction::DuplicateLine),
        (1, 0, EditAction::MoveLineUp),
        (1, 0, EditAction::MoveLineDown),
        (1, 5, EditAction::Indent),
        (1, 5, EditAction::Outdent),
        (
            0,
            0,
            EditAction::Replace {
                start: 3,
                length: 4,
                text: "start".to_string(),
            },
        ),
    ];
    for (line, column, action) in cases {
        assert_undo_redo(text, line, column, action);
    }
}

#[test]
fn test_paste_redo_is_exact() {
    let mut executor = CommandExecutor::new("ab");
    move_to(&mut executor, 0, 1);
    executor.paste("one\r\ntwo\rthree");
    assert_eq!(executor.text(), "aone\ntwo\nthreeb");
    let pasted = state(&executor);

    executor.undo();
    assert_eq!(executor.text(), "ab");
    move_to(&mut executor, 0, 0);
    executor.redo();
    assert_eq!(state(&executor), pasted);
}

#[test]
fn test_word_delete_redo_replays_at_original_cursor() {
    let mut executor = CommandExecutor::new("alpha beta gamma");
    move_to(&mut executor, 0, 10);
    executor.execute(Action::Edit(EditAction::DeleteWordLeft));
    assert_eq!(executor.text(), "alpha  gamma");

    executor.undo();
    move_to(&mut executor, 0, 16);
    executor.redo();
    assert_eq!(executor.text(), "alpha  gamma");
    assert_eq!(executor.core().cursor_position(), Position::new(0, 6));
}

#[test]
fn test_new_edit_discards_redo() {
    let mut executor = CommandExecutor::empty();
    executor.paste("abc");
    executor.undo();
    assert!(executor.undo_redo_state().can_redo);

    executor.type_char('x');
    let state = executor.undo_redo_state();
    assert!(!state.can_redo);
    assert!(state.typing_open);
    assert!(!executor.redo());
    assert_eq!(executor.text(), "x");
}

#[test]
fn test_undo_closes_open_typing_run() {
    let mut executor = CommandExecutor::new("z");
    executor.type_char('a');
    executor.type_char('b');
    assert!(executor.undo_redo_state().can_undo);

    assert!(executor.undo());
    assert_eq!(executor.text(), "z");
    assert!(executor.redo());
    assert_eq!(executor.text(), "abz");
    assert_eq!(executor.core().cursor_position(), Position::new(0, 2));
}

#[test]
fn test_end_undo_group_splits_runs() {
    let mut executor = CommandExecutor::empty();
    executor.type_char('a');
    executor.execute(Action::Edit(EditAction::EndUndoGroup));
    executor.type_char('b');
    executor.focus_lost();
    assert_eq!(executor.undo_manager().done_count(), 2);

    executor.undo();
    assert_eq!(executor.text(), "a");
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut executor = CommandExecutor::new("text");
    let version = executor.version();
    assert_eq!(
        executor.execute(Action::Edit(EditAction::Undo)),
        ActionResult::NoOp
    );
    assert_eq!(
        executor.execute(Action::Edit(EditAction::Redo)),
        ActionResult::NoOp
    );
    assert_eq!(executor.text(), "text");
    assert_eq!(executor.version(), version);
}

#[test]
fn test_boundary_deletes_leave_state_unchanged() {
    let mut executor = CommandExecutor::new("ab\ncd");
    let before = state(&executor);
    executor.execute(Action::Edit(EditAction::Backspace));
    assert_eq!(state(&executor), before);

    move_to(&mut executor, 1, 2);
    let before = state(&executor);
    executor.execute(Action::Edit(EditAction::DeleteForward));
    assert_eq!(state(&executor), before);
    assert!(!executor.undo_redo_state().can_undo);
}

#[test]
fn test_undo_of_line_move_restores_selection() {
    let mut executor = CommandExecutor::new("aa\nbb\ncc");
    move_to(&mut executor, 1, 0);
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::Right,
        extend: true,
    }));
    let selection = executor.core().selection();
    assert!(selection.is_some());

    executor.execute(Action::Edit(EditAction::MoveLineDown));
    assert_eq!(executor.text(), "aa\ncc\nbb");
    assert!(executor.undo());
    assert_eq!(executor.text(), "aa\nbb\ncc");
    assert_eq!(executor.core().selection(), selection);
}
