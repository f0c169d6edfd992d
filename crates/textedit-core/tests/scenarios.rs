use pretty_assertions::assert_eq;
use textedit_core::{
    Action, ActionResult, CommandExecutor, CursorAction, EditAction, Motion, Position,
};

fn move_to(executor: &mut CommandExecutor, line: usize, column: usize) {
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::To(Position::new(line, column)),
        extend: false,
    }));
}

fn lines(executor: &CommandExecutor) -> Vec<String> {
    executor.core().buffer.lines().to_vec()
}

#[test]
fn test_backspace_at_line_start_joins_lines() {
    let mut executor = CommandExecutor::new("abc\ndef");
    move_to(&mut executor, 1, 0);

    executor.execute(Action::Edit(EditAction::Backspace));
    assert_eq!(lines(&executor), ["abcdef"]);
    assert_eq!(executor.core().cursor_position(), Position::new(0, 3));

    assert!(executor.undo());
    assert_eq!(lines(&executor), ["abc", "def"]);
    assert_eq!(executor.core().cursor_position(), Position::new(1, 0));
}

#[test]
fn test_typing_run_is_one_undo_step() {
    let mut executor = CommandExecutor::empty();
    executor.type_char('a');
    executor.type_char('b');
    executor.type_char(' ');
    assert_eq!(lines(&executor), ["ab "]);
    assert_eq!(executor.undo_manager().done_count(), 1);

    assert!(executor.undo());
    assert_eq!(lines(&executor), [""]);
    assert_eq!(executor.core().cursor_position(), Position::new(0, 0));
    assert!(!executor.undo());
}

#[test]
fn test_smart_newline_between_braces() {
    let mut executor = CommandExecutor::new("if (x) {}");
    move_to(&mut executor, 0, 8);

    executor.execute(Action::Edit(EditAction::Newline));
    assert_eq!(lines(&executor), ["if (x) {", "    ", "}"]);
    assert_eq!(executor.core().cursor_position(), Position::new(1, 4));
}

#[test]
fn test_move_line_down_then_up() {
    let mut executor = CommandExecutor::new("a\nb\nc");
    move_to(&mut executor, 1, 0);

    executor.execute(Action::Edit(EditAction::MoveLineDown));
    assert_eq!(lines(&executor), ["a", "c", "b"]);

    executor.execute(Action::Edit(EditAction::MoveLineUp));
    assert_eq!(lines(&executor), ["a", "b", "c"]);

    executor.undo();
    assert_eq!(lines(&executor), ["a", "c", "b"]);
    executor.undo();
    assert_eq!(lines(&executor), ["a", "b", "c"]);
}

#[test]
fn test_find_next_wraps() {
    let executor = CommandExecutor::new("axx\nbxa");
    let buffer = &executor.core().buffer;

    let first = buffer.find_next("x", 0, 0).map(|hit| hit.start());
    assert_eq!(first, Some(Position::new(0, 1)));
    let second = buffer.find_next("x", 0, 2).map(|hit| hit.start());
    assert_eq!(second, Some(Position::new(0, 2)));
    let third = buffer.find_next("x", 0, 3).map(|hit| hit.start());
    assert_eq!(third, Some(Position::new(1, 1)));
    let wrapped = buffer.find_next("x", 1, 2).map(|hit| hit.start());
    assert_eq!(wrapped, Some(Position::new(0, 1)));
    assert_eq!(buffer.find_next("q", 0, 0), None);
}

#[test]
fn test_find_action_selects_match() {
    let mut executor = CommandExecutor::new("axx\nbxa");
    let result = executor.execute(Action::Cursor(CursorAction::FindNext {
        query: "X".to_string(),
    }));
    let ActionResult::SearchMatch(hit) = result else {
        panic!("expected a match, got {result:?}");
    };
    assert_eq!(hit.start(), Position::new(0, 1));
    assert_eq!(executor.core().selected_text().as_deref(), Some("x"));

    let missing = executor.execute(Action::Cursor(CursorAction::FindNext {
        query: "zz".to_string(),
    }));
    assert_eq!(missing, ActionResult::SearchNotFound);
}

#[test]
fn test_auto_pair_inside_typing_run() {
    let mut executor = CommandExecutor::empty();
    for ch in "f(x".chars() {
        executor.type_char(ch);
    }
    assert_eq!(executor.text(), "f(x)");
    executor.type_char(')');
    assert_eq!(executor.text(), "f(x)");
    assert_eq!(executor.core().cursor_position(), Position::new(0, 4));

    while executor.undo() {}
    assert_eq!(executor.text(), "");
}

#[test]
fn test_typing_over_selection_is_undone_together() {
    let mut executor = CommandExecutor::new("hello world");
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::LineEnd,
        extend: true,
    }));
    executor.type_char('H');
    executor.type_char('i');
    assert_eq!(executor.text(), "Hi");

    executor.undo();
    assert_eq!(executor.text(), "hello world");
    assert_eq!(
        executor.core().selected_text().as_deref(),
        Some("hello world")
    );
}
