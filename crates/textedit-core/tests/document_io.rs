use pretty_assertions::assert_eq;
use textedit_core::{
    Action, CommandExecutor, CursorAction, EditAction, LineEnding, LoadError, Motion, Position,
};

#[test]
fn test_crlf_is_normalized_and_restored_on_save() {
    let mut executor = CommandExecutor::empty();
    executor.load_text("one\r\ntwo\r\n");
    assert_eq!(executor.core().buffer.lines(), ["one", "two", ""]);
    assert_eq!(executor.line_ending(), LineEnding::Crlf);

    executor.paste("!");
    assert_eq!(executor.text_for_save(), "!one\r\ntwo\r\n");
    assert_eq!(executor.text(), "!one\ntwo\n");
}

#[test]
fn test_load_resets_history_and_cursor() {
    let mut executor = CommandExecutor::new("abc");
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::DocumentEnd,
        extend: false,
    }));
    executor.type_char('d');
    executor.flush_typing();

    executor.load_text("fresh\ntext");
    assert_eq!(executor.core().cursor_position(), Position::new(0, 0));
    assert!(!executor.undo_redo_state().can_undo);
    assert!(!executor.is_modified());
    assert!(!executor.undo());
}

#[test]
fn test_invalid_utf8_keeps_document() {
    let mut executor = CommandExecutor::new("keep me");
    let version = executor.version();

    let err = executor.load_bytes(&[b'a', 0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, LoadError::InvalidUtf8(_)));
    assert_eq!(executor.text(), "keep me");
    assert_eq!(executor.version(), version);

    executor.load_bytes("ünïcode".as_bytes()).unwrap();
    assert_eq!(executor.text(), "ünïcode");
}

#[test]
fn test_text_round_trips_through_load() {
    let mut executor = CommandExecutor::new("a\n\n  b\t\n");
    let lines = executor.core().buffer.lines().to_vec();
    let text = executor.text();
    executor.load_text(&text);
    assert_eq!(executor.core().buffer.lines(), lines.as_slice());
}

#[test]
fn test_document_state_tracks_edits() {
    let mut executor = CommandExecutor::new("héllo\nworld");
    let state = executor.document_state();
    assert_eq!(state.line_count, 2);
    assert_eq!(state.char_count, 11);
    assert_eq!(state.byte_count, 12);
    assert!(!state.is_modified);

    executor.execute(Action::Edit(EditAction::DuplicateLine));
    let state = executor.document_state();
    assert_eq!(state.line_count, 3);
    assert!(state.is_modified);
    assert!(state.version > 0);

    executor.mark_clean();
    assert!(!executor.document_state().is_modified);
}

#[test]
fn test_stale_analysis_result_is_discarded() {
    let mut executor = CommandExecutor::new("let x = fo");
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::LineEnd,
        extend: false,
    }));
    let request = executor.analysis_request();
    assert_eq!(request.offset, 10);
    assert_eq!(request.text, "let x = fo");

    // The user keeps typing while the analysis runs.
    executor.type_char('o');
    assert!(!executor.apply_analysis_edit(request.version, 8, 2, "foobar"));
    assert_eq!(executor.text(), "let x = foo");

    let request = executor.analysis_request();
    assert!(executor.apply_analysis_edit(request.version, 8, 3, "foobar"));
    assert_eq!(executor.text(), "let x = foobar");
    assert_eq!(executor.core().cursor_position(), Position::new(0, 14));

    executor.undo();
    assert_eq!(executor.text(), "let x = foo");
}

#[test]
fn test_analysis_request_is_send() {
    fn assert_send<T: Send + 'static>(_: &T) {}
    let executor = CommandExecutor::new("x");
    assert_send(&executor.analysis_request());
}
