//! Command interface example
//!
//! Demonstrates how to use `CommandExecutor` to drive the editor.

use textedit_core::{
    Action, ActionResult, CommandExecutor, CursorAction, EditAction, Motion, ViewAction,
};

fn main() {
    println!("=== Editor command interface ===\n");

    let mut executor = CommandExecutor::empty();

    println!("1. Typing:");
    for ch in "fn main() {".chars() {
        executor.type_char(ch);
    }
    executor.type_char('\n');
    for ch in "println!(\"hi\");".chars() {
        executor.type_char(ch);
    }
    println!("{}\n", executor.text());

    println!("2. Line operations:");
    executor.execute(Action::Edit(EditAction::DuplicateLine));
    executor.execute(Action::Edit(EditAction::MoveLineUp));
    println!("{}\n", executor.text());

    println!("3. Search:");
    let result = executor.execute(Action::Cursor(CursorAction::FindNext {
        query: "HI".to_string(),
    }));
    if let ActionResult::SearchMatch(hit) = result {
        println!("  found at {:?}", hit.start());
    }
    executor.execute(Action::Cursor(CursorAction::Move {
        motion: Motion::DocumentEnd,
        extend: false,
    }));

    println!("\n4. Undo / redo:");
    let state = executor.undo_redo_state();
    println!("  undo depth {}, redo depth {}", state.undo_depth, state.redo_depth);
    while executor.undo() {}
    println!("  after undo-all: {:?}", executor.text());
    while executor.redo() {}
    println!("  after redo-all:\n{}", executor.text());

    println!("\n5. View:");
    executor.execute(Action::View(ViewAction::ZoomIn));
    println!("  zoom {}%", executor.core().view.zoom_percent);

    println!("\n6. Blocks:");
    for block in executor.blocks() {
        println!(
            "  lines {}..={} (level {})",
            block.start_line, block.end_line, block.indent_level
        );
    }
}
