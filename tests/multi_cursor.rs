//! Multi-cursor behavior tests
//!
//! Tests for:
//! - Adding/toggling cursors
//! - Merging cursors that land on the same position
//! - Per-cursor edits applied in list order
//! - Collapsing to a single cursor

mod common;

use common::{positions, test_editor};
use writer::messages::Direction;
use writer::{update, EditorMsg, Point};

fn right(editor: &mut writer::Editor, select: bool) {
    update(
        editor,
        EditorMsg::MoveCursor {
            direction: Direction::Right,
            select,
        },
    );
}

// ========================================================================
// Adding and Removing
// ========================================================================

#[test]
fn test_alt_click_adds_cursor() {
    let mut editor = test_editor("abcd\nefgh", 0, 1);
    update(&mut editor, EditorMsg::AddCursor { line: 1, column: 2 });
    assert_eq!(positions(&editor), vec![(0, 1), (1, 2)]);
}

#[test]
fn test_add_cursor_clamps_into_document() {
    let mut editor = test_editor("abcd\nefgh", 0, 0);
    update(&mut editor, EditorMsg::AddCursor { line: 0, column: 99 });
    update(&mut editor, EditorMsg::AddCursor { line: 9, column: 0 });
    assert_eq!(positions(&editor), vec![(0, 0), (0, 4), (1, 4)]);
}

#[test]
fn test_toggle_cursor_removes_existing() {
    let mut editor = test_editor("abcd", 0, 0);
    update(&mut editor, EditorMsg::ToggleCursor { line: 0, column: 2 });
    assert_eq!(editor.cursors.len(), 2);
    update(&mut editor, EditorMsg::ToggleCursor { line: 0, column: 2 });
    assert_eq!(positions(&editor), vec![(0, 0)]);
}

#[test]
fn test_plain_click_resets_to_one_cursor() {
    let mut editor = test_editor("abcd\nefgh", 0, 0);
    editor.add_cursor(Point::new(1, 1));
    editor.add_cursor(Point::new(1, 3));
    update(
        &mut editor,
        EditorMsg::Click {
            line: 1,
            column: 2,
            count: 1,
            extend: false,
        },
    );
    assert_eq!(positions(&editor), vec![(1, 2)]);
}

#[test]
fn test_collapse_cursors_keeps_main() {
    let mut editor = test_editor("abcd\nefgh", 1, 1);
    editor.add_cursor(Point::new(0, 0));
    update(&mut editor, EditorMsg::CollapseCursors);
    assert_eq!(positions(&editor), vec![(1, 1)]);
}

// ========================================================================
// Merging
// ========================================================================

#[test]
fn test_distinct_positions_do_not_merge() {
    let mut editor = test_editor("abcd", 0, 1);
    editor.add_cursor(Point::new(0, 3));
    right(&mut editor, false);
    assert_eq!(positions(&editor), vec![(0, 2), (0, 4)]);
}

#[test]
fn test_cursors_meeting_at_end_merge() {
    let mut editor = test_editor("abcd", 0, 3);
    let second = editor.cursors.add_cursor(Point::new(0, 4));
    let main = editor.main_cursor().id;
    right(&mut editor, false);
    assert_eq!(positions(&editor), vec![(0, 4)]);
    assert_eq!(editor.main_cursor().id, main);
    assert!(editor.cursors.get(second).is_none());
}

#[test]
fn test_merge_keeps_list_order_not_position_order() {
    let mut editor = test_editor("abcdef", 0, 5);
    editor.add_cursor(Point::new(0, 0));
    editor.add_cursor(Point::new(0, 1));
    update(&mut editor, EditorMsg::MoveCursorParagraphStart { select: false });
    assert_eq!(positions(&editor), vec![(0, 0)]);
    assert_eq!(editor.cursors.len(), 1);
}

#[test]
fn test_vertical_merge_at_top() {
    let mut editor = test_editor("abc\ndef\nghi", 0, 2);
    editor.add_cursor(Point::new(0, 0));
    editor.add_cursor(Point::new(1, 1));
    update(
        &mut editor,
        EditorMsg::MoveCursor {
            direction: Direction::Up,
            select: false,
        },
    );
    assert_eq!(positions(&editor), vec![(0, 0), (0, 1)]);
}

// ========================================================================
// Editing in list order
// ========================================================================

#[test]
fn test_insert_on_separate_lines() {
    let mut editor = test_editor("one\ntwo\nthree", 0, 3);
    editor.add_cursor(Point::new(1, 3));
    editor.add_cursor(Point::new(2, 5));
    update(&mut editor, EditorMsg::InsertText(";".to_string()));
    assert_eq!(editor.document.text(), "one;\ntwo;\nthree;");
    assert_eq!(positions(&editor), vec![(0, 4), (1, 4), (2, 6)]);
}

#[test]
fn test_same_line_edits_see_earlier_edits() {
    // The later cursor keeps its column even though the earlier insert
    // shifted the text under it
    let mut editor = test_editor("abcd", 0, 1);
    editor.add_cursor(Point::new(0, 3));
    update(&mut editor, EditorMsg::InsertText("X".to_string()));
    assert_eq!(editor.document.text(), "aXbXcd");
    assert_eq!(positions(&editor), vec![(0, 2), (0, 4)]);
}

#[test]
fn test_newline_at_each_cursor() {
    let mut editor = test_editor("ab\ncd", 1, 1);
    editor.add_cursor(Point::new(0, 1));
    update(&mut editor, EditorMsg::InsertNewline);
    // The main cursor is not shifted by the split the second cursor made
    // above it
    assert_eq!(editor.document.text(), "a\nb\nc\nd");
    assert_eq!(positions(&editor), vec![(2, 0), (1, 0)]);
}

#[test]
fn test_backspace_join_then_delete_in_order() {
    let mut editor = test_editor("ab\ncd", 1, 0);
    editor.add_cursor(Point::new(0, 2));
    update(&mut editor, EditorMsg::DeleteBackward);
    // First cursor joins the lines and lands at (0, 2); the second then
    // deletes the 'b' before it
    assert_eq!(editor.document.text(), "acd");
    assert_eq!(positions(&editor), vec![(0, 2), (0, 1)]);
}

#[test]
fn test_copy_joins_selections_in_list_order() {
    let mut editor = test_editor("alpha\nbeta", 1, 0);
    editor.add_cursor(Point::new(0, 0));
    update(&mut editor, EditorMsg::MoveCursorParagraphEnd { select: true });
    assert_eq!(editor.copy().as_deref(), Some("beta\nalpha"));
}
