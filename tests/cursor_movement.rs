//! Cursor movement tests
//!
//! Tests for:
//! - Document boundaries (no-op at start/end)
//! - Vertical motion over wrapped rows
//! - Horizontal motion across line ends
//! - Word, line and paragraph motions through the update loop

mod common;

use common::{positions, test_editor, wrapped_editor};
use writer::messages::Direction;
use writer::{update, EditorMsg, Point};

fn step(editor: &mut writer::Editor, direction: Direction, select: bool) {
    update(editor, EditorMsg::MoveCursor { direction, select });
}

// ========================================================================
// Boundaries
// ========================================================================

#[test]
fn test_move_left_at_document_start() {
    let mut editor = test_editor("hello\nworld", 0, 0);
    step(&mut editor, Direction::Left, false);
    assert_eq!(positions(&editor), vec![(0, 0)]);
}

#[test]
fn test_move_right_at_document_end() {
    let mut editor = test_editor("hello\nworld", 1, 5);
    step(&mut editor, Direction::Right, false);
    assert_eq!(positions(&editor), vec![(1, 5)]);
}

#[test]
fn test_move_right_at_end_collapses_selection_first() {
    let mut editor = test_editor("hello\nworld", 1, 2);
    update(&mut editor, EditorMsg::MoveCursorDocumentEnd { select: true });
    assert!(!editor.main_cursor().selection.is_collapsed());
    step(&mut editor, Direction::Right, false);
    assert!(editor.main_cursor().selection.is_collapsed());
    assert_eq!(positions(&editor), vec![(1, 5)]);
}

#[test]
fn test_move_up_on_first_line_goes_to_start() {
    let mut editor = test_editor("hello\nworld", 0, 3);
    step(&mut editor, Direction::Up, false);
    assert_eq!(positions(&editor), vec![(0, 0)]);
}

#[test]
fn test_move_down_on_last_line_goes_to_end() {
    let mut editor = test_editor("hello\nworld", 1, 1);
    step(&mut editor, Direction::Down, false);
    assert_eq!(positions(&editor), vec![(1, 5)]);
}

// ========================================================================
// Horizontal
// ========================================================================

#[test]
fn test_right_wraps_to_next_line() {
    let mut editor = test_editor("ab\ncd", 0, 2);
    step(&mut editor, Direction::Right, false);
    assert_eq!(positions(&editor), vec![(1, 0)]);
    step(&mut editor, Direction::Left, false);
    assert_eq!(positions(&editor), vec![(0, 2)]);
}

#[test]
fn test_shift_right_extends_across_lines() {
    let mut editor = test_editor("ab\ncd", 0, 1);
    for _ in 0..3 {
        step(&mut editor, Direction::Right, true);
    }
    let selection = editor.main_cursor().selection;
    assert_eq!(selection.anchor(), Point::new(0, 1));
    assert_eq!(selection.focus(), Point::new(1, 1));
    assert_eq!(editor.copy().as_deref(), Some("b\nc"));
}

// ========================================================================
// Vertical over wrapped rows
// ========================================================================

#[test]
fn test_down_walks_visual_rows() {
    // Wraps as "alpha ", "beta ", "gamma" at 6 cells
    let mut editor = wrapped_editor("alpha beta gamma\nend", 6);
    editor.click(Point::new(0, 2), 1, false);
    step(&mut editor, Direction::Down, false);
    assert_eq!(positions(&editor), vec![(0, 8)]);
    step(&mut editor, Direction::Down, false);
    assert_eq!(positions(&editor), vec![(0, 13)]);
    step(&mut editor, Direction::Down, false);
    assert_eq!(positions(&editor), vec![(1, 2)]);
    step(&mut editor, Direction::Up, false);
    assert_eq!(positions(&editor), vec![(0, 13)]);
}

#[test]
fn test_up_from_wrapped_first_line_goes_to_start() {
    let mut editor = wrapped_editor("alpha beta gamma\nend", 6);
    editor.click(Point::new(0, 8), 1, false);
    step(&mut editor, Direction::Up, false);
    assert_eq!(positions(&editor), vec![(0, 0)]);
}

#[test]
fn test_down_from_wrapped_last_line_goes_to_end() {
    let mut editor = wrapped_editor("abc\nalpha beta gamma", 6);
    editor.click(Point::new(1, 2), 1, false);
    step(&mut editor, Direction::Down, true);
    assert_eq!(positions(&editor), vec![(1, 16)]);
    assert_eq!(editor.copy().as_deref(), Some("pha beta gamma"));
}

#[test]
fn test_vertical_clamps_to_shorter_row() {
    let mut editor = wrapped_editor("alpha beta gamma\nend", 6);
    editor.click(Point::new(0, 15), 1, false);
    step(&mut editor, Direction::Down, false);
    assert_eq!(positions(&editor), vec![(1, 3)]);
}

#[test]
fn test_vertical_clamp_stays_on_wrapped_row() {
    let mut editor = wrapped_editor("abc\nalpha beta gamma", 6);
    editor.click(Point::new(1, 16), 1, false);
    // Row "beta " ends at a break; landing must stay on that row
    step(&mut editor, Direction::Up, false);
    assert_eq!(positions(&editor), vec![(1, 10)]);
}

// ========================================================================
// Line, word and paragraph
// ========================================================================

#[test]
fn test_line_start_end_use_visual_row() {
    let mut editor = wrapped_editor("alpha beta gamma", 6);
    editor.click(Point::new(0, 8), 1, false);
    update(&mut editor, EditorMsg::MoveCursorLineStart { select: false });
    assert_eq!(positions(&editor), vec![(0, 6)]);
    update(&mut editor, EditorMsg::MoveCursorLineEnd { select: true });
    assert_eq!(editor.copy().as_deref(), Some("beta"));
}

#[test]
fn test_paragraph_motion_uses_logical_line() {
    let mut editor = wrapped_editor("alpha beta gamma", 6);
    editor.click(Point::new(0, 8), 1, false);
    update(&mut editor, EditorMsg::MoveCursorParagraphEnd { select: false });
    assert_eq!(positions(&editor), vec![(0, 16)]);
    update(&mut editor, EditorMsg::MoveCursorParagraphStart { select: true });
    assert_eq!(editor.copy().as_deref(), Some("alpha beta gamma"));
}

#[test]
fn test_word_motion_crosses_lines() {
    let mut editor = test_editor("first line\n  second", 0, 10);
    let right = EditorMsg::MoveCursorWord {
        direction: Direction::Right,
        select: false,
    };
    update(&mut editor, right.clone());
    assert_eq!(positions(&editor), vec![(1, 8)]);

    let left = EditorMsg::MoveCursorWord {
        direction: Direction::Left,
        select: false,
    };
    update(&mut editor, left.clone());
    assert_eq!(positions(&editor), vec![(1, 2)]);
    update(&mut editor, left);
    assert_eq!(positions(&editor), vec![(0, 6)]);
}

#[test]
fn test_document_motions_flatten() {
    let mut editor = test_editor("a\nb\nc", 1, 0);
    editor.add_cursor(Point::new(2, 1));
    update(&mut editor, EditorMsg::MoveCursorDocumentStart { select: false });
    assert_eq!(positions(&editor), vec![(0, 0)]);

    editor.add_cursor(Point::new(1, 1));
    update(&mut editor, EditorMsg::MoveCursorDocumentEnd { select: true });
    assert_eq!(positions(&editor), vec![(2, 1)]);
    assert_eq!(editor.copy().as_deref(), Some("a\nb\nc"));
}
