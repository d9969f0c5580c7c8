//! Update function for the Elm-style architecture
//!
//! All editor state transformations flow through [`update`].

use std::time::Instant;

use crate::commands::Cmd;
use crate::editor::Editor;
use crate::messages::{Direction, EditorMsg};
use crate::position::{Point, ScreenPoint};

#[cfg(debug_assertions)]
use crate::tracing::CursorSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Main update function
///
/// In debug builds this logs each message and the cursor changes it caused,
/// then checks document and cursor invariants.
#[inline]
pub fn update(editor: &mut Editor, msg: EditorMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(editor, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(editor, msg)
    }
}

#[cfg(debug_assertions)]
fn update_traced(editor: &mut Editor, msg: EditorMsg) -> Option<Cmd> {
    let is_noisy = matches!(msg, EditorMsg::Tick(_) | EditorMsg::Drag { .. });
    let msg_name = format!("{:?}", msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = CursorSnapshot::from_cursors(&editor.cursors);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(editor, msg);

    let after = CursorSnapshot::from_cursors(&editor.cursors);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "state changed");
    }

    editor.document.assert_invariants();
    editor.cursors.assert_invariants();
    result
}

/// Follow-up tick while a rewrap is pending or in flight
fn rewrap_tick(editor: &Editor, now: Instant) -> Option<Cmd> {
    editor
        .next_rewrap_delay(now)
        .map(|delay| Cmd::ScheduleTick { delay })
}

fn update_inner(editor: &mut Editor, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        // === Movement ===
        EditorMsg::MoveCursor { direction, select } => {
            match direction {
                Direction::Up => editor.move_up(1, select),
                Direction::Down => editor.move_down(1, select),
                Direction::Left => editor.move_left(1, select),
                Direction::Right => editor.move_right(1, select),
            }
            Some(Cmd::Redraw)
        }
        EditorMsg::MoveCursorLineStart { select } => {
            editor.move_to_start_of_line(select);
            Some(Cmd::Redraw)
        }
        EditorMsg::MoveCursorLineEnd { select } => {
            editor.move_to_end_of_line(select);
            Some(Cmd::Redraw)
        }
        EditorMsg::MoveCursorWord { direction, select } => match direction {
            Direction::Left => {
                editor.move_to_start_of_word(select);
                Some(Cmd::Redraw)
            }
            Direction::Right => {
                editor.move_to_end_of_word(select);
                Some(Cmd::Redraw)
            }
            Direction::Up | Direction::Down => None,
        },
        EditorMsg::MoveCursorParagraphStart { select } => {
            editor.move_to_start_of_paragraph(select);
            Some(Cmd::Redraw)
        }
        EditorMsg::MoveCursorParagraphEnd { select } => {
            editor.move_to_end_of_paragraph(select);
            Some(Cmd::Redraw)
        }
        EditorMsg::MoveCursorDocumentStart { select } => {
            editor.move_to_top(select);
            Some(Cmd::Redraw)
        }
        EditorMsg::MoveCursorDocumentEnd { select } => {
            editor.move_to_bottom(select);
            Some(Cmd::Redraw)
        }

        // === Selection ===
        EditorMsg::SelectAll => {
            editor.select_all();
            Some(Cmd::Redraw)
        }
        EditorMsg::SelectWord => {
            editor.select_word();
            Some(Cmd::Redraw)
        }
        EditorMsg::SelectParagraph => {
            editor.select_paragraph();
            Some(Cmd::Redraw)
        }

        // === Editing ===
        EditorMsg::InsertText(text) => {
            if text.is_empty() {
                return None;
            }
            editor.insert_text(&text);
            Some(Cmd::Redraw)
        }
        EditorMsg::InsertNewline => {
            editor.newline();
            Some(Cmd::Redraw)
        }
        EditorMsg::DeleteBackward => {
            editor.backspace();
            Some(Cmd::Redraw)
        }
        EditorMsg::DeleteForward => {
            editor.delete_forward();
            Some(Cmd::Redraw)
        }
        EditorMsg::DeleteWordBackward => {
            editor.delete_to_start_of_word();
            Some(Cmd::Redraw)
        }
        EditorMsg::DeleteLineBackward => {
            editor.delete_to_start_of_line();
            Some(Cmd::Redraw)
        }
        EditorMsg::SwapLine(change) => {
            editor.swap_line(change);
            Some(Cmd::Redraw)
        }
        EditorMsg::Copy => editor.copy().map(Cmd::WriteClipboard),
        EditorMsg::Cut => editor
            .cut()
            .map(|text| Cmd::batch(vec![Cmd::WriteClipboard(text), Cmd::Redraw])),

        // === Pointer ===
        EditorMsg::Click {
            line,
            column,
            count,
            extend,
        } => {
            editor.click(Point::new(line, column), count, extend);
            Some(Cmd::Redraw)
        }
        EditorMsg::ClickScreen {
            screen_line,
            screen_column,
            count,
            extend,
        } => {
            let point = editor.resolve_screen_point(ScreenPoint::new(screen_line, screen_column));
            editor.click(point, count, extend);
            Some(Cmd::Redraw)
        }
        EditorMsg::Drag { line, column } => {
            editor.drag(Point::new(line, column));
            Some(Cmd::Redraw)
        }
        EditorMsg::Release => {
            editor.release();
            None
        }

        // === Multi-cursor ===
        EditorMsg::AddCursor { line, column } => {
            editor.add_cursor(Point::new(line, column));
            Some(Cmd::Redraw)
        }
        EditorMsg::ToggleCursor { line, column } => {
            editor.toggle_cursor(Point::new(line, column));
            Some(Cmd::Redraw)
        }
        EditorMsg::CollapseCursors => {
            editor.collapse_cursors();
            Some(Cmd::Redraw)
        }

        // === Layout and configuration ===
        EditorMsg::ApplyConfig { config, at } => {
            editor.apply_config(config, at);
            rewrap_tick(editor, at)
        }
        EditorMsg::Resize { width, at } => {
            let mut config = editor.config().clone();
            config.wrap.width = width;
            editor.apply_config(config, at);
            rewrap_tick(editor, at)
        }
        EditorMsg::Tick(now) => {
            let changed = editor.poll_rewrap(now);
            let next = rewrap_tick(editor, now);
            match (changed, next) {
                (true, Some(next)) => Some(Cmd::batch(vec![Cmd::Redraw, next])),
                (true, None) => Some(Cmd::Redraw),
                (false, next) => next,
            }
        }
    }
}
