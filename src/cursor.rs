//! Cursor: a selection plus the motions that move it over a document.
//!
//! Every motion takes `select`: when true only the focus moves (extending the
//! selection), otherwise anchor and focus move together.

use crate::document::Document;
use crate::position::Point;
use crate::selection::{Direction, Selection};
use crate::util::char_len;
use crate::words::WordBoundary;

/// Opaque cursor identity, unique within a [`CursorSet`](crate::cursors::CursorSet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub id: CursorId,
    pub selection: Selection,
}

impl Cursor {
    pub fn new(id: CursorId, point: Point) -> Self {
        Self {
            id,
            selection: Selection::collapsed(point),
        }
    }

    /// Where the cursor is drawn (the selection focus)
    pub fn position(&self) -> Point {
        self.selection.focus()
    }

    /// Move the focus to `point`; collapse onto it unless `select`
    pub fn move_to(&mut self, point: Point, select: bool) {
        if select {
            self.selection.set_focus(point);
        } else {
            self.selection.set(point, point);
        }
    }

    /// Replace the selection with `anchor..focus`
    pub fn move_selection(&mut self, anchor: Point, focus: Point) {
        self.selection.set(anchor, focus);
    }

    /// Collapse onto column 0 of the next line
    pub fn start_of_next_line(&mut self) {
        let line = self.position().line + 1;
        self.move_to(Point::new(line, 0), false);
    }
}

// =============================================================================
// Vertical and horizontal motion
// =============================================================================

impl Cursor {
    /// Move up `lines` visual rows. On the first logical line, go to the
    /// document start.
    pub fn move_up(&mut self, document: &Document, lines: usize, select: bool) {
        let pos = self.position();
        let Some(screen) = document.buffer_to_screen(pos.line, pos.column) else {
            return;
        };

        let target = if pos.line == 0 {
            Point::zero()
        } else {
            let line = screen.line.saturating_sub(lines);
            let column = screen.column.min(document.screen_line_end(line));
            let Some(point) = document.screen_to_buffer(line, column) else {
                return;
            };
            point
        };
        self.move_to(target, select);
    }

    /// Move down `lines` visual rows. On the last logical line, go to the
    /// document end.
    pub fn move_down(&mut self, document: &Document, lines: usize, select: bool) {
        let pos = self.position();
        let Some(screen) = document.buffer_to_screen(pos.line, pos.column) else {
            return;
        };
        let last_row = document.screen_line_count().saturating_sub(1);

        let target = if pos.line + 1 >= document.line_count() {
            document.last_point()
        } else {
            let line = screen.line.saturating_add(lines).min(last_row);
            let column = screen.column.min(document.screen_line_end(line));
            let Some(point) = document.screen_to_buffer(line, column) else {
                return;
            };
            point
        };
        self.move_to(target, select);
    }

    /// Move right `columns` chars, wrapping onto following lines.
    ///
    /// A non-collapsed selection collapses to its end instead.
    pub fn move_right(&mut self, document: &Document, columns: usize, select: bool) {
        if !self.selection.is_collapsed() && !select {
            let end = self.selection.end();
            return self.move_to(end, false);
        }

        let last = document.last_point();
        let mut point = self.position();
        if point == last {
            return;
        }

        let mut remaining = columns;
        while remaining > 0 {
            let len = document.line_length(point.line);
            let available = len.saturating_sub(point.column);
            if remaining <= available {
                point.column += remaining;
                break;
            }
            if point.line >= last.line {
                point.column = len;
                break;
            }
            remaining -= available + 1;
            point = Point::new(point.line + 1, 0);
        }
        self.move_to(point, select);
    }

    /// Move left `columns` chars, wrapping onto preceding lines.
    ///
    /// A non-collapsed selection collapses to its start instead.
    pub fn move_left(&mut self, document: &Document, columns: usize, select: bool) {
        if !self.selection.is_collapsed() && !select {
            let start = self.selection.start();
            return self.move_to(start, false);
        }

        let mut point = self.position();
        if point == Point::zero() {
            return;
        }

        let mut remaining = columns;
        while remaining > 0 {
            if remaining <= point.column {
                point.column -= remaining;
                break;
            }
            if point.line == 0 {
                point.column = 0;
                break;
            }
            remaining -= point.column + 1;
            point.line -= 1;
            point.column = document.line_length(point.line);
        }
        self.move_to(point, select);
    }

    pub fn move_to_top(&mut self, select: bool) {
        self.move_to(Point::zero(), select);
    }

    pub fn move_to_bottom(&mut self, document: &Document, select: bool) {
        self.move_to(document.last_point(), select);
    }
}

// =============================================================================
// Line, word and paragraph boundaries
// =============================================================================

impl Cursor {
    /// Start of the current visual row
    pub fn move_to_start_of_line(&mut self, document: &Document, select: bool) {
        let pos = self.position();
        let Some(screen) = document.buffer_to_screen(pos.line, pos.column) else {
            return;
        };
        if let Some(point) = document.screen_to_buffer(screen.line, 0) {
            self.move_to(point, select);
        }
    }

    /// End of the current visual row
    pub fn move_to_end_of_line(&mut self, document: &Document, select: bool) {
        let pos = self.position();
        let Some(screen) = document.buffer_to_screen(pos.line, pos.column) else {
            return;
        };
        let column = document.screen_line_end(screen.line);
        if let Some(point) = document.screen_to_buffer(screen.line, column) {
            self.move_to(point, select);
        }
    }

    /// Start of the previous word, possibly on the line above
    pub fn move_to_start_of_word(
        &mut self,
        document: &Document,
        words: &dyn WordBoundary,
        select: bool,
    ) {
        let pos = self.position();
        let line = document.line_content(pos.line).unwrap_or_default();

        let target = if pos.line > 0 {
            let prev = document.line_content(pos.line - 1).unwrap_or_default();
            let prev_len = char_len(prev);
            let text = format!("{prev}\n{line}");
            let column = words.boundary(&text, Direction::Backward, pos.column + prev_len + 1);
            if column <= prev_len {
                Point::new(pos.line - 1, column)
            } else {
                Point::new(pos.line, column - prev_len - 1)
            }
        } else {
            Point::new(pos.line, words.boundary(line, Direction::Backward, pos.column))
        };
        self.move_to(target, select);
    }

    /// End of the next word, possibly on the line below
    pub fn move_to_end_of_word(
        &mut self,
        document: &Document,
        words: &dyn WordBoundary,
        select: bool,
    ) {
        let pos = self.position();
        if pos == document.last_point() {
            return self.move_to(pos, select);
        }

        let line = document.line_content(pos.line).unwrap_or_default();
        let target = if pos.line + 1 < document.line_count() {
            let next = document.line_content(pos.line + 1).unwrap_or_default();
            let len = char_len(line);
            let text = format!("{line}\n{next}");
            let column = words.boundary(&text, Direction::Forward, pos.column);
            if column > len {
                Point::new(pos.line + 1, column - len - 1)
            } else {
                Point::new(pos.line, column)
            }
        } else {
            Point::new(pos.line, words.boundary(line, Direction::Forward, pos.column))
        };
        self.move_to(target, select);
    }

    /// Column 0 of the logical line
    pub fn move_to_start_of_paragraph(&mut self, select: bool) {
        let line = self.position().line;
        self.move_to(Point::new(line, 0), select);
    }

    /// End of the logical line
    pub fn move_to_end_of_paragraph(&mut self, document: &Document, select: bool) {
        let line = self.position().line;
        self.move_to(Point::new(line, document.line_length(line)), select);
    }

    pub fn select_word(&mut self, document: &Document, words: &dyn WordBoundary) {
        self.move_to_start_of_word(document, words, false);
        self.move_to_end_of_word(document, words, true);
    }

    pub fn select_paragraph(&mut self, document: &Document) {
        self.move_to_start_of_paragraph(false);
        self.move_to_end_of_paragraph(document, true);
    }
}

// =============================================================================
// Deletion
// =============================================================================

impl Cursor {
    /// Delete the selected text and collapse onto the selection start.
    /// Does nothing for a collapsed selection.
    pub fn delete_selection(&mut self, document: &mut Document) {
        if self.selection.is_collapsed() {
            return;
        }
        let start = self.selection.start();
        let end = self.selection.end();

        if start.line == end.line {
            let change = end.column.saturating_sub(start.column) as isize;
            document.delete(start.line, start.column, change);
            document.wrap_line(start.line);
        } else {
            // Tail of the first line
            let len = document.line_length(start.line);
            let change = -(len.saturating_sub(start.column) as isize);
            document.delete(start.line, len, change);
            document.wrap_line(start.line);

            // Lines fully inside the selection
            for _ in start.line + 1..end.line {
                document.remove_line(start.line + 1);
            }

            // Head of the last line, then join it onto the first
            let last = start.line + 1;
            document.delete(last, 0, end.column as isize);
            document.split_up(last);
        }

        self.move_to(start, false);
    }
}
