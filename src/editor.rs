//! Editor session: the document, its cursors and the settings that shape them.
//!
//! Every multi-cursor operation walks the cursor list in order and then
//! merges cursors that landed on the same position. Edits are not adjusted
//! for one another: a later cursor sees the document as already changed by
//! the cursors before it.

use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::EditorConfig;
use crate::cursor::Cursor;
use crate::cursors::CursorSet;
use crate::document::Document;
use crate::position::{Point, ScreenPoint};
use crate::rewrap::RewrapScheduler;
use crate::selection::Selection;
use crate::util::{char_len, slice_chars};
use crate::words::{UnicodeWords, WordBoundary};

/// What a pointer drag extends by, fixed by the click that started it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragGranularity {
    #[default]
    Char,
    /// Double click: the word under the click
    Word { start: Point, end: Point },
    /// Triple click: the logical line under the click
    Paragraph { start: Point, end: Point },
}

#[derive(Debug)]
pub struct Editor {
    pub document: Document,
    pub cursors: CursorSet,
    config: EditorConfig,
    words: Box<dyn WordBoundary>,
    rewrap: RewrapScheduler,
    drag: DragGranularity,
}

impl Editor {
    /// An editor over an empty one-line document
    pub fn new(config: EditorConfig) -> Self {
        Self::with_text("", config)
    }

    pub fn with_text(text: &str, config: EditorConfig) -> Self {
        let mut document = Self::empty_document(&config);
        document.load_text(text);
        Self::with_document(document, config)
    }

    /// Load the file at `path` into a new editor
    pub fn open(path: &Path, config: EditorConfig) -> Result<Self> {
        let mut document = Self::empty_document(&config);
        document.load_file(path)?;
        Ok(Self::with_document(document, config))
    }

    /// Load everything `reader` yields into a new editor
    pub fn from_reader(reader: impl Read, config: EditorConfig) -> Result<Self> {
        let mut document = Self::empty_document(&config);
        document.load_reader(reader)?;
        Ok(Self::with_document(document, config))
    }

    fn empty_document(config: &EditorConfig) -> Document {
        let mut document = Document::new(crate::wrap::NoWrap);
        document.set_breaker(config.wrap.breaker());
        document.set_line_limit(config.line_limit);
        document
    }

    fn with_document(document: Document, config: EditorConfig) -> Self {
        Self {
            document,
            cursors: CursorSet::default(),
            rewrap: RewrapScheduler::new(config.rewrap_debounce()),
            config,
            words: Box::new(UnicodeWords),
            drag: DragGranularity::Char,
        }
    }

    /// Replace the word-boundary oracle used by word motions
    pub fn with_word_boundary(mut self, words: impl WordBoundary + 'static) -> Self {
        self.words = Box::new(words);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn main_cursor(&self) -> &Cursor {
        self.cursors.main()
    }

    /// Make `config` current. A changed wrap setting swaps the line breaker
    /// and schedules a debounced full rewrap starting at `now`.
    pub fn apply_config(&mut self, config: EditorConfig, now: Instant) {
        let rewrap = config.wrap != self.config.wrap;
        self.document.set_line_limit(config.line_limit);
        self.rewrap.set_quiet_period(config.rewrap_debounce());
        if rewrap {
            self.document.set_breaker(config.wrap.breaker());
            self.rewrap.request(now);
            tracing::debug!(width = config.wrap.width, mode = ?config.wrap.mode, "wrap config changed");
        }
        self.config = config;
    }

    /// Advance a pending rewrap by one chunk. Returns true if rows changed.
    pub fn poll_rewrap(&mut self, now: Instant) -> bool {
        self.rewrap.poll(now, &mut self.document)
    }

    pub fn is_rewrapping(&self) -> bool {
        self.rewrap.is_active()
    }

    /// Delay until the next useful [`poll_rewrap`](Self::poll_rewrap)
    pub fn next_rewrap_delay(&self, now: Instant) -> Option<Duration> {
        self.rewrap.next_delay(now)
    }

    /// Drop any scheduled pass and rewrap everything now
    pub fn rewrap_now(&mut self) {
        self.rewrap.cancel();
        self.document.wrap_all();
    }
}

// =============================================================================
// Editing
// =============================================================================

/// Join the cursor's line onto the previous one, leaving the cursor at the seam
fn join_with_previous(cursor: &mut Cursor, document: &mut Document) {
    let line = cursor.position().line;
    if line == 0 {
        return;
    }
    let seam = Point::new(line - 1, document.line_length(line - 1));
    document.split_up(line);
    cursor.move_to(seam, false);
}

fn clamp_to_line(document: &Document, point: Point) -> Point {
    Point::new(point.line, point.column.min(document.line_length(point.line)))
}

impl Editor {
    /// Replace each selection with `text`. Line terminators in `text` split
    /// lines; the cursor ends up after the inserted text.
    pub fn insert_text(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| {
            cursor.delete_selection(document);
            let mut point = clamp_to_line(document, cursor.position());
            for (i, part) in text.split('\n').enumerate() {
                if i > 0 {
                    document.split_down(point.line, point.column);
                    point = Point::new(point.line + 1, 0);
                }
                document.insert(point.line, point.column, part);
                point.column += char_len(part);
            }
            cursor.move_to(point, false);
        });
    }

    /// Split the line at each cursor
    pub fn newline(&mut self) {
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| {
            cursor.delete_selection(document);
            let point = clamp_to_line(document, cursor.position());
            document.split_down(point.line, point.column);
            cursor.start_of_next_line();
        });
    }

    /// Delete the selection, or the char before each cursor
    pub fn backspace(&mut self) {
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| {
            if !cursor.selection.is_collapsed() {
                return cursor.delete_selection(document);
            }
            let Point { line, column } = clamp_to_line(document, cursor.position());
            if column == 0 {
                join_with_previous(cursor, document);
            } else {
                document.delete(line, column, -1);
                document.wrap_line(line);
                cursor.move_to(Point::new(line, column - 1), false);
            }
        });
    }

    /// Delete the selection, or the char after each cursor
    pub fn delete_forward(&mut self) {
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| {
            if !cursor.selection.is_collapsed() {
                return cursor.delete_selection(document);
            }
            let point = clamp_to_line(document, cursor.position());
            if point.column < document.line_length(point.line) {
                document.delete(point.line, point.column, 1);
                document.wrap_line(point.line);
            } else if point.line + 1 < document.line_count() {
                document.split_up(point.line + 1);
            }
            cursor.move_to(point, false);
        });
    }

    /// Delete the selection, or back to the start of the previous word
    pub fn delete_to_start_of_word(&mut self) {
        let Self {
            document,
            cursors,
            words,
            ..
        } = self;
        cursors.for_each(|cursor| {
            if !cursor.selection.is_collapsed() {
                return cursor.delete_selection(document);
            }
            let current = clamp_to_line(document, cursor.position());
            if current.column == 0 {
                join_with_previous(cursor, document);
            } else {
                cursor.move_to(current, false);
                cursor.move_to_start_of_word(document, &**words, false);
                cursor.move_to(current, true);
                cursor.delete_selection(document);
            }
        });
    }

    /// Delete the selection, or everything before the cursor on its line
    pub fn delete_to_start_of_line(&mut self) {
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| {
            if !cursor.selection.is_collapsed() {
                return cursor.delete_selection(document);
            }
            let Point { line, column } = clamp_to_line(document, cursor.position());
            if column == 0 {
                join_with_previous(cursor, document);
            } else {
                document.delete(line, column, -(column as isize));
                document.wrap_line(line);
                cursor.move_to(Point::new(line, 0), false);
            }
        });
    }

    /// Move the lines under each cursor up (`change < 0`) or down. Cursors
    /// whose lines are already at the edge stay put.
    pub fn swap_line(&mut self, change: isize) {
        if change == 0 {
            return;
        }
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| {
            let shift = |p: Point| Point::new(p.line.saturating_add_signed(change), p.column);
            let selection = cursor.selection;

            if selection.is_collapsed() {
                let line = selection.focus().line;
                if document.swap_line(line, change) {
                    cursor.move_to(shift(selection.focus()), false);
                }
                return;
            }

            let (start, end) = (selection.start().line, selection.end().line);
            let fits = if change < 0 {
                start >= change.unsigned_abs()
            } else {
                end.saturating_add_signed(change) < document.line_count()
            };
            if fits {
                document.swap_lines(start, end, change);
                cursor.move_selection(shift(selection.anchor()), shift(selection.focus()));
            }
        });
    }

    /// Text covered by `selection`, lines joined by `\n`
    pub fn selection_text(&self, selection: &Selection) -> String {
        let start = selection.start();
        let end = selection.end();
        let line = |l| self.document.line_content(l).unwrap_or_default();

        if start.line == end.line {
            return slice_chars(line(start.line), start.column, end.column).to_string();
        }

        let mut parts = Vec::with_capacity(end.line - start.line + 1);
        let first = line(start.line);
        parts.push(slice_chars(first, start.column, char_len(first)));
        for l in start.line + 1..end.line {
            parts.push(line(l));
        }
        parts.push(slice_chars(line(end.line), 0, end.column));
        parts.join("\n")
    }

    /// Text of every non-empty selection, joined by `\n`. None when nothing
    /// is selected.
    pub fn copy(&self) -> Option<String> {
        let texts: Vec<String> = self
            .cursors
            .iter()
            .filter(|c| !c.selection.is_collapsed())
            .map(|c| self.selection_text(&c.selection))
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }

    /// Copy, then delete every selection
    pub fn cut(&mut self) -> Option<String> {
        let text = self.copy()?;
        let Self {
            document, cursors, ..
        } = self;
        cursors.for_each(|cursor| cursor.delete_selection(document));
        Some(text)
    }
}

// =============================================================================
// Motion
// =============================================================================

impl Editor {
    pub fn move_up(&mut self, lines: usize, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_up(document, lines, select));
    }

    pub fn move_down(&mut self, lines: usize, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_down(document, lines, select));
    }

    pub fn move_left(&mut self, columns: usize, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_left(document, columns, select));
    }

    pub fn move_right(&mut self, columns: usize, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_right(document, columns, select));
    }

    pub fn move_to_start_of_line(&mut self, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_to_start_of_line(document, select));
    }

    pub fn move_to_end_of_line(&mut self, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_to_end_of_line(document, select));
    }

    pub fn move_to_start_of_word(&mut self, select: bool) {
        let document = &self.document;
        let words = self.words.as_ref();
        self.cursors
            .for_each(|cursor| cursor.move_to_start_of_word(document, words, select));
    }

    pub fn move_to_end_of_word(&mut self, select: bool) {
        let document = &self.document;
        let words = self.words.as_ref();
        self.cursors
            .for_each(|cursor| cursor.move_to_end_of_word(document, words, select));
    }

    pub fn move_to_start_of_paragraph(&mut self, select: bool) {
        self.cursors
            .for_each(|cursor| cursor.move_to_start_of_paragraph(select));
    }

    pub fn move_to_end_of_paragraph(&mut self, select: bool) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.move_to_end_of_paragraph(document, select));
    }

    /// Flatten to the main cursor and go to the document start
    pub fn move_to_top(&mut self, select: bool) {
        self.cursors.flatten();
        self.cursors.main_mut().move_to_top(select);
    }

    /// Flatten to the main cursor and go to the document end
    pub fn move_to_bottom(&mut self, select: bool) {
        self.cursors.flatten();
        self.cursors
            .main_mut()
            .move_to_bottom(&self.document, select);
    }

    pub fn select_all(&mut self) {
        self.cursors.flatten();
        let main = self.cursors.main_mut();
        main.move_to_top(false);
        main.move_to_bottom(&self.document, true);
    }

    pub fn select_word(&mut self) {
        let document = &self.document;
        let words = self.words.as_ref();
        self.cursors
            .for_each(|cursor| cursor.select_word(document, words));
    }

    pub fn select_paragraph(&mut self) {
        let document = &self.document;
        self.cursors
            .for_each(|cursor| cursor.select_paragraph(document));
    }

    /// Keep only the main cursor
    pub fn collapse_cursors(&mut self) {
        self.cursors.flatten();
    }
}

// =============================================================================
// Pointer input
// =============================================================================

impl Editor {
    /// Buffer position under a screen position, clamped into the document.
    /// Rows past the end resolve to the last position.
    pub fn resolve_screen_point(&self, screen: ScreenPoint) -> Point {
        let rows = self.document.screen_line_count();
        if rows == 0 || screen.line >= rows {
            return self.document.last_point();
        }
        let column = screen.column.min(self.document.screen_line_end(screen.line));
        self.document
            .screen_to_buffer(screen.line, column)
            .unwrap_or_else(|| self.document.last_point())
    }

    fn clamp_point(&self, point: Point) -> Point {
        let last = self.document.last_point();
        if point.line > last.line {
            return last;
        }
        clamp_to_line(&self.document, point)
    }

    /// Pointer press at `point`: flatten to one cursor and move it there.
    /// `count` is the click count (2 selects a word, 3 a paragraph);
    /// `extend` keeps the anchor.
    pub fn click(&mut self, point: Point, count: u8, extend: bool) {
        let point = self.clamp_point(point);
        self.cursors.flatten();
        let document = &self.document;
        let words = self.words.as_ref();
        let main = self.cursors.main_mut();
        main.move_to(point, extend);

        self.drag = match count {
            2 => {
                main.select_word(document, words);
                DragGranularity::Word {
                    start: main.selection.start(),
                    end: main.selection.end(),
                }
            }
            3 => {
                main.select_paragraph(document);
                DragGranularity::Paragraph {
                    start: main.selection.start(),
                    end: main.selection.end(),
                }
            }
            _ => DragGranularity::Char,
        };
    }

    /// Pointer drag to `point`, extending the main selection by the
    /// granularity of the click that started the drag
    pub fn drag(&mut self, point: Point) {
        let point = self.clamp_point(point);
        let document = &self.document;
        let words = self.words.as_ref();
        let main = self.cursors.main_mut();

        match self.drag {
            DragGranularity::Char => main.move_to(point, true),
            DragGranularity::Word { start, end } => {
                let mut probe = *main;
                probe.move_to(point, false);
                if point.before(start) {
                    probe.move_to_start_of_word(document, words, false);
                    main.move_selection(end, probe.position());
                } else {
                    probe.move_to_end_of_word(document, words, false);
                    main.move_selection(start, probe.position().max(end));
                }
            }
            DragGranularity::Paragraph { start, end } => {
                if point.before(start) {
                    main.move_selection(end, Point::new(point.line, 0));
                } else {
                    let line_end = Point::new(point.line, document.line_length(point.line));
                    main.move_selection(start, line_end.max(end));
                }
            }
        }
    }

    /// Pointer released
    pub fn release(&mut self) {
        self.drag = DragGranularity::Char;
    }

    /// Alt-click: add a cursor at `point` (existing cursors are kept)
    pub fn add_cursor(&mut self, point: Point) {
        let point = self.clamp_point(point);
        self.cursors.add_cursor(point);
    }

    /// Add a cursor at `point`, or remove the one already there
    pub fn toggle_cursor(&mut self, point: Point) {
        let point = self.clamp_point(point);
        self.cursors.toggle_cursor(point);
    }
}
