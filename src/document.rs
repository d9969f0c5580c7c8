//! Document model - the chunked line buffer and the buffer/screen mapping
//!
//! Lines are grouped into [`Chunk`]s of bounded size so that an edit only
//! rewraps inside its owning chunk. Logical line indices and screen row
//! indices are both contiguous across chunk boundaries.

use std::fmt;

use crate::chunk::{Chunk, ScreenDelta};
use crate::loader::StreamLoader;
use crate::position::{Point, ScreenPoint};
use crate::util::{byte_offset, char_len, slice_chars};
use crate::wrap::LineBreaker;

/// Default cap on lines per chunk
pub const DEFAULT_LINE_LIMIT: usize = 5000;

/// Where a logical line lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// Position of the owning chunk in the chunk sequence
    pub chunk: usize,
    /// Index of the line inside that chunk
    pub index: usize,
}

/// Which logical line and which wrapped segment of it own a screen row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLineInfo<'a> {
    /// Raw text of the owning logical line
    pub text: &'a str,
    /// Logical line index
    pub line: usize,
    /// First column of the segment
    pub start_column: usize,
    /// One past the last column of the segment
    pub end_column: usize,
}

impl<'a> ScreenLineInfo<'a> {
    /// Text of this visual row
    pub fn content(&self) -> &'a str {
        slice_chars(self.text, self.start_column, self.end_column)
    }
}

/// One visual row, as yielded by [`Document::screen_lines`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLine<'a> {
    pub screen_line: usize,
    pub line: usize,
    pub start_column: usize,
    pub text: &'a str,
}

/// Resolved position of a screen row inside the chunk structure
#[derive(Debug, Clone, Copy)]
struct RowCursor {
    chunk: usize,
    index: usize,
    segment: usize,
    line: usize,
}

/// The text buffer: an ordered sequence of chunks plus aggregate counts.
pub struct Document {
    chunks: Vec<Chunk>,
    /// Total logical lines
    length: usize,
    /// Total visual rows
    screen_length: usize,
    breaker: Box<dyn LineBreaker>,
    line_limit: usize,
    /// Lowest chunk index whose position shifted since the last take
    restructured: Option<usize>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("chunks", &self.chunks.len())
            .field("length", &self.length)
            .field("screen_length", &self.screen_length)
            .field("breaker", &self.breaker)
            .field("line_limit", &self.line_limit)
            .field("restructured", &self.restructured)
            .finish()
    }
}

impl Document {
    /// Create an empty document with no lines (ready for loading)
    pub fn new(breaker: impl LineBreaker + 'static) -> Self {
        Self {
            chunks: Vec::new(),
            length: 0,
            screen_length: 0,
            breaker: Box::new(breaker),
            line_limit: DEFAULT_LINE_LIMIT,
            restructured: None,
        }
    }

    /// Create a document with initial text
    pub fn from_text(text: &str, breaker: impl LineBreaker + 'static) -> Self {
        let mut document = Self::new(breaker);
        document.load_text(text);
        document
    }

    /// Set the chunk cap used by subsequent appends and loads
    pub fn with_line_limit(mut self, line_limit: usize) -> Self {
        self.line_limit = line_limit.max(1);
        self
    }

    pub fn line_limit(&self) -> usize {
        self.line_limit
    }

    /// Change the chunk cap. Existing chunks keep their size until they
    /// grow past twice the new cap.
    pub fn set_line_limit(&mut self, line_limit: usize) {
        self.line_limit = line_limit.max(1);
    }

    /// Number of logical lines
    pub fn line_count(&self) -> usize {
        self.length
    }

    /// Number of visual rows
    pub fn screen_line_count(&self) -> usize {
        self.screen_length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn breaker(&self) -> &dyn LineBreaker {
        self.breaker.as_ref()
    }

    /// Take the lowest chunk index that moved since the last call. Chunk
    /// splits and removals shift every later chunk; a chunk-by-chunk pass
    /// resumes from here so no chunk is skipped.
    pub fn take_restructured(&mut self) -> Option<usize> {
        self.restructured.take()
    }

    fn mark_restructured(&mut self, index: usize) {
        self.restructured = Some(self.restructured.map_or(index, |i| i.min(index)));
    }

    /// Swap the line breaker. Existing breaks stay until rewrapped.
    pub fn set_breaker(&mut self, breaker: Box<dyn LineBreaker>) {
        self.breaker = breaker;
    }

    /// Append the lines of `text` (split on CR, LF and CRLF)
    pub fn load_text(&mut self, text: &str) {
        let mut loader = StreamLoader::new();
        loader.feed(self, text);
        loader.finish(self);
    }

    /// Full document text, lines joined by `\n`
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.chunks.iter().flat_map(|c| c.lines()).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }

    fn apply_screen_delta(&mut self, delta: ScreenDelta) {
        self.screen_length = self.screen_length.saturating_add_signed(delta);
    }
}

// =============================================================================
// Lookups and coordinate mapping
// =============================================================================

impl Document {
    /// Find the chunk owning logical line `line`
    pub fn line_info(&self, line: usize) -> Option<LineInfo> {
        let mut chunk_start = 0;
        for (chunk, c) in self.chunks.iter().enumerate() {
            if line < chunk_start + c.len() {
                return Some(LineInfo {
                    chunk,
                    index: line - chunk_start,
                });
            }
            chunk_start += c.len();
        }
        tracing::warn!(line, length = self.length, "Did not find buffer line");
        None
    }

    fn locate_screen_line(&self, screen_line: usize) -> Option<RowCursor> {
        let mut chunk_screen_start = 0;
        let mut chunk_start = 0;

        for (chunk, c) in self.chunks.iter().enumerate() {
            let chunk_screen_end = chunk_screen_start + c.screen_length();
            if screen_line < chunk_screen_end {
                let offset = screen_line - chunk_screen_start;
                let mut row = 0;
                for (index, line_breaks) in c.breaks().iter().enumerate() {
                    let rows = line_breaks.len() + 1;
                    if offset < row + rows {
                        return Some(RowCursor {
                            chunk,
                            index,
                            segment: offset - row,
                            line: chunk_start + index,
                        });
                    }
                    row += rows;
                }
            }
            chunk_screen_start = chunk_screen_end;
            chunk_start += c.len();
        }
        None
    }

    fn segment_bounds(text: &str, breaks: &[usize], segment: usize) -> (usize, usize) {
        let start = if segment == 0 { 0 } else { breaks[segment - 1] };
        let end = breaks
            .get(segment)
            .copied()
            .unwrap_or_else(|| char_len(text));
        (start, end)
    }

    /// Find the logical line and wrapped segment owning screen row `screen_line`
    pub fn screen_line_info(&self, screen_line: usize) -> Option<ScreenLineInfo<'_>> {
        let Some(row) = self.locate_screen_line(screen_line) else {
            tracing::warn!(
                screen_line,
                screen_length = self.screen_length,
                "Did not find screen line"
            );
            return None;
        };
        let chunk = &self.chunks[row.chunk];
        let text = &chunk.lines()[row.index];
        let (start_column, end_column) =
            Self::segment_bounds(text, &chunk.breaks()[row.index], row.segment);
        Some(ScreenLineInfo {
            text,
            line: row.line,
            start_column,
            end_column,
        })
    }

    /// Raw text of logical line `line`
    pub fn line_content(&self, line: usize) -> Option<&str> {
        let info = self.line_info(line)?;
        self.chunks[info.chunk].line(info.index)
    }

    /// Length in chars of logical line `line` (0 when out of range)
    pub fn line_length(&self, line: usize) -> usize {
        self.line_content(line).map_or(0, char_len)
    }

    /// Text of visual row `screen_line`
    pub fn screen_line_content(&self, screen_line: usize) -> Option<&str> {
        self.screen_line_info(screen_line).map(|info| info.content())
    }

    /// Length in chars of visual row `screen_line` (0 when out of range)
    pub fn screen_line_length(&self, screen_line: usize) -> usize {
        self.screen_line_info(screen_line)
            .map_or(0, |info| info.end_column.saturating_sub(info.start_column))
    }

    /// Last screen column on row `screen_line` that maps back onto that row.
    ///
    /// For a row followed by another segment of the same line this is one
    /// before the break, since the break column itself starts the next row.
    pub fn screen_line_end(&self, screen_line: usize) -> usize {
        let Some(info) = self.screen_line_info(screen_line) else {
            return 0;
        };
        let len = info.end_column.saturating_sub(info.start_column);
        if info.end_column < char_len(info.text) {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    /// Last position in the document
    pub fn last_point(&self) -> Point {
        match self.length {
            0 => Point::zero(),
            n => Point::new(n - 1, self.line_length(n - 1)),
        }
    }

    /// Convert a screen position to a buffer position
    pub fn screen_to_buffer(&self, screen_line: usize, screen_column: usize) -> Option<Point> {
        let info = self.screen_line_info(screen_line)?;
        Some(Point::new(info.line, info.start_column + screen_column))
    }

    /// Convert a buffer position to a screen position.
    ///
    /// `line` is clamped into the document. A column exactly at a break offset
    /// belongs to the segment that break starts.
    pub fn buffer_to_screen(&self, line: usize, column: usize) -> Option<ScreenPoint> {
        if self.length == 0 {
            return None;
        }
        let line = line.min(self.length - 1);
        let info = self.line_info(line)?;
        let chunk = &self.chunks[info.chunk];

        let mut screen_line: usize = self.chunks[..info.chunk]
            .iter()
            .map(Chunk::screen_length)
            .sum();
        screen_line += (0..info.index).map(|i| chunk.line_rows(i)).sum::<usize>();

        let line_breaks = chunk.line_breaks(info.index).unwrap_or(&[]);
        let segment = line_breaks.partition_point(|&b| b <= column);
        let segment_start = if segment == 0 {
            0
        } else {
            line_breaks[segment - 1]
        };

        Some(ScreenPoint::new(
            screen_line + segment,
            column - segment_start,
        ))
    }

    /// Iterate visual rows starting at `screen_line`.
    ///
    /// Costs one lookup up front, then one step per row.
    pub fn screen_lines(&self, screen_line: usize) -> ScreenLines<'_> {
        let row = self.locate_screen_line(screen_line).unwrap_or(RowCursor {
            chunk: self.chunks.len(),
            index: 0,
            segment: 0,
            line: self.length,
        });
        ScreenLines {
            document: self,
            row,
            screen_line,
        }
    }
}

/// Iterator over consecutive visual rows
pub struct ScreenLines<'a> {
    document: &'a Document,
    row: RowCursor,
    screen_line: usize,
}

impl<'a> Iterator for ScreenLines<'a> {
    type Item = ScreenLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let chunk = self.document.chunks.get(self.row.chunk)?;
            if self.row.index >= chunk.len() {
                self.row.chunk += 1;
                self.row.index = 0;
                self.row.segment = 0;
                continue;
            }

            let text = &chunk.lines()[self.row.index];
            let line_breaks = &chunk.breaks()[self.row.index];
            let (start, end) = Document::segment_bounds(text, line_breaks, self.row.segment);
            let item = ScreenLine {
                screen_line: self.screen_line,
                line: self.row.line,
                start_column: start,
                text: slice_chars(text, start, end),
            };

            self.screen_line += 1;
            if self.row.segment < line_breaks.len() {
                self.row.segment += 1;
            } else {
                self.row.segment = 0;
                self.row.index += 1;
                self.row.line += 1;
            }
            return Some(item);
        }
    }
}

// =============================================================================
// Wrapping
// =============================================================================

impl Document {
    /// Rewrap logical line `line`
    pub fn wrap_line(&mut self, line: usize) {
        let Some(info) = self.line_info(line) else {
            return;
        };
        let delta = self.chunks[info.chunk].wrap_line(info.index, self.breaker.as_ref());
        self.apply_screen_delta(delta);
    }

    /// Rewrap the logical line owning visual row `screen_line`
    pub fn wrap_screen_line(&mut self, screen_line: usize) {
        if let Some(line) = self.screen_line_info(screen_line).map(|info| info.line) {
            self.wrap_line(line);
        }
    }

    /// Rewrap every line of chunk `index`. Returns false past the last chunk.
    pub fn wrap_chunk(&mut self, index: usize) -> bool {
        let Some(chunk) = self.chunks.get_mut(index) else {
            return false;
        };
        let delta = chunk.wrap(self.breaker.as_ref());
        self.apply_screen_delta(delta);
        tracing::trace!(chunk = index, delta, "rewrapped chunk");
        true
    }

    /// Rewrap the whole document synchronously
    pub fn wrap_all(&mut self) {
        for index in 0..self.chunks.len() {
            self.wrap_chunk(index);
        }
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl Document {
    /// Insert `text` into line `line` at `column` (past the end appends)
    pub fn insert(&mut self, line: usize, column: usize, text: &str) {
        let Some(info) = self.line_info(line) else {
            return;
        };
        let chunk = &mut self.chunks[info.chunk];
        let mut modified = chunk.lines()[info.index].clone();
        let at = byte_offset(&modified, column);
        modified.insert_str(at, text);
        let delta = chunk.set_line(info.index, modified, self.breaker.as_ref());
        self.apply_screen_delta(delta);
    }

    /// Append `text` to the end of line `line`
    pub fn append(&mut self, line: usize, text: &str) {
        self.insert(line, usize::MAX, text);
    }

    /// Delete `|change|` chars on line `line`: forward from `column` when
    /// positive, backward from `column` when negative.
    ///
    /// Does not rewrap; the caller rewraps once its cursor motion is done.
    pub fn delete(&mut self, line: usize, column: usize, change: isize) {
        if change == 0 {
            return;
        }
        if change > 0 {
            return self.delete(line, column.saturating_add(change.unsigned_abs()), -change);
        }

        let Some(info) = self.line_info(line) else {
            return;
        };
        let chunk = &mut self.chunks[info.chunk];
        let current = &chunk.lines()[info.index];
        let len = char_len(current);
        let end = column.min(len);
        let start = column.saturating_sub(change.unsigned_abs()).min(end);

        let mut modified = String::with_capacity(current.len());
        modified.push_str(slice_chars(current, 0, start));
        modified.push_str(slice_chars(current, end, len));
        chunk.set_line_unwrapped(info.index, modified);
    }

    /// Append a new line at the end of the document, returning its index
    pub fn append_line(&mut self, text: impl Into<String>) -> usize {
        let needs_chunk = self
            .chunks
            .last()
            .map_or(true, |c| c.len() >= self.line_limit);
        if needs_chunk {
            self.chunks.push(Chunk::default());
        }
        let last = self.chunks.len() - 1;
        let delta = self.chunks[last].append(text.into(), self.breaker.as_ref());
        self.length += 1;
        self.apply_screen_delta(delta);
        self.length - 1
    }

    /// Insert a line at `index`, shifting later lines down. Past the end
    /// appends. Returns the index the line landed at.
    pub fn insert_line(&mut self, index: usize, text: impl Into<String>) -> usize {
        if index >= self.length {
            return self.append_line(text);
        }
        let Some(info) = self.line_info(index) else {
            return index;
        };
        let delta = self.chunks[info.chunk].insert(info.index, text.into(), self.breaker.as_ref());
        self.length += 1;
        self.apply_screen_delta(delta);

        let len = self.chunks[info.chunk].len();
        if len > self.line_limit * 2 {
            let tail = self.chunks[info.chunk].split_off(len / 2);
            self.chunks.insert(info.chunk + 1, tail);
            self.mark_restructured(info.chunk + 1);
            tracing::debug!(chunk = info.chunk, "split oversized chunk");
        }
        index
    }

    /// Remove line `index`, returning its text
    pub fn remove_line(&mut self, index: usize) -> Option<String> {
        let info = self.line_info(index)?;
        let (text, delta) = self.chunks[info.chunk].remove(info.index)?;
        self.length -= 1;
        self.apply_screen_delta(delta);

        if self.chunks[info.chunk].is_empty() && self.chunks.len() > 1 {
            self.chunks.remove(info.chunk);
            self.mark_restructured(info.chunk);
        }
        Some(text)
    }

    /// Break line `line` in two at `column`; the right part becomes the next line
    pub fn split_down(&mut self, line: usize, column: usize) {
        let Some(info) = self.line_info(line) else {
            return;
        };
        let chunk = &mut self.chunks[info.chunk];
        let current = &chunk.lines()[info.index];
        let at = byte_offset(current, column);
        let before = current[..at].to_string();
        let after = current[at..].to_string();

        let delta = chunk.set_line(info.index, before, self.breaker.as_ref());
        self.apply_screen_delta(delta);
        self.insert_line(line + 1, after);
    }

    /// Join line `line` onto the end of line `line - 1`. No-op for line 0.
    pub fn split_up(&mut self, line: usize) {
        if line == 0 {
            return;
        }
        if let Some(text) = self.remove_line(line) {
            self.append(line - 1, &text);
        }
    }

    /// Move line `index` by `change` positions. Returns false at the edges.
    pub fn swap_line(&mut self, index: usize, change: isize) -> bool {
        if change == 0 || index >= self.length {
            return false;
        }
        if index == 0 && change < 0 {
            return false;
        }
        if index == self.length - 1 && change > 0 {
            return false;
        }

        let new_index = index.saturating_add_signed(change);
        let Some(text) = self.remove_line(index) else {
            return false;
        };
        self.insert_line(new_index, text);
        true
    }

    /// Move lines `start..=end` by `change` positions, one line at a time in
    /// an order that keeps pending indices valid.
    pub fn swap_lines(&mut self, start: usize, end: usize, change: isize) {
        if change < 0 {
            for i in start..=end {
                self.swap_line(i, change);
            }
        } else {
            for i in (start..=end).rev() {
                self.swap_line(i, change);
            }
        }
    }

    /// Check structural invariants (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        for chunk in &self.chunks {
            chunk.assert_invariants();
        }
        let length: usize = self.chunks.iter().map(Chunk::len).sum();
        let screen_length: usize = self.chunks.iter().map(Chunk::screen_length).sum();
        debug_assert_eq!(self.length, length, "document length drifted");
        debug_assert_eq!(
            self.screen_length, screen_length,
            "document screen length drifted"
        );
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
