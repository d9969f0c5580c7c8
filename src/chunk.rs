//! A bounded run of logical lines and their soft-wrap breaks.
//!
//! Every mutation returns the signed change in visual rows it caused, so the
//! owning [`Document`](crate::document::Document) can keep its aggregate
//! `screen_length` in step without rescanning.

use crate::wrap::LineBreaker;

/// Change in visual row count caused by a chunk mutation
pub type ScreenDelta = isize;

#[derive(Debug, Clone, Default)]
pub struct Chunk {
    lines: Vec<String>,
    /// One ascending break list per line; empty means the line does not wrap
    breaks: Vec<Vec<usize>>,
    screen_length: usize,
}

#[inline]
fn rows(breaks: &[usize]) -> usize {
    breaks.len() + 1
}

#[inline]
fn delta(after: usize, before: usize) -> ScreenDelta {
    after as isize - before as isize
}

impl Chunk {
    /// Build a chunk and wrap every line
    pub fn new(lines: Vec<String>, breaker: &dyn LineBreaker) -> Self {
        let mut chunk = Self {
            breaks: vec![Vec::new(); lines.len()],
            screen_length: lines.len(),
            lines,
        };
        chunk.wrap(breaker);
        chunk
    }

    /// Number of logical lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of visual rows
    pub fn screen_length(&self) -> usize {
        self.screen_length
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn breaks(&self) -> &[Vec<usize>] {
        &self.breaks
    }

    pub fn line_breaks(&self, index: usize) -> Option<&[usize]> {
        self.breaks.get(index).map(Vec::as_slice)
    }

    /// Visual rows occupied by line `index`
    pub fn line_rows(&self, index: usize) -> usize {
        self.breaks.get(index).map_or(1, |b| rows(b))
    }

    /// Recompute breaks for every line and recount the rows from scratch
    pub fn wrap(&mut self, breaker: &dyn LineBreaker) -> ScreenDelta {
        let before = self.screen_length;
        self.breaks = self.lines.iter().map(|l| breaker.line_breaks(l)).collect();
        self.screen_length = self.breaks.iter().map(|b| rows(b)).sum();
        delta(self.screen_length, before)
    }

    /// Recompute breaks for a single line
    pub fn wrap_line(&mut self, index: usize, breaker: &dyn LineBreaker) -> ScreenDelta {
        let Some(line) = self.lines.get(index) else {
            return 0;
        };
        let new_breaks = breaker.line_breaks(line);
        let d = delta(rows(&new_breaks), rows(&self.breaks[index]));
        self.breaks[index] = new_breaks;
        self.apply(d);
        d
    }

    /// Add a line at the end
    pub fn append(&mut self, text: String, breaker: &dyn LineBreaker) -> ScreenDelta {
        let line_breaks = breaker.line_breaks(&text);
        let d = rows(&line_breaks) as isize;
        self.lines.push(text);
        self.breaks.push(line_breaks);
        self.apply(d);
        d
    }

    /// Insert a line before `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, text: String, breaker: &dyn LineBreaker) -> ScreenDelta {
        let index = index.min(self.lines.len());
        let line_breaks = breaker.line_breaks(&text);
        let d = rows(&line_breaks) as isize;
        self.lines.insert(index, text);
        self.breaks.insert(index, line_breaks);
        self.apply(d);
        d
    }

    /// Remove line `index`, returning its text
    pub fn remove(&mut self, index: usize) -> Option<(String, ScreenDelta)> {
        if index >= self.lines.len() {
            return None;
        }
        let text = self.lines.remove(index);
        let line_breaks = self.breaks.remove(index);
        let d = -(rows(&line_breaks) as isize);
        self.apply(d);
        Some((text, d))
    }

    /// Replace the text of line `index` and rewrap it
    pub fn set_line(&mut self, index: usize, text: String, breaker: &dyn LineBreaker) -> ScreenDelta {
        if index >= self.lines.len() {
            return 0;
        }
        self.lines[index] = text;
        self.wrap_line(index, breaker)
    }

    /// Replace the text of line `index` without rewrapping.
    ///
    /// Leaves the line's breaks describing the old text until the caller
    /// rewraps it; no visual row count changes.
    pub(crate) fn set_line_unwrapped(&mut self, index: usize, text: String) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text;
        }
    }

    /// Split off lines `[at, len)` into a new chunk, returning it
    pub fn split_off(&mut self, at: usize) -> Chunk {
        let at = at.min(self.lines.len());
        let lines = self.lines.split_off(at);
        let breaks = self.breaks.split_off(at);
        let moved: usize = breaks.iter().map(|b| rows(b)).sum();
        self.screen_length -= moved;
        Chunk {
            lines,
            breaks,
            screen_length: moved,
        }
    }

    fn apply(&mut self, d: ScreenDelta) {
        self.screen_length = self.screen_length.saturating_add_signed(d);
    }

    /// Check line/break lockstep and the row count (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        assert_eq!(
            self.lines.len(),
            self.breaks.len(),
            "breaks must have one entry per line"
        );
        let counted: usize = self.breaks.iter().map(|b| rows(b)).sum();
        debug_assert_eq!(self.screen_length, counted, "chunk screen length drifted");
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
