//! Soft-wrap capabilities: text measurement and line-break computation.
//!
//! The buffer never measures text itself. It asks a [`LineBreaker`] for the
//! break offsets of a line and stores them; the breaker in turn is usually a
//! [`MeasuredWrap`] over some [`TextMeasure`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::util::char_len;

/// Tab width in cells for monospace measurement
pub const TABULATOR_WIDTH: usize = 4;

/// Measures the rendered width of a run of text.
///
/// Must be deterministic and additive: `measure(a + b) == measure(a) + measure(b)`.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

/// Computes soft-wrap break offsets for one logical line.
///
/// Returned offsets are char columns, strictly ascending, each in
/// `(0, line_len)`. A break value is the first column of the next segment.
/// Empty or narrow lines yield an empty list.
pub trait LineBreaker: fmt::Debug {
    fn line_breaks(&self, text: &str) -> Vec<usize>;
}

impl<T: LineBreaker + ?Sized> LineBreaker for Box<T> {
    fn line_breaks(&self, text: &str) -> Vec<usize> {
        (**self).line_breaks(text)
    }
}

// =============================================================================
// Measurement
// =============================================================================

/// Monospace measurement: terminal cell widths times a fixed cell width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub cell_width: f32,
}

impl CellMeasure {
    pub fn new(cell_width: f32) -> Self {
        Self { cell_width }
    }

    fn cells(ch: char) -> usize {
        if ch == '\t' {
            TABULATOR_WIDTH
        } else {
            UnicodeWidthChar::width(ch).unwrap_or(0)
        }
    }
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self { cell_width: 1.0 }
    }
}

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> f32 {
        let cells: usize = text.chars().map(Self::cells).sum();
        cells as f32 * self.cell_width
    }
}

/// Per-char glyph measurement with a cache.
///
/// When `'i'` and `'W'` measure the same the font is treated as monospace and
/// every char costs that width without consulting the glyph function again.
pub struct CachedMeasure<F> {
    glyph: F,
    cache: RefCell<HashMap<char, f32>>,
    monospace_width: Option<f32>,
}

impl<F: Fn(char) -> f32> CachedMeasure<F> {
    pub fn new(glyph: F) -> Self {
        let measure = Self {
            glyph,
            cache: RefCell::new(HashMap::new()),
            monospace_width: None,
        };
        let i = measure.char_width('i');
        let w = measure.char_width('W');
        let monospace_width = (i == w).then_some(i);
        if monospace_width.is_some() {
            tracing::debug!(width = i, "monospace font detected");
        }
        Self {
            monospace_width,
            ..measure
        }
    }

    pub fn is_monospace(&self) -> bool {
        self.monospace_width.is_some()
    }

    fn char_width(&self, ch: char) -> f32 {
        if let Some(width) = self.cache.borrow().get(&ch) {
            return *width;
        }
        let width = (self.glyph)(ch);
        self.cache.borrow_mut().insert(ch, width);
        width
    }
}

impl<F: Fn(char) -> f32> TextMeasure for CachedMeasure<F> {
    fn measure(&self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        if let Some(width) = self.monospace_width {
            return char_len(text) as f32 * width;
        }
        text.chars().map(|ch| self.char_width(ch)).sum()
    }
}

impl<F> fmt::Debug for CachedMeasure<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedMeasure")
            .field("cached", &self.cache.borrow().len())
            .field("monospace_width", &self.monospace_width)
            .finish()
    }
}

// =============================================================================
// Line breaking
// =============================================================================

/// Never wraps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWrap;

impl LineBreaker for NoWrap {
    fn line_breaks(&self, _text: &str) -> Vec<usize> {
        Vec::new()
    }
}

/// Width-budget wrapping over Unicode word-bound segments.
///
/// Whitespace hangs at the end of a row; a segment wider than the whole
/// budget is split at grapheme boundaries.
#[derive(Debug, Clone)]
pub struct MeasuredWrap<M> {
    measure: M,
    max_width: f32,
}

impl<M: TextMeasure> MeasuredWrap<M> {
    pub fn new(measure: M, max_width: f32) -> Self {
        Self { measure, max_width }
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }
}

impl MeasuredWrap<CellMeasure> {
    /// Wrap at `columns` monospace cells
    pub fn monospace(columns: usize) -> Self {
        Self::new(CellMeasure::default(), columns as f32)
    }
}

impl<M: TextMeasure + fmt::Debug> LineBreaker for MeasuredWrap<M> {
    fn line_breaks(&self, text: &str) -> Vec<usize> {
        if text.is_empty() || self.measure.measure(text) < self.max_width {
            return Vec::new();
        }

        let mut breaks = Vec::new();
        let mut width = 0.0f32;
        let mut column = 0usize;

        for segment in text.split_word_bounds() {
            let segment_width = self.measure.measure(segment);

            if segment.chars().all(char::is_whitespace) {
                width += segment_width;
                column += char_len(segment);
                continue;
            }

            if width > 0.0 && width + segment_width > self.max_width {
                breaks.push(column);
                width = 0.0;
            }

            if segment_width > self.max_width {
                for grapheme in segment.graphemes(true) {
                    let grapheme_width = self.measure.measure(grapheme);
                    if width > 0.0 && width + grapheme_width > self.max_width {
                        breaks.push(column);
                        width = 0.0;
                    }
                    width += grapheme_width;
                    column += char_len(grapheme);
                }
            } else {
                width += segment_width;
                column += char_len(segment);
            }
        }

        breaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::slice_chars;

    fn rows(text: &str, breaks: &[usize]) -> Vec<String> {
        let mut bounds = vec![0];
        bounds.extend_from_slice(breaks);
        bounds.push(char_len(text));
        bounds
            .windows(2)
            .map(|w| slice_chars(text, w[0], w[1]).to_string())
            .collect()
    }

    #[test]
    fn test_narrow_and_empty_lines_do_not_wrap() {
        let wrap = MeasuredWrap::monospace(10);
        assert!(wrap.line_breaks("").is_empty());
        assert!(wrap.line_breaks("short").is_empty());
        assert!(wrap.line_breaks("exactly 10").is_empty());
    }

    #[test]
    fn test_word_wrap_prefers_whitespace_boundaries() {
        let wrap = MeasuredWrap::new(CellMeasure::new(5.0), 35.0);
        let text = "alpha beta gamma";
        let breaks = wrap.line_breaks(text);
        assert_eq!(breaks, vec![6, 11]);
        assert_eq!(rows(text, &breaks), vec!["alpha ", "beta ", "gamma"]);
    }

    #[test]
    fn test_long_token_falls_back_to_grapheme_split() {
        let wrap = MeasuredWrap::monospace(5);
        let text = "supercalifragilistic";
        let breaks = wrap.line_breaks(text);
        assert_eq!(
            rows(text, &breaks),
            vec!["super", "calif", "ragil", "istic"]
        );
    }

    #[test]
    fn test_breaks_strictly_ascending_and_interior() {
        let wrap = MeasuredWrap::monospace(7);
        let text = "a bb ccc dddd eeeee ffffff ggggggg hhhhhhhh, i; j.";
        let breaks = wrap.line_breaks(text);
        assert!(!breaks.is_empty());
        assert!(breaks.windows(2).all(|w| w[0] < w[1]));
        assert!(breaks.iter().all(|&b| b > 0 && b < char_len(text)));
        for row in rows(text, &breaks) {
            assert!(CellMeasure::default().measure(row.trim_end()) <= 7.0, "{row:?}");
        }
    }

    #[test]
    fn test_wide_chars_count_two_cells() {
        let wrap = MeasuredWrap::monospace(4);
        // Each ideograph is two cells wide
        let breaks = wrap.line_breaks("日本語日本");
        assert_eq!(breaks, vec![2, 4]);
    }

    #[test]
    fn test_no_wrap_never_breaks() {
        assert!(NoWrap.line_breaks(&"x".repeat(10_000)).is_empty());
    }

    #[test]
    fn test_cached_measure_monospace_fast_path() {
        let measure = CachedMeasure::new(|_| 8.0);
        assert!(measure.is_monospace());
        assert_eq!(measure.measure("abc"), 24.0);
        assert_eq!(measure.measure(""), 0.0);
    }

    #[test]
    fn test_cached_measure_proportional() {
        let measure = CachedMeasure::new(|ch| if ch == 'W' { 12.0 } else { 4.0 });
        assert!(!measure.is_monospace());
        assert_eq!(measure.measure("WiW"), 28.0);
        let wrap = MeasuredWrap::new(measure, 20.0);
        assert_eq!(wrap.line_breaks("Wi iW"), vec![3]);
    }
}
