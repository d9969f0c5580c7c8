//! Word-boundary capability used by word motions.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::selection::Direction;
use crate::util::char_len;

/// Given `text`, a direction and a start column, return the column the cursor
/// lands on after a word-granularity move. `text` may contain a `\n` joining
/// two neighbouring lines.
pub trait WordBoundary: fmt::Debug {
    fn boundary(&self, text: &str, direction: Direction, column: usize) -> usize;
}

/// Unicode (UAX #29) word boundaries with platform-style stops: forward lands
/// at the end of the next word, backward at the start of the previous one.
/// Whitespace and punctuation between words are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWords;

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

impl WordBoundary for UnicodeWords {
    fn boundary(&self, text: &str, direction: Direction, column: usize) -> usize {
        let mut words = Vec::new();
        let mut end = 0;
        for segment in text.split_word_bounds() {
            let start = end;
            end += char_len(segment);
            if is_word(segment) {
                words.push((start, end));
            }
        }

        match direction {
            Direction::Forward => words
                .iter()
                .find(|&&(_, e)| e > column)
                .map_or(end, |&(_, e)| e),
            Direction::Backward => words
                .iter()
                .rev()
                .find(|&&(s, _)| s < column)
                .map_or(0, |&(s, _)| s),
        }
    }
}
