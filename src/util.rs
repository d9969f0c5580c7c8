//! Utility functions for char-column text handling
//!
//! Line contents are stored as `String`, columns are `char` offsets. These
//! helpers translate between the two without allocating.

/// Number of chars in `text`
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of char column `column`, clamped to the end of `text`
pub fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Slice `text` by char columns, clamping both ends
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Clamp `val` into `[min, max]`; `min` wins when the bounds cross
#[inline]
pub fn clamp(min: usize, max: usize, val: usize) -> usize {
    val.min(max).max(min)
}
