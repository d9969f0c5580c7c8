//! Position types for buffer space and screen space.
//!
//! Buffer space addresses raw logical lines; screen space addresses the
//! visually wrapped rows. Both are plain `Copy` values, so handing a point to
//! two cursors never aliases it.

/// A location in buffer space (logical line and column, both 0-indexed).
///
/// Columns count `char`s within the line. Ordering compares line, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Is this point strictly before `other`
    pub fn before(&self, other: Point) -> bool {
        *self < other
    }

    /// Is this point strictly after `other`
    pub fn after(&self, other: Point) -> bool {
        *self > other
    }
}

impl From<(usize, usize)> for Point {
    fn from((line, column): (usize, usize)) -> Self {
        Self::new(line, column)
    }
}

/// A span between two buffer points. Not necessarily ordered; use
/// [`Range::normalized`] before slicing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Same span with `start <= end`
    pub fn normalized(&self) -> Self {
        if self.end < self.start {
            Self::new(self.end, self.start)
        } else {
            *self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A location in screen space: visual row and column within that row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenPoint {
    pub line: usize,
    pub column: usize,
}

impl ScreenPoint {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
