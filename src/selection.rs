//! Selection with anchor/focus and eagerly derived bounds.

use crate::position::{Point, Range};

/// Which way a selection points, or which way a boundary search runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A text selection.
///
/// `anchor` is where the selection started and `focus` is the moving end (the
/// cursor position). `start`, `end`, `direction` and `is_collapsed` are stored
/// and re-derived on every write to `anchor` or `focus`, so readers never see
/// them out of sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    anchor: Point,
    focus: Point,
    start: Point,
    end: Point,
    direction: Direction,
    is_collapsed: bool,
}

impl Selection {
    /// Create a collapsed selection (cursor with no selection)
    pub fn collapsed(point: Point) -> Self {
        Self::new(point, point)
    }

    pub fn new(anchor: Point, focus: Point) -> Self {
        let mut selection = Self {
            anchor,
            focus,
            start: anchor,
            end: anchor,
            direction: Direction::Forward,
            is_collapsed: true,
        };
        selection.derive();
        selection
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn focus(&self) -> Point {
        self.focus
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    /// Ordered span covered by the selection
    pub fn range(&self) -> Range {
        Range::new(self.start, self.end)
    }

    pub fn set_focus(&mut self, focus: Point) {
        self.focus = focus;
        self.derive();
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
        self.derive();
    }

    /// Set both ends in one step
    pub fn set(&mut self, anchor: Point, focus: Point) {
        self.anchor = anchor;
        self.focus = focus;
        self.derive();
    }

    /// Check if a point is within this selection (end exclusive)
    pub fn contains(&self, point: Point) -> bool {
        point >= self.start && point < self.end
    }

    fn derive(&mut self) {
        self.direction = if self.focus.before(self.anchor) {
            Direction::Backward
        } else {
            Direction::Forward
        };
        self.is_collapsed = self.focus == self.anchor;
        (self.start, self.end) = match self.direction {
            Direction::Forward => (self.anchor, self.focus),
            Direction::Backward => (self.focus, self.anchor),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(Point::new(1, 5));
        assert!(sel.is_collapsed());
        assert_eq!(sel.anchor(), sel.focus());
        assert_eq!(sel.direction(), Direction::Forward);
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(Point::new(0, 0), Point::new(0, 5));
        assert_eq!(forward.start(), Point::new(0, 0));
        assert_eq!(forward.end(), Point::new(0, 5));
        assert_eq!(forward.direction(), Direction::Forward);

        let backward = Selection::new(Point::new(0, 5), Point::new(0, 0));
        assert_eq!(backward.start(), Point::new(0, 0));
        assert_eq!(backward.end(), Point::new(0, 5));
        assert_eq!(backward.direction(), Direction::Backward);
    }

    #[test]
    fn test_writes_rederive() {
        let mut sel = Selection::collapsed(Point::new(2, 2));
        sel.set_focus(Point::new(1, 0));
        assert!(!sel.is_collapsed());
        assert_eq!(sel.direction(), Direction::Backward);
        assert_eq!(sel.start(), Point::new(1, 0));
        assert_eq!(sel.end(), Point::new(2, 2));

        sel.set_anchor(Point::new(0, 0));
        assert_eq!(sel.direction(), Direction::Forward);
        assert_eq!(sel.start(), Point::new(0, 0));
        assert_eq!(sel.end(), Point::new(1, 0));

        sel.set_anchor(Point::new(1, 0));
        assert!(sel.is_collapsed());
    }

    #[test]
    fn test_derivation_holds_for_all_pairs() {
        let points: Vec<Point> = (0..3)
            .flat_map(|l| (0..3).map(move |c| Point::new(l, c)))
            .collect();
        for &anchor in &points {
            for &focus in &points {
                let sel = Selection::new(anchor, focus);
                assert_eq!(sel.direction() == Direction::Backward, focus.before(anchor));
                assert_eq!(sel.is_collapsed(), focus == anchor);
                assert!(sel.start() <= sel.end());
                match sel.direction() {
                    Direction::Forward => assert_eq!((sel.start(), sel.end()), (anchor, focus)),
                    Direction::Backward => assert_eq!((sel.start(), sel.end()), (focus, anchor)),
                }
            }
        }
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(Point::new(0, 2), Point::new(0, 8));
        assert!(!sel.contains(Point::new(0, 1)));
        assert!(sel.contains(Point::new(0, 2)));
        assert!(sel.contains(Point::new(0, 7)));
        assert!(!sel.contains(Point::new(0, 8))); // End is exclusive
    }
}
