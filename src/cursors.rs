//! The ordered list of cursors an editor drives.
//!
//! The first cursor is the main one. Shared motions run per cursor in list
//! order and finish with [`CursorSet::merge`].

use std::collections::HashSet;

use crate::cursor::{Cursor, CursorId};
use crate::position::Point;

#[derive(Debug, Clone)]
pub struct CursorSet {
    cursors: Vec<Cursor>,
    next_id: u64,
}

impl Default for CursorSet {
    fn default() -> Self {
        Self::new(Point::zero())
    }
}

impl CursorSet {
    /// A set holding one collapsed cursor at `point`
    pub fn new(point: Point) -> Self {
        Self {
            cursors: vec![Cursor::new(CursorId(0), point)],
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> CursorId {
        let id = CursorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The first cursor in the list
    pub fn main(&self) -> &Cursor {
        &self.cursors[0]
    }

    pub fn main_mut(&mut self) -> &mut Cursor {
        &mut self.cursors[0]
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Never true; a set always holds at least one cursor
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.iter()
    }

    pub fn as_slice(&self) -> &[Cursor] {
        &self.cursors
    }

    pub fn get(&self, id: CursorId) -> Option<&Cursor> {
        self.cursors.iter().find(|c| c.id == id)
    }

    /// Add a secondary cursor at `point`. Returns the existing cursor's id
    /// if one already sits there.
    pub fn add_cursor(&mut self, point: Point) -> CursorId {
        if let Some(existing) = self.cursors.iter().find(|c| c.position() == point) {
            return existing.id;
        }
        let id = self.allocate_id();
        self.cursors.push(Cursor::new(id, point));
        id
    }

    /// Add a cursor at `point`, or remove the one already there unless it is
    /// the last cursor. Returns true if a cursor was added.
    pub fn toggle_cursor(&mut self, point: Point) -> bool {
        match self.cursors.iter().position(|c| c.position() == point) {
            Some(index) => {
                if self.cursors.len() > 1 {
                    self.cursors.remove(index);
                }
                false
            }
            None => {
                self.add_cursor(point);
                true
            }
        }
    }

    /// Drop every cursor whose position matches an earlier cursor's.
    /// Returns how many were removed.
    pub fn merge(&mut self) -> usize {
        let before = self.cursors.len();
        let mut seen = HashSet::new();
        self.cursors.retain(|c| seen.insert(c.position()));
        let removed = before - self.cursors.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.cursors.len(), "merged cursors");
        }
        removed
    }

    /// Keep only the main cursor
    pub fn flatten(&mut self) {
        self.cursors.truncate(1);
    }

    /// Keep only the main cursor and collapse it onto `point`
    pub fn reset_to(&mut self, point: Point) {
        self.flatten();
        self.cursors[0].move_to(point, false);
    }

    /// Run `f` on every cursor in list order, then merge
    pub fn for_each(&mut self, mut f: impl FnMut(&mut Cursor)) {
        for cursor in &mut self.cursors {
            f(cursor);
        }
        self.merge();
    }

    /// Check structural invariants (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        debug_assert!(!self.cursors.is_empty(), "cursor set must not be empty");
        let mut ids = HashSet::new();
        for cursor in &self.cursors {
            debug_assert!(ids.insert(cursor.id), "duplicate cursor id {:?}", cursor.id);
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_one_cursor() {
        let set = CursorSet::default();
        assert_eq!(set.len(), 1);
        assert_eq!(set.main().position(), Point::zero());
    }

    #[test]
    fn test_add_cursor_ids_are_unique() {
        let mut set = CursorSet::default();
        let a = set.add_cursor(Point::new(1, 0));
        let b = set.add_cursor(Point::new(2, 0));
        assert_ne!(a, b);
        assert_ne!(a, set.main().id);
        // Same position returns the existing cursor
        assert_eq!(set.add_cursor(Point::new(1, 0)), a);
        assert_eq!(set.len(), 3);
        set.assert_invariants();
    }

    #[test]
    fn test_toggle_cursor() {
        let mut set = CursorSet::default();
        assert!(set.toggle_cursor(Point::new(1, 1)));
        assert_eq!(set.len(), 2);
        assert!(!set.toggle_cursor(Point::new(1, 1)));
        assert_eq!(set.len(), 1);
        // The last cursor stays
        assert!(!set.toggle_cursor(Point::zero()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_merge_keeps_earliest() {
        let mut set = CursorSet::new(Point::new(0, 1));
        let second = set.add_cursor(Point::new(0, 2));
        let third = set.add_cursor(Point::new(0, 3));
        set.cursors[2].move_to(Point::new(0, 2), false);

        assert_eq!(set.merge(), 1);
        let ids: Vec<_> = set.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CursorId(0), second]);
        assert!(set.get(third).is_none());
    }

    #[test]
    fn test_reset_to_flattens() {
        let mut set = CursorSet::default();
        set.add_cursor(Point::new(3, 3));
        set.main_mut().move_to(Point::new(1, 1), true);
        set.reset_to(Point::new(2, 0));
        assert_eq!(set.len(), 1);
        assert!(set.main().selection.is_collapsed());
        assert_eq!(set.main().position(), Point::new(2, 0));
    }
}
