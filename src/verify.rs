//! Development-time invariant monitor. Not part of the public packing algorithm: a collection
//! that only accepts a rectangle if it is disjoint from every rectangle already in it, used to
//! assert packer correctness.

use crate::geom::Rect;

/// Accepts rectangles one at a time, refusing (in debug builds) any that overlap one already
/// accepted. Construct it directly in tests regardless of build profile; `assert_disjoint` is
/// gated on `debug_assertions` so it costs nothing in release builds when called from
/// non-test code.
#[derive(Debug, Default, Clone)]
pub struct DisjointRectCollection {
    rects: Vec<Rect>,
}

impl DisjointRectCollection {
    pub fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Returns `true` and records `rect` iff it is disjoint from every rectangle already held.
    pub fn try_add(&mut self, rect: Rect) -> bool {
        if self.rects.iter().any(|r| r.intersects(&rect)) {
            return false;
        }
        self.rects.push(rect);
        true
    }

    /// Debug-only post-condition check: panics if `rect` overlaps anything already accepted,
    /// otherwise records it. `debug_assert!` elides the call entirely in release builds.
    #[inline]
    pub fn assert_disjoint(&mut self, rect: Rect) {
        debug_assert!(
            self.try_add(rect),
            "rect {rect:?} overlaps a previously placed rectangle"
        );
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Checks pairwise disjointness of an arbitrary slice without mutating anything; used directly
/// by property tests.
pub fn all_disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_disjoint_rects() {
        let mut c = DisjointRectCollection::new();
        assert!(c.try_add(Rect::new(0, 0, 10, 10)));
        assert!(c.try_add(Rect::new(10, 0, 10, 10)));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn rejects_overlapping_rect() {
        let mut c = DisjointRectCollection::new();
        assert!(c.try_add(Rect::new(0, 0, 10, 10)));
        assert!(!c.try_add(Rect::new(5, 5, 10, 10)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn all_disjoint_detects_overlap() {
        let rects = [Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10)];
        assert!(!all_disjoint(&rects));
        let rects = [Rect::new(0, 0, 10, 10), Rect::new(10, 0, 10, 10)];
        assert!(all_disjoint(&rects));
    }
}
