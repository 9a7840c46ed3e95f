//=========================================================================
// Collision Module
//=========================================================================
//
// Shape-pair intersection tests and the table that dispatches them.
//
// Dispatch Rules:
// - Key is the ordered pair of shape kinds `(a.kind(), b.kind())`
// - A pair missing from the table whose mirror is registered runs the
//   mirrored test with the operands swapped
// - Pairs with no registered test, in either order, never collide
//
// The table is consulted once per candidate pair per frame by the scene's
// collision pass; entities decide independently whether they take part
// (`should_collide`).
//
//=========================================================================

//=== Submodules ==========================================================

pub mod algorithms;
pub mod shape;

//=== Public Re-exports ===================================================

pub use shape::{Rect, Shape, ShapeKind, Vec2};

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Types ===============================================================

/// Signature of every pairwise collision test.
pub type CollisionTest = fn(&Shape, &Shape) -> bool;

/// Registered test plus whether its operands must be swapped.
#[derive(Clone, Copy)]
struct Entry {
    test: CollisionTest,
    swapped: bool,
}

//=== CollisionTable ======================================================

/// Dispatch table from shape-kind pairs to intersection tests.
///
/// # Example
///
/// ```rust
/// use genesis::core::collision::{CollisionTable, Rect, Shape};
///
/// let table = CollisionTable::standard();
/// let a = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
/// let b = Shape::Rect(Rect::new(10.0, 0.0, 10.0, 10.0));
/// assert!(table.collides(&a, &b));
/// ```
#[derive(Clone, Default)]
pub struct CollisionTable {
    entries: HashMap<(ShapeKind, ShapeKind), Entry>,
}

impl CollisionTable {
    /// Creates an empty table. Every pair reports no collision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table with every built-in test registered.
    pub fn standard() -> Self {
        use algorithms::*;

        let mut table = Self::new();
        table.register(ShapeKind::Ellipse, ShapeKind::Point, ellipse_point);
        table.register(ShapeKind::Ellipse, ShapeKind::Rect, ellipse_rect);
        table.register(ShapeKind::Ellipse, ShapeKind::Circle, ellipse_circle);
        table.register(ShapeKind::Ellipse, ShapeKind::Ellipse, ellipse_ellipse);
        table.register(ShapeKind::Circle, ShapeKind::Rect, circle_rect);
        table.register(ShapeKind::Circle, ShapeKind::Circle, circle_circle);
        table.register(ShapeKind::Rect, ShapeKind::Rect, rect_rect);
        table.register(ShapeKind::Point, ShapeKind::Rect, point_rect);
        table.register(ShapeKind::Line, ShapeKind::Line, line_line);
        table.register(ShapeKind::Line, ShapeKind::Rect, line_rect);
        table
    }

    /// Registers `test` for `(a, b)`.
    ///
    /// The mirrored pair `(b, a)` resolves to the same test with swapped
    /// operands unless it has a test of its own. Registering a pair twice
    /// replaces the earlier test.
    pub fn register(&mut self, a: ShapeKind, b: ShapeKind, test: CollisionTest) {
        self.entries.insert((a, b), Entry { test, swapped: false });
        if a != b {
            let mirror = self.entries.entry((b, a)).or_insert(Entry { test, swapped: true });
            if mirror.swapped {
                mirror.test = test;
            }
        }
    }

    /// True when a test exists for the pair in either order.
    pub fn is_registered(&self, a: ShapeKind, b: ShapeKind) -> bool {
        self.entries.contains_key(&(a, b))
    }

    /// Runs the test registered for the kinds of `a` and `b`.
    ///
    /// Unregistered pairs return `false`.
    pub fn collides(&self, a: &Shape, b: &Shape) -> bool {
        match self.entries.get(&(a.kind(), b.kind())) {
            Some(Entry { test, swapped: false }) => test(a, b),
            Some(Entry { test, swapped: true }) => test(b, a),
            None => false,
        }
    }

    /// Every registered ordered pair, sorted.
    pub fn pairs(&self) -> Vec<(ShapeKind, ShapeKind)> {
        let mut pairs: Vec<_> = self.entries.keys().copied().collect();
        pairs.sort();
        pairs
    }
}

impl std::fmt::Debug for CollisionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionTable")
            .field("pairs", &self.pairs())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(kind: ShapeKind) -> Vec<Shape> {
        let rects = [
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Rect::new(15.0, 15.0, 10.0, 10.0),
            Rect::new(8.0, -5.0, 4.0, 30.0),
            Rect::new(100.0, 100.0, 5.0, 5.0),
        ];
        rects.iter().map(|r| Shape::fitted(kind, *r)).collect()
    }

    //=== Dispatch ========================================================

    #[test]
    fn every_registered_pair_is_symmetric() {
        let table = CollisionTable::standard();
        for (ka, kb) in table.pairs() {
            for a in samples(ka) {
                for b in samples(kb) {
                    assert_eq!(
                        table.collides(&a, &b),
                        table.collides(&b, &a),
                        "asymmetric result for {a:?} / {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn mirrors_are_registered() {
        let table = CollisionTable::standard();
        assert!(table.is_registered(ShapeKind::Rect, ShapeKind::Ellipse));
        assert!(table.is_registered(ShapeKind::Rect, ShapeKind::Line));
        assert!(table.is_registered(ShapeKind::Rect, ShapeKind::Point));
    }

    #[test]
    fn unregistered_pairs_never_collide() {
        let table = CollisionTable::standard();
        let p = Shape::Point(Vec2::new(1.0, 1.0));
        let l = Shape::Line { from: Vec2::new(0.0, 0.0), to: Vec2::new(2.0, 2.0) };
        assert!(!table.collides(&p, &p));
        assert!(!table.collides(&p, &l));
        assert!(!table.collides(&l, &p));
    }

    #[test]
    fn empty_table_never_collides() {
        let table = CollisionTable::new();
        let r = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!table.collides(&r, &r));
    }

    #[test]
    fn mirrored_dispatch_swaps_operands() {
        let table = CollisionTable::standard();
        let e = Shape::Ellipse { center: Vec2::new(50.0, 50.0), rx: 20.0, ry: 20.0 };
        let r = Shape::Rect(Rect::new(55.0, 55.0, 10.0, 10.0));
        assert!(table.collides(&r, &e));
    }

    #[test]
    fn explicit_registration_beats_mirror() {
        fn always(_: &Shape, _: &Shape) -> bool {
            true
        }
        let mut table = CollisionTable::standard();
        table.register(ShapeKind::Rect, ShapeKind::Ellipse, always);
        // A later registration of the forward pair must not clobber it.
        table.register(ShapeKind::Ellipse, ShapeKind::Rect, algorithms::ellipse_rect);

        let e = Shape::Ellipse { center: Vec2::new(0.0, 0.0), rx: 1.0, ry: 1.0 };
        let r = Shape::Rect(Rect::new(100.0, 100.0, 1.0, 1.0));
        assert!(table.collides(&r, &e));
        assert!(!table.collides(&e, &r));
    }

    //=== Documented Edge Cases ===========================================

    #[test]
    fn rect_rect_touching_at_edge() {
        let table = CollisionTable::standard();
        let a = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Shape::Rect(Rect::new(10.0, 0.0, 10.0, 10.0));
        assert!(table.collides(&a, &b));
    }

    #[test]
    fn circles_ten_apart_with_radii_summing_to_ten() {
        let table = CollisionTable::standard();
        let a = Shape::Circle { center: Vec2::new(0.0, 0.0), r: 4.0 };
        let b = Shape::Circle { center: Vec2::new(10.0, 0.0), r: 6.0 };
        assert!(!table.collides(&a, &b));
    }
}
