//=========================================================================
// Collision Algorithms
//=========================================================================
//
// Pairwise intersection tests. Every test takes its operands in the
// order named by the function (`ellipse_rect(ellipse, rect)`); the
// dispatch table takes care of mirrored pairs.
//
// A test handed shapes of the wrong kind returns `false`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::shape::{Rect, Shape, Vec2};

//=== Constants ===========================================================

/// Normalized-distance threshold for points inside an ellipse.
///
/// Slightly under 1.0 so sprites must overlap visibly before a hit
/// registers.
pub const ELLIPSE_THRESHOLD: f32 = 0.9;

//=== Helpers =============================================================

/// Normalized squared distance of `p` from an ellipse center.
///
/// Degenerate ellipses (a zero radius) contain nothing.
fn ellipse_distance(center: Vec2, rx: f32, ry: f32, p: Vec2) -> Option<f32> {
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Some(dx * dx / (rx * rx) + dy * dy / (ry * ry))
}

fn inside_ellipse(center: Vec2, rx: f32, ry: f32, p: Vec2) -> bool {
    ellipse_distance(center, rx, ry, p).is_some_and(|d| d <= ELLIPSE_THRESHOLD)
}

/// Sign of the turn `a -> b -> c`: 1 counter-clockwise, -1 clockwise,
/// 0 when the three points are collinear.
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> i8 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

fn segments_cross(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let s1 = orientation(p1, p2, q1);
    let s2 = orientation(p1, p2, q2);
    let s3 = orientation(q1, q2, p1);
    let s4 = orientation(q1, q2, p2);

    // Both endpoints on the other segment's line: collinear or parallel
    // overlap, which is not reported as an intersection.
    if (s1 == 0 && s2 == 0) || (s3 == 0 && s4 == 0) {
        return false;
    }
    s1 != s2 && s3 != s4
}

fn rect_edges(rect: &Rect) -> [(Vec2, Vec2); 4] {
    let [tl, tr, br, bl] = rect.corners();
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

//=== Ellipse Tests =======================================================

/// True when the point lies within the ellipse threshold.
pub fn ellipse_point(a: &Shape, b: &Shape) -> bool {
    let (Shape::Ellipse { center, rx, ry }, Shape::Point(p)) = (a, b) else {
        return false;
    };
    inside_ellipse(*center, *rx, *ry, *p)
}

/// True when any rectangle corner lies within the ellipse threshold.
pub fn ellipse_rect(a: &Shape, b: &Shape) -> bool {
    let (Shape::Ellipse { center, rx, ry }, Shape::Rect(rect)) = (a, b) else {
        return false;
    };
    rect.corners().iter().any(|corner| inside_ellipse(*center, *rx, *ry, *corner))
}

/// Circle center tested against the ellipse grown by the circle radius.
pub fn ellipse_circle(a: &Shape, b: &Shape) -> bool {
    let (Shape::Ellipse { center, rx, ry }, Shape::Circle { center: c, r }) = (a, b) else {
        return false;
    };
    inside_ellipse(*center, rx + r, ry + r, *c)
}

/// Registered so the pair resolves, never reports a hit.
pub fn ellipse_ellipse(_a: &Shape, _b: &Shape) -> bool {
    false
}

//=== Circle Tests ========================================================

/// True when any rectangle corner lies strictly inside the circle.
pub fn circle_rect(a: &Shape, b: &Shape) -> bool {
    let (Shape::Circle { center, r }, Shape::Rect(rect)) = (a, b) else {
        return false;
    };
    let r2 = r * r;
    rect.corners().iter().any(|corner| {
        let dx = corner.x - center.x;
        let dy = corner.y - center.y;
        dx * dx + dy * dy < r2
    })
}

/// Strict overlap: tangent circles do not collide.
pub fn circle_circle(a: &Shape, b: &Shape) -> bool {
    let (Shape::Circle { center: c1, r: r1 }, Shape::Circle { center: c2, r: r2 }) = (a, b) else {
        return false;
    };
    let dx = c1.x - c2.x;
    let dy = c1.y - c2.y;
    let reach = r1 + r2;
    dx * dx + dy * dy < reach * reach
}

//=== Rect Tests ==========================================================

/// Inclusive axis-aligned overlap: touching edges collide.
pub fn rect_rect(a: &Shape, b: &Shape) -> bool {
    let (Shape::Rect(r1), Shape::Rect(r2)) = (a, b) else {
        return false;
    };
    if r1.x > r2.right() || r1.right() < r2.x {
        return false;
    }
    if r1.y > r2.bottom() || r1.bottom() < r2.y {
        return false;
    }
    true
}

/// Inclusive containment.
pub fn point_rect(a: &Shape, b: &Shape) -> bool {
    let (Shape::Point(p), Shape::Rect(rect)) = (a, b) else {
        return false;
    };
    rect.contains(*p)
}

//=== Line Tests ==========================================================

/// Segment intersection by orientation signs.
pub fn line_line(a: &Shape, b: &Shape) -> bool {
    let (Shape::Line { from: p1, to: p2 }, Shape::Line { from: q1, to: q2 }) = (a, b) else {
        return false;
    };
    segments_cross(*p1, *p2, *q1, *q2)
}

/// True when an endpoint lies inside the rectangle or the segment
/// crosses any of its four edges.
pub fn line_rect(a: &Shape, b: &Shape) -> bool {
    let (Shape::Line { from, to }, Shape::Rect(rect)) = (a, b) else {
        return false;
    };
    if rect.contains(*from) || rect.contains(*to) {
        return true;
    }
    rect_edges(rect)
        .iter()
        .any(|(e1, e2)| segments_cross(*from, *to, *e1, *e2))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Shape {
        Shape::Ellipse { center: Vec2::new(cx, cy), rx, ry }
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Shape {
        Shape::Rect(Rect::new(x, y, w, h))
    }

    fn circle(cx: f32, cy: f32, r: f32) -> Shape {
        Shape::Circle { center: Vec2::new(cx, cy), r }
    }

    fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
        Shape::Line { from: Vec2::new(x1, y1), to: Vec2::new(x2, y2) }
    }

    fn point(x: f32, y: f32) -> Shape {
        Shape::Point(Vec2::new(x, y))
    }

    //=== Ellipse =========================================================

    #[test]
    fn ellipse_point_uses_threshold() {
        let e = ellipse(0.0, 0.0, 10.0, 10.0);
        assert!(ellipse_point(&e, &point(9.0, 0.0)));  // 0.81
        assert!(!ellipse_point(&e, &point(9.6, 0.0))); // 0.9216
        assert!(!ellipse_point(&e, &point(10.0, 0.0)));
    }

    #[test]
    fn degenerate_ellipse_contains_nothing() {
        assert!(!ellipse_point(&ellipse(0.0, 0.0, 0.0, 10.0), &point(0.0, 0.0)));
    }

    #[test]
    fn ellipse_rect_hits_on_corner_only() {
        let e = ellipse(50.0, 50.0, 20.0, 20.0);
        assert!(ellipse_rect(&e, &rect(55.0, 55.0, 100.0, 100.0)));
        // Rect swallows the ellipse; no corner lies inside it.
        assert!(!ellipse_rect(&e, &rect(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn ellipse_circle_grows_by_radius() {
        let e = ellipse(0.0, 0.0, 10.0, 10.0);
        assert!(ellipse_circle(&e, &circle(14.0, 0.0, 5.0)));  // (14/15)^2 = 0.87
        assert!(!ellipse_circle(&e, &circle(20.0, 0.0, 5.0)));
    }

    #[test]
    fn ellipse_ellipse_never_collides() {
        let e = ellipse(0.0, 0.0, 10.0, 10.0);
        assert!(!ellipse_ellipse(&e, &e));
    }

    //=== Circle ==========================================================

    #[test]
    fn circle_circle_tangent_is_not_a_hit() {
        assert!(!circle_circle(&circle(0.0, 0.0, 5.0), &circle(10.0, 0.0, 5.0)));
        assert!(circle_circle(&circle(0.0, 0.0, 5.0), &circle(9.0, 0.0, 5.0)));
    }

    #[test]
    fn circle_rect_checks_every_corner() {
        let c = circle(100.0, 100.0, 10.0);
        // Only the bottom-right corner is near the circle.
        assert!(circle_rect(&c, &rect(50.0, 50.0, 45.0, 45.0)));
        assert!(!circle_rect(&c, &rect(0.0, 0.0, 10.0, 10.0)));
    }

    //=== Rect ============================================================

    #[test]
    fn rect_rect_touching_edges_collide() {
        assert!(rect_rect(&rect(0.0, 0.0, 10.0, 10.0), &rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!rect_rect(&rect(0.0, 0.0, 10.0, 10.0), &rect(10.5, 0.0, 10.0, 10.0)));
        assert!(!rect_rect(&rect(0.0, 0.0, 10.0, 10.0), &rect(0.0, 11.0, 10.0, 10.0)));
    }

    #[test]
    fn point_rect_is_inclusive() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(point_rect(&point(10.0, 0.0), &r));
        assert!(!point_rect(&point(11.0, 0.0), &r));
    }

    //=== Line ============================================================

    #[test]
    fn crossing_lines_intersect() {
        assert!(line_line(&line(0.0, 0.0, 10.0, 10.0), &line(0.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn disjoint_lines_do_not_intersect() {
        assert!(!line_line(&line(0.0, 0.0, 1.0, 1.0), &line(5.0, 0.0, 6.0, -1.0)));
    }

    #[test]
    fn collinear_lines_do_not_intersect() {
        assert!(!line_line(&line(0.0, 0.0, 10.0, 0.0), &line(5.0, 0.0, 15.0, 0.0)));
    }

    #[test]
    fn line_touching_endpoint_counts_as_on_line() {
        // q1 lies exactly on p: orientation 0 differs from the other sign.
        assert!(line_line(&line(0.0, 0.0, 10.0, 0.0), &line(5.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn line_rect_endpoint_inside() {
        assert!(line_rect(&line(5.0, 5.0, 50.0, 50.0), &rect(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn line_rect_crossing_without_endpoints_inside() {
        assert!(line_rect(&line(-5.0, 5.0, 15.0, 5.0), &rect(0.0, 0.0, 10.0, 10.0)));
        assert!(!line_rect(&line(-5.0, 20.0, 15.0, 20.0), &rect(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn wrong_kinds_return_false() {
        assert!(!rect_rect(&circle(0.0, 0.0, 1.0), &rect(0.0, 0.0, 1.0, 1.0)));
        assert!(!line_line(&point(0.0, 0.0), &point(0.0, 0.0)));
    }
}
