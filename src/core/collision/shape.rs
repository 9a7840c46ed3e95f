//=========================================================================
// Shapes
//=========================================================================
//
// Plain geometric values used by collision tests and world bounds.
//
// Shapes are immutable per query: entities rebuild them every frame from
// their current position, so nothing here caches state.
//
//=========================================================================

//=== Vec2 ================================================================

/// A 2D point or displacement in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

//=== ShapeKind ===========================================================

/// Tag selecting a collision test. Ordered pairs of tags key the
/// dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Ellipse,
    Rect,
    Circle,
    Line,
    Point,
}

//=== Shape ===============================================================

/// A collision shape with its parameters in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Center plus horizontal/vertical radii.
    Ellipse { center: Vec2, rx: f32, ry: f32 },

    /// Axis-aligned box.
    Rect(Rect),

    /// Center plus radius.
    Circle { center: Vec2, r: f32 },

    /// Segment between two points.
    Line { from: Vec2, to: Vec2 },

    /// Single point.
    Point(Vec2),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Ellipse { .. } => ShapeKind::Ellipse,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Line { .. } => ShapeKind::Line,
            Self::Point(_) => ShapeKind::Point,
        }
    }

    /// Builds the shape of `kind` that fits inside `rect`.
    ///
    /// Ellipses and circles are inscribed; a line runs along the top edge
    /// from the left to the right corner; a point sits at the center.
    pub fn fitted(kind: ShapeKind, rect: Rect) -> Self {
        let center = rect.center();
        match kind {
            ShapeKind::Ellipse => Self::Ellipse { center, rx: rect.w / 2.0, ry: rect.h / 2.0 },
            ShapeKind::Rect => Self::Rect(rect),
            ShapeKind::Circle => Self::Circle { center, r: rect.w.min(rect.h) / 2.0 },
            ShapeKind::Line => Self::Line {
                from: Vec2::new(rect.x, rect.y),
                to: Vec2::new(rect.right(), rect.y),
            },
            ShapeKind::Point => Self::Point(center),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
