//! Core geometry types for issa.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = the value is duplicated implicitly (small stack values only)
//! - `PartialEq` = can compare with `==`
//!
//! Both types here are a handful of `f64`s, so they are `Copy` and get
//! passed around by value.

/// Tolerance used when deciding whether a point sits on a rectangle edge.
const EDGE_EPSILON: f64 = 1e-9;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle stored as its four bounds.
///
/// Spirals are walked around a rectangle centered at the origin, so the
/// usual way to build one is [`Rect::centered`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Multiply both coordinates by `factor` (scaling about the origin).
    #[inline]
    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

// ## Rust Lesson #5: impl blocks
//
// Operator overloading is just a trait impl. `a + b` on two points calls
// `Add::add(a, b)`, which keeps the boundary walk readable.
impl std::ops::Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Rect {
    /// Rectangle of the given size centered at the origin.
    pub fn centered(height: f64, width: f64) -> Self {
        Self {
            top: height / 2.0,
            bottom: -height / 2.0,
            left: -width / 2.0,
            right: width / 2.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Length of one full loop around the boundary.
    #[inline]
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// The bottom-left corner, where every boundary walk starts.
    #[inline]
    pub fn corner(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    /// Closed containment test (points on the edge count as inside).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// Distance travelled along the boundary from the bottom-left corner to `p`.
    ///
    /// The walk goes up the left edge, right along the top, down the right
    /// edge and back along the bottom, so the result is in `[0, perimeter)`.
    /// Returns `None` when `p` is not on the boundary.
    pub fn arc_position(&self, p: Point) -> Option<f64> {
        let on = |a: f64, b: f64| (a - b).abs() <= EDGE_EPSILON * (1.0 + b.abs());
        if p.x < self.left - EDGE_EPSILON
            || p.x > self.right + EDGE_EPSILON
            || p.y < self.bottom - EDGE_EPSILON
            || p.y > self.top + EDGE_EPSILON
        {
            return None;
        }

        let (w, h) = (self.width(), self.height());
        if on(p.x, self.left) {
            Some(p.y - self.bottom)
        } else if on(p.y, self.top) {
            Some(h + (p.x - self.left))
        } else if on(p.x, self.right) {
            Some(h + w + (self.top - p.y))
        } else if on(p.y, self.bottom) {
            Some(2.0 * h + w + (self.right - p.x))
        } else {
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
