//! The rectangular boundary walk.

use crate::geometry::{Point, Rect};

/// Direction of travel along the rectangle boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The direction taken after turning a corner (clockwise).
    #[inline]
    pub fn next(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// A move of length `spacing` in this direction.
    #[inline]
    pub fn step(self, spacing: f64) -> Point {
        match self {
            Direction::Up => Point::new(0.0, spacing),
            Direction::Right => Point::new(spacing, 0.0),
            Direction::Down => Point::new(0.0, -spacing),
            Direction::Left => Point::new(-spacing, 0.0),
        }
    }

    /// If `p` went past the edge this direction is heading for, returns `p`
    /// clamped onto that edge and the distance it went past.
    fn overshoot(self, rect: &Rect, p: Point) -> Option<(Point, f64)> {
        let (clamped, over) = match self {
            Direction::Up => (Point::new(p.x, rect.top), p.y - rect.top),
            Direction::Right => (Point::new(rect.right, p.y), p.x - rect.right),
            Direction::Down => (Point::new(p.x, rect.bottom), rect.bottom - p.y),
            Direction::Left => (Point::new(rect.left, p.y), rect.left - p.x),
        };
        (over > 0.0).then_some((clamped, over))
    }
}

/// Walk the boundary of `rect` starting at its bottom-left corner, heading up.
///
/// Produces `num_points` vertices `spacing` apart measured along the
/// boundary. A step that runs past a corner is clamped to the edge and the
/// leftover distance continues in the next direction, so no length is lost
/// at a turn. Every vertex lies on the boundary of `rect`.
pub fn boundary_walk(rect: Rect, spacing: f64, num_points: usize) -> Vec<Point> {
    let mut vertices = Vec::with_capacity(num_points);
    if num_points == 0 {
        return vertices;
    }

    // Whole laps land back on the same spot.
    let perimeter = rect.perimeter();
    let step_len = if spacing >= perimeter {
        spacing.rem_euclid(perimeter)
    } else {
        spacing
    };

    let mut current = rect.corner();
    let mut direction = Direction::Up;
    vertices.push(current);

    for _ in 1..num_points {
        let mut next = current + direction.step(step_len);

        // A step longer than an edge can pass several corners.
        while let Some((clamped, over)) = direction.overshoot(&rect, next) {
            direction = direction.next();
            next = clamped + direction.step(over);
        }

        vertices.push(next);
        current = next;
    }

    vertices
}
