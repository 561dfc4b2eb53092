//! Narrow phase: exact overlap tests for every unordered pair of shape kinds.
//!
//! Each pair has a boolean form (used for triggers) and a response form that
//! returns a [`CollisionManifold`]. Mirrored pairs are evaluated in canonical
//! order and flipped with [`CollisionManifold::inverted`], so `contact(a, b)`
//! and `contact(b, a)` always agree.

pub mod box_box;
pub mod box_circle;
pub mod box_line;
pub mod circle_circle;
pub mod circle_line;

use super::manifold::CollisionManifold;
use super::world_shape::WorldShape;
use super::AABB;
use crate::math::vec2::Vec2;

/// Tolerance for near-zero lengths and parallel checks.
pub const EPSILON: f64 = 1e-4;

/// A world-space shape together with the velocity it moves at during the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingShape {
    pub shape: WorldShape,
    pub velocity: Vec2,
}

impl MovingShape {
    pub fn new(shape: WorldShape, velocity: Vec2) -> Self {
        Self { shape, velocity }
    }

    /// A shape at rest, for purely static checks.
    pub fn fixed(shape: WorldShape) -> Self {
        Self::new(shape, Vec2::ZERO)
    }

    /// Bound covering the shape over `[0, dt]`. Segments never move.
    pub fn swept_aabb(&self, dt: f64) -> AABB {
        let aabb = self.shape.aabb();
        match self.shape {
            WorldShape::Line { .. } => aabb,
            _ => aabb.swept(self.velocity * dt),
        }
    }
}

/// Boolean overlap test, for trigger pairs.
pub fn overlaps(a: &MovingShape, b: &MovingShape, dt: f64) -> bool {
    use WorldShape::{Box, Circle, Line};
    match (a.shape, b.shape) {
        (Box { center: ca, half_extent: ha }, Box { center: cb, half_extent: hb }) => {
            box_box::overlaps(&box_bounds(ca, ha), a.velocity, &box_bounds(cb, hb), b.velocity, dt)
        }
        (Box { center, half_extent }, Circle { center: cc, radius })
        | (Circle { center: cc, radius }, Box { center, half_extent }) => {
            box_circle::overlaps(center, half_extent, cc, radius)
        }
        (Circle { center: ca, radius: ra }, Circle { center: cb, radius: rb }) => {
            circle_circle::overlaps(ca, ra, a.velocity, cb, rb, b.velocity, dt)
        }
        (Box { .. }, Line { .. })
        | (Line { .. }, Box { .. })
        | (Circle { .. }, Line { .. })
        | (Line { .. }, Circle { .. }) => contact(a, b, dt).is_some(),
        // Both segments are immovable; such a pair never needs testing.
        (Line { .. }, Line { .. }) => false,
    }
}

/// Response-enabled test. `None` means no collision.
pub fn contact(a: &MovingShape, b: &MovingShape, dt: f64) -> Option<CollisionManifold> {
    use WorldShape::{Box, Circle, Line};
    match (a.shape, b.shape) {
        (Box { center: ca, half_extent: ha }, Box { center: cb, half_extent: hb }) => {
            box_box::contact(&box_bounds(ca, ha), a.velocity, &box_bounds(cb, hb), b.velocity, dt)
        }
        (Box { center, half_extent }, Circle { center: cc, radius }) => {
            box_circle::contact(center, half_extent, cc, radius)
        }
        (Circle { .. }, Box { .. }) => contact(b, a, dt).map(|m| m.inverted()),
        (Box { center, half_extent }, Line { p0, p1, normal }) => {
            box_line::contact(&box_bounds(center, half_extent), a.velocity, p0, p1, normal, dt)
        }
        (Line { .. }, Box { .. }) => contact(b, a, dt).map(|m| m.inverted()),
        (Circle { center: ca, radius: ra }, Circle { center: cb, radius: rb }) => {
            circle_circle::contact(ca, ra, a.velocity, cb, rb, b.velocity, dt)
        }
        (Circle { center, radius }, Line { p0, p1, normal }) => {
            circle_line::contact(center, radius, a.velocity, p0, p1, normal, dt)
        }
        (Line { .. }, Circle { .. }) => contact(b, a, dt).map(|m| m.inverted()),
        (Line { .. }, Line { .. }) => None,
    }
}

fn box_bounds(center: Vec2, half_extent: Vec2) -> AABB {
    AABB { min: center - half_extent, max: center + half_extent }
}

/// Finds the point on a segment closest to a given point.
/// Returns the closest point and the parameter `t` (0 <= t <= 1) along the segment.
pub(crate) fn closest_point_on_segment(segment_a: Vec2, segment_b: Vec2, point: Vec2) -> (Vec2, f64) {
    let segment_vec = segment_b - segment_a;
    let length_sq = segment_vec.magnitude_squared();
    if length_sq == 0.0 {
        return (segment_a, 0.0);
    }
    let t = ((point - segment_a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
    (segment_a + segment_vec * t, t)
}

/// Push needed along one axis to separate interval A from interval B, and the
/// sign of the A-to-B normal on that axis. A negative push means separated.
#[inline]
pub(crate) fn axis_push(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> (f64, f64) {
    let push_back = a_max - b_min;
    let push_forward = b_max - a_min;
    if push_back < push_forward {
        (push_back, 1.0)
    } else if push_forward < push_back {
        (push_forward, -1.0)
    } else {
        // Centers coincide on this axis: the wider interval takes +1, so the
        // mirrored call gets -1. Equal widths cannot be told apart.
        let sign = if a_max - a_min >= b_max - b_min { 1.0 } else { -1.0 };
        (push_back, sign)
    }
}

/// +1 for non-negative values, -1 otherwise.
#[inline]
pub(crate) fn axis_sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
