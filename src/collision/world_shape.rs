use super::aabb::AABB;
use crate::math::vec2::Vec2;

/// A shape resolved into world space for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    Box { center: Vec2, half_extent: Vec2 },
    Circle { center: Vec2, radius: f64 },
    Line { p0: Vec2, p1: Vec2, normal: Vec2 },
}

impl WorldShape {
    /// Tight world bounds. Segments get the degenerate-width box spanned by
    /// their endpoints, never padded.
    pub fn aabb(&self) -> AABB {
        match *self {
            WorldShape::Box { center, half_extent } => AABB {
                min: center - half_extent,
                max: center + half_extent,
            },
            WorldShape::Circle { center, radius } => {
                let r = Vec2::new(radius, radius);
                AABB { min: center - r, max: center + r }
            }
            WorldShape::Line { p0, p1, .. } => AABB::new(p0, p1),
        }
    }
}
