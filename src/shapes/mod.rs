pub mod aabb_box;
pub mod circle;
pub mod line_segment;

use serde::{Deserialize, Serialize};

use crate::collision::WorldShape;
use crate::error::CollisionError;
use crate::math::{Pose, Vec2};

pub use aabb_box::BoxShape;
pub use circle::Circle;
pub use line_segment::LineSegment;

/// Collision geometry of a body, in body-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box(BoxShape),
    Circle(Circle),
    Line(LineSegment),
}

impl Shape {
    /// Box centered on the owner with the given half-extent.
    pub fn aabb(half_extent: Vec2) -> Result<Self, CollisionError> {
        BoxShape::new(half_extent).map(Shape::Box)
    }

    /// Circle centered on the owner.
    pub fn circle(radius: f64) -> Result<Self, CollisionError> {
        Circle::new(radius).map(Shape::Circle)
    }

    /// Segment in body-local coordinates. Any two finite points are valid.
    pub fn line(p0: Vec2, p1: Vec2) -> Result<Self, CollisionError> {
        let segment = LineSegment::new(p0, p1);
        segment.validate()?;
        Ok(Shape::Line(segment))
    }

    /// Re-checks the extent invariants, for shapes that arrived deserialized.
    pub fn validate(&self) -> Result<(), CollisionError> {
        match self {
            Shape::Box(b) => b.validate(),
            Shape::Circle(c) => c.validate(),
            Shape::Line(l) => l.validate(),
        }
    }

    /// Segments never move, whatever their owner's motion flag says.
    pub fn is_immovable(&self) -> bool {
        matches!(self, Shape::Line(_))
    }

    /// Resolves the local geometry against `pose` for this step.
    pub fn to_world(&self, pose: &Pose) -> WorldShape {
        match self {
            Shape::Box(b) => WorldShape::Box {
                center: pose.apply(b.offset),
                half_extent: b.half_extent,
            },
            Shape::Circle(c) => WorldShape::Circle {
                center: pose.apply(c.local_center),
                radius: c.radius,
            },
            Shape::Line(l) => WorldShape::Line {
                p0: pose.apply(l.p0()),
                p1: pose.apply(l.p1()),
                normal: l.normal(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_constructors_validate() {
        assert!(Shape::aabb(Vec2::new(1.0, 1.0)).is_ok());
        assert!(Shape::aabb(Vec2::new(-1.0, 1.0)).is_err());
        assert!(Shape::circle(0.0).is_ok());
        assert!(Shape::circle(-0.1).is_err());
        assert!(Shape::line(Vec2::ZERO, Vec2::new(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_to_world_box_uses_offset() {
        let shape = Shape::Box(BoxShape::with_offset(Vec2::new(1.0, 2.0), Vec2::new(3.0, 0.0)).unwrap());
        let world = shape.to_world(&Pose::at(Vec2::new(10.0, 10.0)));
        let aabb = world.aabb();
        assert!((aabb.min.x - 12.0).abs() < EPSILON);
        assert!((aabb.min.y - 8.0).abs() < EPSILON);
        assert!((aabb.max.x - 14.0).abs() < EPSILON);
        assert!((aabb.max.y - 12.0).abs() < EPSILON);
    }

    #[test]
    fn test_to_world_line_keeps_normal() {
        let shape = Shape::line(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)).unwrap();
        match shape.to_world(&Pose::at(Vec2::new(0.0, 5.0))) {
            WorldShape::Line { p0, p1, normal } => {
                assert_eq!(p0, Vec2::new(-1.0, 5.0));
                assert_eq!(p1, Vec2::new(1.0, 5.0));
                assert!((normal.y - 1.0).abs() < EPSILON);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_only_lines_are_immovable() {
        assert!(Shape::line(Vec2::ZERO, Vec2::UP).unwrap().is_immovable());
        assert!(!Shape::circle(1.0).unwrap().is_immovable());
    }

    #[test]
    fn test_validate_catches_deserialized_negative_radius() {
        let shape: Shape = toml::from_str("[Circle]\nradius = -2.0\n").unwrap();
        assert!(shape.validate().is_err());
    }

    #[test]
    fn test_deserialized_line_derives_normal() {
        let shape: Shape = toml::from_str("[Line]\np0 = { x = 0.0, y = 0.0 }\np1 = { x = 0.0, y = 2.0 }\n").unwrap();
        match shape {
            Shape::Line(l) => assert!((l.normal().x - -1.0).abs() < EPSILON),
            other => panic!("expected a line, got {:?}", other),
        }
    }
}
