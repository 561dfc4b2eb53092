use serde::{Deserialize, Serialize};

use crate::error::CollisionError;
use crate::math::vec2::Vec2;

/// Segment from `p0` to `p1` in body-local coordinates.
///
/// Segments are immovable: whatever the owner's motion flag says, collision
/// treats a body carrying a segment as static.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SegmentPoints", into = "SegmentPoints")]
pub struct LineSegment {
    p0: Vec2,
    p1: Vec2,
    normal: Vec2,
}

/// Wire form: the normal is always re-derived, never read.
#[derive(Serialize, Deserialize)]
struct SegmentPoints {
    p0: Vec2,
    p1: Vec2,
}

impl From<SegmentPoints> for LineSegment {
    fn from(points: SegmentPoints) -> Self {
        Self::new(points.p0, points.p1)
    }
}

impl From<LineSegment> for SegmentPoints {
    fn from(segment: LineSegment) -> Self {
        Self { p0: segment.p0, p1: segment.p1 }
    }
}

impl LineSegment {
    /// Creates a segment and derives its unit normal, `perp(p1 - p0)`.
    /// A zero-length segment gets a zero normal.
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1, normal: (p1 - p0).perpendicular().normalize() }
    }

    pub fn p0(&self) -> Vec2 {
        self.p0
    }

    pub fn p1(&self) -> Vec2 {
        self.p1
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn validate(&self) -> Result<(), CollisionError> {
        if self.p0.is_finite() && self.p1.is_finite() {
            Ok(())
        } else {
            Err(CollisionError::NonFiniteGeometry { shape: "line" })
        }
    }
}
