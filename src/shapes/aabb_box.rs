use serde::{Deserialize, Serialize};

use crate::error::CollisionError;
use crate::math::vec2::Vec2;

/// Axis-aligned box centered at the owner's position plus `offset`.
///
/// Only the half-extent is stored; the local corners are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub half_extent: Vec2,
    #[serde(default)]
    pub offset: Vec2,
}

impl BoxShape {
    /// Creates a box centered on the owner. A zero half-extent is legal.
    pub fn new(half_extent: Vec2) -> Result<Self, CollisionError> {
        Self::with_offset(half_extent, Vec2::ZERO)
    }

    pub fn with_offset(half_extent: Vec2, offset: Vec2) -> Result<Self, CollisionError> {
        let shape = Self { half_extent, offset };
        shape.validate()?;
        Ok(shape)
    }

    pub fn validate(&self) -> Result<(), CollisionError> {
        if !self.half_extent.is_finite() || !self.offset.is_finite() {
            return Err(CollisionError::NonFiniteGeometry { shape: "box" });
        }
        let smallest = self.half_extent.x.min(self.half_extent.y);
        if smallest < 0.0 {
            return Err(CollisionError::NegativeExtent { shape: "box", value: smallest });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_keeps_extent_and_offset() {
        let b = BoxShape::with_offset(Vec2::new(1.0, 2.0), Vec2::new(0.5, 0.0)).unwrap();
        assert_eq!(b.half_extent, Vec2::new(1.0, 2.0));
        assert_eq!(b.offset, Vec2::new(0.5, 0.0));
        assert_eq!(BoxShape::new(Vec2::new(1.0, 2.0)).unwrap().offset, Vec2::ZERO);
    }

    #[test]
    fn test_box_zero_extent_is_legal() {
        let b = BoxShape::new(Vec2::ZERO).unwrap();
        assert_eq!(b.half_extent, Vec2::ZERO);
    }

    #[test]
    fn test_box_negative_extent_rejected() {
        let err = BoxShape::new(Vec2::new(1.0, -0.5)).unwrap_err();
        assert_eq!(err, CollisionError::NegativeExtent { shape: "box", value: -0.5 });
    }
}
