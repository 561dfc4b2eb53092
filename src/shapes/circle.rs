use serde::{Deserialize, Serialize};

use crate::error::CollisionError;
use crate::math::vec2::Vec2;

/// Circle centered at the owner's position plus `local_center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
    #[serde(default)]
    pub local_center: Vec2,
}

impl Circle {
    /// Creates a circle centered on the owner. Zero radius is legal.
    pub fn new(radius: f64) -> Result<Self, CollisionError> {
        Self::with_center(radius, Vec2::ZERO)
    }

    pub fn with_center(radius: f64, local_center: Vec2) -> Result<Self, CollisionError> {
        let circle = Self { radius, local_center };
        circle.validate()?;
        Ok(circle)
    }

    pub fn validate(&self) -> Result<(), CollisionError> {
        if !self.radius.is_finite() || !self.local_center.is_finite() {
            return Err(CollisionError::NonFiniteGeometry { shape: "circle" });
        }
        if self.radius < 0.0 {
            return Err(CollisionError::NegativeExtent { shape: "circle", value: self.radius });
        }
        Ok(())
    }
}
