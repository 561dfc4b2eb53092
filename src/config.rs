//! Step settings, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::collision::BroadPhaseStrategy;
use crate::error::CollisionError;
use crate::math::Vec2;
use crate::response::RestitutionMode;

/// Settings shared by every step of a [`crate::world::StepCoordinator`].
///
/// ```toml
/// cell_interval = 16
/// broad_phase = "bucketed"
/// restitution_mode = { fixed = 0.5 }
/// gravity = { x = 0.0, y = -9.81 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Broad-phase cell size in world units. Must be positive.
    pub cell_interval: i64,
    pub restitution_mode: RestitutionMode,
    pub broad_phase: BroadPhaseStrategy,
    /// Acceleration applied by [`crate::world::CollisionWorld::advance`].
    pub gravity: Vec2,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            cell_interval: 10,
            restitution_mode: RestitutionMode::default(),
            broad_phase: BroadPhaseStrategy::default(),
            gravity: Vec2::new(0.0, -9.81),
        }
    }
}

impl CollisionConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, CollisionError> {
        let config: CollisionConfig = toml::from_str(text).map_err(|e| CollisionError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, CollisionError> {
        toml::to_string(self).map_err(|e| CollisionError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), CollisionError> {
        if self.cell_interval <= 0 {
            return Err(CollisionError::InvalidCellInterval(self.cell_interval));
        }
        self.restitution_mode.validate()?;
        if !self.gravity.is_finite() {
            return Err(CollisionError::NonFiniteGravity);
        }
        Ok(())
    }
}
