use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Placement of a body for one step, supplied by the owner every step.
///
/// Collision shapes are world-axis aligned, so only `position` feeds the
/// collision math. `rotation` and `scale` ride along unchanged so the caller
/// gets back exactly the transform it handed in, plus any positional correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f64, // Radians
    pub scale: Vec2,
}

impl Pose {
    /// Creates a pose with the given position and rotation and unit scale.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation, scale: Vec2::new(1.0, 1.0) }
    }

    /// Pose at `position` with no rotation and unit scale.
    pub fn at(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    pub fn identity() -> Self {
        Self::at(Vec2::ZERO)
    }

    /// Maps a body-local offset to world space (translation only).
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.position + local
    }

    /// Returns a copy moved by `delta`; rotation and scale are preserved.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self { position: self.position + delta, ..*self }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_pose_identity() {
        let p = Pose::identity();
        assert_eq!(p.position, Vec2::ZERO);
        assert!((p.rotation - 0.0).abs() < EPSILON);
        assert_eq!(p.scale, Vec2::new(1.0, 1.0));
        assert_eq!(Pose::default(), p);
    }

    #[test]
    fn test_pose_apply_translates_only() {
        let p = Pose::new(Vec2::new(10.0, 5.0), std::f64::consts::FRAC_PI_2);
        let world = p.apply(Vec2::new(1.0, 2.0));
        assert!((world.x - 11.0).abs() < EPSILON);
        assert!((world.y - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_pose_translated_keeps_rotation_and_scale() {
        let mut p = Pose::new(Vec2::new(1.0, 1.0), 0.5);
        p.scale = Vec2::new(2.0, 3.0);
        let moved = p.translated(Vec2::new(-1.0, 2.0));
        assert_eq!(moved.position, Vec2::new(0.0, 3.0));
        assert_eq!(moved.rotation, 0.5);
        assert_eq!(moved.scale, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_pose_is_finite() {
        assert!(Pose::identity().is_finite());
        assert!(!Pose::at(Vec2::new(f64::NAN, 0.0)).is_finite());
    }
}
