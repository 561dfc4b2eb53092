use crate::math::vec2::Vec2;

/// Geometric result of a solid narrow-phase hit between body A and body B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    /// Unit collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    /// `normal * depth`: how far A and B must be pushed apart, combined.
    /// Zero for a contact predicted within the step but not yet overlapping.
    pub penetration: Vec2,
}

impl CollisionManifold {
    /// `depth` is clamped at zero.
    pub fn new(normal: Vec2, depth: f64) -> Self {
        Self { normal, penetration: normal * depth.max(0.0) }
    }

    /// A contact that will happen within the step but has no overlap yet.
    pub fn predicted(normal: Vec2) -> Self {
        Self { normal, penetration: Vec2::ZERO }
    }

    pub fn depth(&self) -> f64 {
        self.penetration.magnitude()
    }

    /// The same contact seen from body B. Pure negation; never re-derived.
    pub fn inverted(&self) -> Self {
        Self { normal: -self.normal, penetration: -self.penetration }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_negative_depth() {
        let m = CollisionManifold::new(Vec2::new(1.0, 0.0), -0.5);
        assert_eq!(m.penetration, Vec2::ZERO);
        assert_eq!(m.depth(), 0.0);
    }

    #[test]
    fn test_inverted_negates_both_vectors() {
        let m = CollisionManifold::new(Vec2::new(0.0, 1.0), 0.25);
        let inv = m.inverted();
        assert_eq!(inv.normal, Vec2::new(0.0, -1.0));
        assert_eq!(inv.penetration, Vec2::new(0.0, -0.25));
        assert_eq!(inv.inverted(), m);
    }
}
