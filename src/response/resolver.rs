use serde::{Deserialize, Serialize};

use crate::collision::CollisionManifold;
use crate::error::CollisionError;
use crate::math::vec2::Vec2;

/// How velocities are reflected along the collision normal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestitutionMode {
    /// Impulse split by inverse mass, so the heavier body loses less velocity.
    /// Uses the smaller of the two bodies' restitution coefficients.
    #[default]
    MassWeighted,
    /// Each movable body reflects its own normal velocity with this coefficient.
    Fixed(f64),
}

impl RestitutionMode {
    pub fn validate(&self) -> Result<(), CollisionError> {
        match *self {
            RestitutionMode::MassWeighted => Ok(()),
            RestitutionMode::Fixed(e) if (0.0..=1.0).contains(&e) => Ok(()),
            RestitutionMode::Fixed(e) => Err(CollisionError::InvalidRestitution(e)),
        }
    }
}

/// What the resolver needs to know about one body of a solid pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseBody {
    pub velocity: Vec2,
    /// Zero for static bodies.
    pub inverse_mass: f64,
    pub restitution: f64,
    pub is_trigger: bool,
}

impl ResponseBody {
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }
}

/// Change for one body: a translation to add and the replacement velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseDelta {
    pub translation: Vec2,
    pub velocity: Vec2,
}

/// Deltas for both bodies of a pair, in the order the pair was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResponse {
    pub a: ResponseDelta,
    pub b: ResponseDelta,
}

impl PairResponse {
    /// The same response seen from body B. The deltas are per body, so
    /// swapping them is all that is needed.
    pub fn swapped(&self) -> Self {
        PairResponse { a: self.b, b: self.a }
    }
}

/// Computes the positional correction and velocity reflection for a solid pair.
///
/// The correction is split by inverse mass: together the two translations
/// remove the whole penetration, and a static body gets none of it.
/// Velocities only change while the bodies approach along the normal.
pub fn resolve(
    manifold: &CollisionManifold,
    a: &ResponseBody,
    b: &ResponseBody,
    mode: RestitutionMode,
) -> PairResponse {
    debug_assert!(!a.is_trigger && !b.is_trigger, "trigger pair reached the resolver");

    let total_inv_mass = a.inverse_mass + b.inverse_mass;
    if total_inv_mass == 0.0 {
        return PairResponse {
            a: ResponseDelta { translation: Vec2::ZERO, velocity: a.velocity },
            b: ResponseDelta { translation: Vec2::ZERO, velocity: b.velocity },
        };
    }

    let translation_a = -manifold.penetration * (a.inverse_mass / total_inv_mass);
    let translation_b = manifold.penetration * (b.inverse_mass / total_inv_mass);
    debug_assert!(!a.is_static() || translation_a == Vec2::ZERO, "static body received a correction");
    debug_assert!(!b.is_static() || translation_b == Vec2::ZERO, "static body received a correction");

    let normal = manifold.normal;
    // Positive or zero: already separating along the normal, velocities stay
    let approach = (b.velocity - a.velocity).dot(normal);
    let (velocity_a, velocity_b) = match mode {
        _ if approach >= 0.0 => (a.velocity, b.velocity),
        RestitutionMode::MassWeighted => {
            let e = a.restitution.min(b.restitution);
            let j = -(1.0 + e) * approach / total_inv_mass;
            (a.velocity - normal * (j * a.inverse_mass), b.velocity + normal * (j * b.inverse_mass))
        }
        RestitutionMode::Fixed(e) => {
            // A moves toward B along +normal, B toward A along -normal
            let along_a = a.velocity.dot(normal);
            let along_b = b.velocity.dot(normal);
            let velocity_a = if !a.is_static() && along_a > 0.0 {
                a.velocity - normal * ((1.0 + e) * along_a)
            } else {
                a.velocity
            };
            let velocity_b = if !b.is_static() && along_b < 0.0 {
                b.velocity - normal * ((1.0 + e) * along_b)
            } else {
                b.velocity
            };
            (velocity_a, velocity_b)
        }
    };

    log::trace!(
        "resolve {:?}: normal {:?} depth {:.4} -> dA {:?} dB {:?}",
        mode,
        normal,
        manifold.depth(),
        translation_a,
        translation_b
    );

    PairResponse {
        a: ResponseDelta { translation: translation_a, velocity: velocity_a },
        b: ResponseDelta { translation: translation_b, velocity: velocity_b },
    }
}
