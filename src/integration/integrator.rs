use crate::math::{Pose, Vec2};

/// Moves a body forward in time using Semi-Implicit Euler.
///
/// `inverse_mass` of zero marks a static body, which is left untouched.
/// Gravity is an acceleration, so it does not depend on the mass.
pub fn integrate(pose: &mut Pose, velocity: &mut Vec2, inverse_mass: f64, gravity: Vec2, dt: f64) {
    if inverse_mass == 0.0 {
        // Static object, do not integrate
        return;
    }

    // Update velocity first (v = v + g*dt), then position with the new velocity (p = p + v*dt)
    *velocity += gravity * dt;
    *pose = pose.translated(*velocity * dt);
}
