use super::{axis_sign, circle_circle, EPSILON};
use crate::collision::manifold::CollisionManifold;
use crate::math::vec2::Vec2;

/// Circle (body A, moving at `velocity`) against an immovable segment (body B).
///
/// Two offset lines run parallel to the segment at one radius on each side.
/// A circle starting between them overlaps the face when its center projects
/// onto the segment body, otherwise it can only touch an endpoint. A circle
/// starting outside is swept to the time it crosses the offset line on its
/// approach side; a crossing outside the segment body falls back to the
/// endpoint disks.
pub fn contact(
    center: Vec2,
    radius: f64,
    velocity: Vec2,
    p0: Vec2,
    p1: Vec2,
    normal: Vec2,
    dt: f64,
) -> Option<CollisionManifold> {
    if (p1 - p0).magnitude_squared() < EPSILON * EPSILON {
        return endpoint_contact(center, radius, velocity, p0, p0, dt);
    }

    let motion = velocity * dt;
    let travel = normal.dot(motion);
    let s0 = normal.dot(center - p0);
    // Approach side; a center on the line takes the side it arrives from
    let side = if s0 != 0.0 {
        axis_sign(s0)
    } else if travel != 0.0 {
        -axis_sign(travel)
    } else {
        1.0
    };

    if s0.abs() <= radius {
        let foot = center - normal * s0;
        if within_segment(foot, p0, p1) {
            return Some(CollisionManifold::new(normal * -side, radius - s0.abs()));
        }
        return endpoint_contact(center, radius, velocity, p0, p1, dt);
    }

    if travel == 0.0 {
        // Moving parallel to the segment: never reaches the offset line
        return None;
    }
    let s1 = s0 + travel;
    let t = (s0 - side * radius) / (s0 - s1);
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    let foot = center + motion * t - normal * (side * radius);
    if within_segment(foot, p0, p1) {
        return Some(CollisionManifold::predicted(normal * -side));
    }
    endpoint_contact(center, radius, velocity, p0, p1, dt)
}

/// True when `point` projects onto the segment body (checked against both endpoints).
fn within_segment(point: Vec2, p0: Vec2, p1: Vec2) -> bool {
    (point - p0).dot(p1 - p0) >= 0.0 && (point - p1).dot(p0 - p1) >= 0.0
}

/// Endpoint disks of zero radius, nearest endpoint first.
fn endpoint_contact(
    center: Vec2,
    radius: f64,
    velocity: Vec2,
    p0: Vec2,
    p1: Vec2,
    dt: f64,
) -> Option<CollisionManifold> {
    let (near, far) = if center.distance_squared(p0) <= center.distance_squared(p1) {
        (p0, p1)
    } else {
        (p1, p0)
    };
    circle_circle::contact(center, radius, velocity, near, 0.0, Vec2::ZERO, dt)
        .or_else(|| circle_circle::contact(center, radius, velocity, far, 0.0, Vec2::ZERO, dt))
}
