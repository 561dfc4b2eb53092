use super::{closest_point_on_segment, EPSILON};
use crate::collision::manifold::CollisionManifold;
use crate::math::vec2::Vec2;

/// Fallback normal when the two centers coincide: +Y from the larger circle,
/// -Y from the smaller, so swapping the pair flips it. Equal radii give +Y.
fn coincident_normal(ra: f64, rb: f64) -> Vec2 {
    if ra >= rb {
        Vec2::UP
    } else {
        -Vec2::UP
    }
}

pub fn overlaps_static(ca: Vec2, ra: f64, cb: Vec2, rb: f64) -> bool {
    let combined = ra + rb;
    ca.distance_squared(cb) <= combined * combined
}

/// Closest approach of B's center to A's center while B moves relative to A
/// over the step. Returns the point on B's relative path nearest to A.
fn closest_approach(ca: Vec2, va: Vec2, cb: Vec2, vb: Vec2, dt: f64) -> Vec2 {
    let end = cb + (vb - va) * dt;
    closest_point_on_segment(cb, end, ca).0
}

pub fn overlaps(ca: Vec2, ra: f64, va: Vec2, cb: Vec2, rb: f64, vb: Vec2, dt: f64) -> bool {
    if overlaps_static(ca, ra, cb, rb) {
        return true;
    }
    let combined = ra + rb;
    closest_approach(ca, va, cb, vb, dt).distance_squared(ca) <= combined * combined
}

/// Circle A against circle B; the normal points from A to B.
///
/// A current overlap carries its penetration depth. Circles that only meet
/// during the step produce a predicted contact whose normal is taken at the
/// first moment of touch.
pub fn contact(ca: Vec2, ra: f64, va: Vec2, cb: Vec2, rb: f64, vb: Vec2, dt: f64) -> Option<CollisionManifold> {
    let combined = ra + rb;
    let delta = cb - ca;
    let dist_sq = delta.magnitude_squared();

    if dist_sq <= combined * combined {
        let distance = dist_sq.sqrt();
        if distance <= EPSILON {
            return Some(CollisionManifold::new(coincident_normal(ra, rb), combined));
        }
        return Some(CollisionManifold::new(delta / distance, combined - distance));
    }

    let closest = closest_approach(ca, va, cb, vb, dt);
    if closest.distance_squared(ca) > combined * combined {
        return None;
    }

    let motion = (vb - va) * dt;
    let normal = first_touch(delta, motion, combined)
        .map(|s| (delta + motion * s).normalize())
        .unwrap_or_else(|| (closest - ca).normalize());
    if normal == Vec2::ZERO {
        return Some(CollisionManifold::predicted(coincident_normal(ra, rb)));
    }
    Some(CollisionManifold::predicted(normal))
}

/// Smallest `s` in `[0, 1]` with `|delta + motion * s| = combined`.
fn first_touch(delta: Vec2, motion: Vec2, combined: f64) -> Option<f64> {
    let a = motion.magnitude_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * delta.dot(motion);
    let c = delta.magnitude_squared() - combined * combined;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let s = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&s).then_some(s)
}
