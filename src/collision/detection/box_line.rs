use super::{axis_push, axis_sign, box_box, EPSILON};
use crate::collision::manifold::CollisionManifold;
use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// Box (body A, moving at `velocity`) against an immovable segment (body B).
///
/// An endpoint inside the box, or a separating-axis overlap on the box axes
/// and the segment normal, is a current contact. Otherwise each box corner is
/// tracked over one step of motion: a sign change of its distance to the
/// segment's line, at a crossing point within the segment, is a predicted
/// contact. This is a conservative approximation, not polygon clipping.
pub fn contact(
    bounds: &AABB,
    velocity: Vec2,
    p0: Vec2,
    p1: Vec2,
    normal: Vec2,
    dt: f64,
) -> Option<CollisionManifold> {
    let direction = p1 - p0;
    if direction.magnitude_squared() < EPSILON * EPSILON {
        // Degenerate segment: a point
        let point = AABB { min: p0, max: p0 };
        return box_box::contact(bounds, velocity, &point, Vec2::ZERO, dt);
    }

    if let Some(manifold) = current_contact(bounds, p0, p1, normal) {
        return Some(manifold);
    }

    let motion = velocity * dt;
    if motion == Vec2::ZERO {
        return None;
    }
    predicted_contact(bounds, motion, p0, p1, normal)
        .or_else(|| endpoint_sweep(bounds, velocity, p0, p1, dt))
}

fn corners(bounds: &AABB) -> [Vec2; 4] {
    [
        bounds.min,
        Vec2::new(bounds.max.x, bounds.min.y),
        bounds.max,
        Vec2::new(bounds.min.x, bounds.max.y),
    ]
}

/// True when `point` projects onto the segment body (checked against both endpoints).
fn within_segment(point: Vec2, p0: Vec2, p1: Vec2) -> bool {
    (point - p0).dot(p1 - p0) >= 0.0 && (point - p1).dot(p0 - p1) >= 0.0
}

fn current_contact(bounds: &AABB, p0: Vec2, p1: Vec2, normal: Vec2) -> Option<CollisionManifold> {
    let endpoint_inside = bounds.contains_point(p0) || bounds.contains_point(p1);
    let segment_bounds = AABB::new(p0, p1);

    let (depth_x, sign_x) = axis_push(bounds.min.x, bounds.max.x, segment_bounds.min.x, segment_bounds.max.x);
    let (depth_y, sign_y) = axis_push(bounds.min.y, bounds.max.y, segment_bounds.min.y, segment_bounds.max.y);

    // Box corners projected on the normal, against the line itself at zero
    let mut s_min = f64::INFINITY;
    let mut s_max = f64::NEG_INFINITY;
    for corner in corners(bounds) {
        let s = normal.dot(corner - p0);
        s_min = s_min.min(s);
        s_max = s_max.max(s);
    }
    let (depth_n, sign_n) = axis_push(s_min, s_max, 0.0, 0.0);

    if !endpoint_inside && (depth_x < 0.0 || depth_y < 0.0 || depth_n < 0.0) {
        return None;
    }

    // Smallest push wins; the segment normal is preferred on ties.
    let manifold = if depth_n <= depth_x && depth_n <= depth_y {
        CollisionManifold::new(normal * sign_n, depth_n)
    } else if depth_x <= depth_y {
        CollisionManifold::new(Vec2::new(sign_x, 0.0), depth_x)
    } else {
        CollisionManifold::new(Vec2::new(0.0, sign_y), depth_y)
    };
    Some(manifold)
}

/// Earliest corner whose signed distance to the line changes sign during the
/// step at a point inside the segment.
fn predicted_contact(bounds: &AABB, motion: Vec2, p0: Vec2, p1: Vec2, normal: Vec2) -> Option<CollisionManifold> {
    let travel = normal.dot(motion);
    if travel == 0.0 {
        // Moving parallel to the line: distances never change
        return None;
    }

    let mut earliest: Option<(f64, f64)> = None;
    for corner in corners(bounds) {
        let s0 = normal.dot(corner - p0);
        let s1 = s0 + travel;
        if s0 * s1 > 0.0 {
            continue;
        }
        let t = s0 / (s0 - s1);
        let crossing = corner + motion * t;
        if !within_segment(crossing, p0, p1) {
            continue;
        }
        let side = if s0 != 0.0 { axis_sign(s0) } else { -axis_sign(s1) };
        if earliest.map_or(true, |(best, _)| t < best) {
            earliest = Some((t, side));
        }
    }

    earliest.map(|(_, side)| CollisionManifold::predicted(normal * -side))
}

/// Segment endpoints sliding across a box face without any corner crossing the line.
fn endpoint_sweep(bounds: &AABB, velocity: Vec2, p0: Vec2, p1: Vec2, dt: f64) -> Option<CollisionManifold> {
    [p0, p1]
        .iter()
        .filter_map(|&p| {
            let point = AABB { min: p, max: p };
            box_box::sweep(bounds, velocity, &point, Vec2::ZERO, dt)
                .and_then(|(enter, _)| box_box::contact(bounds, velocity, &point, Vec2::ZERO, dt).map(|m| (enter, m)))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, manifold)| manifold)
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPS: f64 = 1e-9;

    fn square(x: f64, y: f64, half: f64) -> AABB {
        AABB::new(Vec2::new(x - half, y - half), Vec2::new(x + half, y + half))
    }

    fn segment(p0: Vec2, p1: Vec2) -> (Vec2, Vec2, Vec2) {
        (p0, p1, (p1 - p0).perpendicular().normalize())
    }

    #[test]
    fn test_endpoint_inside_box() {
        let (p0, p1, n) = segment(Vec2::new(0.5, 0.0), Vec2::new(5.0, 3.0));
        assert!(contact(&square(0.0, 0.0, 1.0), Vec2::ZERO, p0, p1, n, 0.0).is_some());
    }

    #[test]
    fn test_segment_through_box_without_endpoints_inside() {
        // Floor segment at y = -0.8 crossing a unit box
        let (p0, p1, n) = segment(Vec2::new(-5.0, -0.8), Vec2::new(5.0, -0.8));
        let m = contact(&square(0.0, 0.0, 1.0), Vec2::ZERO, p0, p1, n, 0.0).unwrap();
        // Box is above the floor: push it up, i.e. the normal from box to line points down
        assert!((m.normal.y - -1.0).abs() < EPS);
        assert!((m.depth() - 0.2).abs() < EPS);
    }

    #[test]
    fn test_separated_segment() {
        let (p0, p1, n) = segment(Vec2::new(-5.0, -2.0), Vec2::new(5.0, -2.0));
        assert!(contact(&square(0.0, 0.0, 1.0), Vec2::ZERO, p0, p1, n, 1.0).is_none());
        // Diagonal segment near but outside the corner
        let (p0, p1, n) = segment(Vec2::new(1.5, 0.0), Vec2::new(0.0, 1.5));
        assert!(contact(&square(0.0, 0.0, 0.5), Vec2::ZERO, p0, p1, n, 1.0).is_none());
    }

    #[test]
    fn test_corner_crossing_during_step() {
        let (p0, p1, n) = segment(Vec2::new(-5.0, -3.0), Vec2::new(5.0, -3.0));
        let bounds = square(0.0, 0.0, 1.0);
        let m = contact(&bounds, Vec2::new(0.0, -4.0), p0, p1, n, 1.0).unwrap();
        assert_eq!(m.penetration, Vec2::ZERO);
        assert!((m.normal.y - -1.0).abs() < EPS);
        // Not fast enough to reach it this step
        assert!(contact(&bounds, Vec2::new(0.0, -1.0), p0, p1, n, 1.0).is_none());
    }

    #[test]
    fn test_crossing_outside_segment_is_ignored() {
        let (p0, p1, n) = segment(Vec2::new(10.0, -3.0), Vec2::new(20.0, -3.0));
        assert!(contact(&square(0.0, 0.0, 1.0), Vec2::new(0.0, -4.0), p0, p1, n, 1.0).is_none());
    }

    #[test]
    fn test_endpoint_swept_by_box_face() {
        // Short vertical stub ahead of the box; no corner crosses its line inside the stub
        let (p0, p1, n) = segment(Vec2::new(3.0, -0.5), Vec2::new(3.0, 0.5));
        let m = contact(&square(0.0, 0.0, 1.0), Vec2::new(5.0, 0.0), p0, p1, n, 1.0).unwrap();
        assert!((m.normal.x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_segment_and_box() {
        let (p0, p1, n) = segment(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0));
        assert!(contact(&square(0.0, 0.0, 0.0), Vec2::ZERO, p0, p1, n, 1.0).is_some());
        assert!(contact(&square(3.0, 0.0, 0.0), Vec2::ZERO, p0, p1, n, 1.0).is_none());
        let (p0, p1, n) = segment(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(contact(&square(0.0, 0.0, 0.0), Vec2::ZERO, p0, p1, n, 1.0).is_some());
    }
}
