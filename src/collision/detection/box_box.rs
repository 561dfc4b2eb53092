use super::{axis_push, axis_sign};
use crate::collision::manifold::CollisionManifold;
use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// Separating-axis test on world bounds. Touching edges count as overlap.
pub fn overlaps_static(a: &AABB, b: &AABB) -> bool {
    !(a.max.x < b.min.x || a.min.x > b.max.x || a.max.y < b.min.y || a.min.y > b.max.y)
}

/// Time interval, clipped to `[0, dt]`, during which `a` moving at `va` and
/// `b` moving at `vb` overlap on both axes. `None` if they never do.
pub fn sweep(a: &AABB, va: Vec2, b: &AABB, vb: Vec2, dt: f64) -> Option<(f64, f64)> {
    let relative = va - vb;
    let (enter_x, exit_x) = axis_interval(a.min.x, a.max.x, b.min.x, b.max.x, relative.x)?;
    let (enter_y, exit_y) = axis_interval(a.min.y, a.max.y, b.min.y, b.max.y, relative.y)?;

    let enter = enter_x.max(enter_y);
    let exit = exit_x.min(exit_y);
    if enter > exit || exit < 0.0 || enter > dt {
        return None;
    }
    Some((enter.max(0.0), exit.min(dt)))
}

/// Entry/exit times of one axis projection. A zero velocity component never
/// crosses: the axis either always overlaps or never does.
fn axis_interval(a_min: f64, a_max: f64, b_min: f64, b_max: f64, velocity: f64) -> Option<(f64, f64)> {
    if velocity == 0.0 {
        return if a_max < b_min || a_min > b_max {
            None
        } else {
            Some((f64::NEG_INFINITY, f64::INFINITY))
        };
    }
    let t0 = (b_min - a_max) / velocity;
    let t1 = (b_max - a_min) / velocity;
    Some((t0.min(t1), t0.max(t1)))
}

pub fn overlaps(a: &AABB, va: Vec2, b: &AABB, vb: Vec2, dt: f64) -> bool {
    overlaps_static(a, b) || sweep(a, va, b, vb, dt).is_some()
}

/// Penetration along the axis needing the smallest push, or a predicted contact on the
/// axis that is entered last when the boxes only meet later in the step.
pub fn contact(a: &AABB, va: Vec2, b: &AABB, vb: Vec2, dt: f64) -> Option<CollisionManifold> {
    if overlaps_static(a, b) {
        let (depth_x, sign_x) = axis_push(a.min.x, a.max.x, b.min.x, b.max.x);
        let (depth_y, sign_y) = axis_push(a.min.y, a.max.y, b.min.y, b.max.y);
        return Some(if depth_x <= depth_y {
            CollisionManifold::new(Vec2::new(sign_x, 0.0), depth_x)
        } else {
            CollisionManifold::new(Vec2::new(0.0, sign_y), depth_y)
        });
    }

    sweep(a, va, b, vb, dt)?;
    let relative = va - vb;
    let enter_x = entry_time(a.min.x, a.max.x, b.min.x, b.max.x, relative.x);
    let enter_y = entry_time(a.min.y, a.max.y, b.min.y, b.max.y, relative.y);
    let normal = if enter_x >= enter_y {
        Vec2::new(axis_sign(relative.x), 0.0)
    } else {
        Vec2::new(0.0, axis_sign(relative.y))
    };
    Some(CollisionManifold::predicted(normal))
}

fn entry_time(a_min: f64, a_max: f64, b_min: f64, b_max: f64, velocity: f64) -> f64 {
    axis_interval(a_min, a_max, b_min, b_max, velocity).map_or(f64::INFINITY, |(enter, _)| enter)
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn square(x: f64, y: f64, half: f64) -> AABB {
        AABB::new(Vec2::new(x - half, y - half), Vec2::new(x + half, y + half))
    }

    #[test]
    fn test_static_overlap_scenarios() {
        let a = square(0.0, 0.0, 1.0);
        assert!(overlaps_static(&a, &square(1.5, 0.0, 1.0)));
        assert!(!overlaps_static(&a, &square(2.5, 0.0, 1.0)));
        assert!(overlaps_static(&a, &square(2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_contact_uses_least_overlap_axis() {
        let m = contact(&square(0.0, 0.0, 1.0), Vec2::ZERO, &square(1.5, 0.0, 1.0), Vec2::ZERO, 0.0).unwrap();
        assert_eq!(m.normal, Vec2::new(1.0, 0.0));
        assert!((m.penetration.x - 0.5).abs() < EPSILON);
        assert_eq!(m.penetration.y, 0.0);

        let m = contact(&square(0.0, 0.0, 1.0), Vec2::ZERO, &square(0.2, -1.8, 1.0), Vec2::ZERO, 0.0).unwrap();
        assert_eq!(m.normal, Vec2::new(0.0, -1.0));
        assert!((m.depth() - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_sweep_detects_collision_within_step() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 0.0, 1.0);
        let (enter, exit) = sweep(&a, Vec2::new(10.0, 0.0), &b, Vec2::ZERO, 1.0).unwrap();
        assert!((enter - 0.8).abs() < EPSILON);
        assert!((exit - 1.0).abs() < EPSILON);
        assert!(sweep(&a, Vec2::new(10.0, 0.0), &b, Vec2::ZERO, 0.5).is_none());
        assert!(sweep(&a, Vec2::new(-10.0, 0.0), &b, Vec2::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_sweep_zero_velocity_axis_never_crosses() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 5.0, 1.0);
        // Moving along x only, but y ranges never overlap
        assert!(sweep(&a, Vec2::new(20.0, 0.0), &b, Vec2::ZERO, 1.0).is_none());
        assert!(sweep(&a, Vec2::ZERO, &b, Vec2::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_predicted_contact_normal_follows_motion() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.0, 10.0, 1.0);
        let m = contact(&a, Vec2::ZERO, &b, Vec2::new(0.0, -20.0), 1.0).unwrap();
        assert_eq!(m.normal, Vec2::new(0.0, 1.0));
        assert_eq!(m.penetration, Vec2::ZERO);
    }

    #[test]
    fn test_zero_size_boxes() {
        let point = square(0.0, 0.0, 0.0);
        assert!(overlaps(&point, Vec2::ZERO, &point, Vec2::ZERO, 1.0));
        let m = contact(&point, Vec2::ZERO, &point, Vec2::ZERO, 1.0).unwrap();
        assert_eq!(m.penetration, Vec2::ZERO);
        assert!(!overlaps(&point, Vec2::ZERO, &square(1.0, 0.0, 0.0), Vec2::ZERO, 1.0));
    }
}
