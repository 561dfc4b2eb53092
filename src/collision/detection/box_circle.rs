use super::axis_sign;
use crate::collision::manifold::CollisionManifold;
use crate::math::vec2::Vec2;

/// Where the circle's center sits relative to the box's half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Center inside the box on both axes.
    Inside,
    /// Inside the box's X span, above or below it.
    FaceY,
    /// Inside the box's Y span, left or right of it.
    FaceX,
    /// Outside both spans: the nearest box feature is a corner.
    Corner,
}

fn classify(offset: Vec2, half_extent: Vec2) -> Region {
    let inside_x = offset.x.abs() <= half_extent.x;
    let inside_y = offset.y.abs() <= half_extent.y;
    match (inside_x, inside_y) {
        (true, true) => Region::Inside,
        (true, false) => Region::FaceY,
        (false, true) => Region::FaceX,
        (false, false) => Region::Corner,
    }
}

fn nearest_corner(box_center: Vec2, half_extent: Vec2, offset: Vec2) -> Vec2 {
    box_center + Vec2::new(axis_sign(offset.x) * half_extent.x, axis_sign(offset.y) * half_extent.y)
}

pub fn overlaps(box_center: Vec2, half_extent: Vec2, circle_center: Vec2, radius: f64) -> bool {
    let offset = circle_center - box_center;
    match classify(offset, half_extent) {
        Region::Inside => true,
        Region::FaceY => offset.y.abs() <= half_extent.y + radius,
        Region::FaceX => offset.x.abs() <= half_extent.x + radius,
        Region::Corner => {
            let corner = nearest_corner(box_center, half_extent, offset);
            circle_center.distance_squared(corner) <= radius * radius
        }
    }
}

/// Box is body A, circle is body B; the normal points from the box to the circle.
pub fn contact(box_center: Vec2, half_extent: Vec2, circle_center: Vec2, radius: f64) -> Option<CollisionManifold> {
    let offset = circle_center - box_center;
    match classify(offset, half_extent) {
        Region::Inside => {
            let depth_x = half_extent.x + radius - offset.x.abs();
            let depth_y = half_extent.y + radius - offset.y.abs();
            Some(if depth_x <= depth_y {
                CollisionManifold::new(Vec2::new(axis_sign(offset.x), 0.0), depth_x)
            } else {
                CollisionManifold::new(Vec2::new(0.0, axis_sign(offset.y)), depth_y)
            })
        }
        Region::FaceY => {
            let depth = half_extent.y + radius - offset.y.abs();
            (depth >= 0.0).then(|| CollisionManifold::new(Vec2::new(0.0, axis_sign(offset.y)), depth))
        }
        Region::FaceX => {
            let depth = half_extent.x + radius - offset.x.abs();
            (depth >= 0.0).then(|| CollisionManifold::new(Vec2::new(axis_sign(offset.x), 0.0), depth))
        }
        Region::Corner => {
            let corner = nearest_corner(box_center, half_extent, offset);
            let to_circle = circle_center - corner;
            let dist_sq = to_circle.magnitude_squared();
            if dist_sq > radius * radius {
                return None;
            }
            // Outside both spans, so the center never sits on the corner itself
            let distance = dist_sq.sqrt();
            Some(CollisionManifold::new(to_circle / distance, radius - distance))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_face_region_overlap() {
        let half = Vec2::new(1.0, 1.0);
        let m = contact(Vec2::ZERO, half, Vec2::new(0.5, 1.5), 1.0).unwrap();
        assert_eq!(m.normal, Vec2::new(0.0, 1.0));
        assert!((m.depth() - 0.5).abs() < EPSILON);
        assert!(overlaps(Vec2::ZERO, half, Vec2::new(0.5, 1.5), 1.0));

        assert!(contact(Vec2::ZERO, half, Vec2::new(-2.5, 0.0), 1.0).is_none());
        assert!(!overlaps(Vec2::ZERO, half, Vec2::new(-2.5, 0.0), 1.0));
    }

    #[test]
    fn test_corner_region_uses_squared_distance() {
        let half = Vec2::new(1.0, 1.0);
        // Inside the combined extents but outside the rounded corner
        let center = Vec2::new(1.8, 1.8);
        assert!(!overlaps(Vec2::ZERO, half, center, 1.0));
        assert!(contact(Vec2::ZERO, half, center, 1.0).is_none());

        let center = Vec2::new(1.5, 1.5);
        let m = contact(Vec2::ZERO, half, center, 1.0).unwrap();
        let expected = Vec2::new(1.0, 1.0).normalize();
        assert!((m.normal.x - expected.x).abs() < EPSILON);
        assert!((m.normal.y - expected.y).abs() < EPSILON);
        assert!((m.depth() - (1.0 - 0.5_f64.sqrt())).abs() < EPSILON);
    }

    #[test]
    fn test_center_inside_box_pushes_along_shallow_axis() {
        let m = contact(Vec2::ZERO, Vec2::new(2.0, 1.0), Vec2::new(-1.5, 0.2), 0.5).unwrap();
        assert_eq!(m.normal, Vec2::new(-1.0, 0.0));
        assert!((m.depth() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_shapes() {
        // Zero radius on the box edge still touches
        assert!(overlaps(Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), 0.0));
        // Zero-size box at the circle's rim
        let m = contact(Vec2::new(2.0, 0.0), Vec2::ZERO, Vec2::ZERO, 2.0).unwrap();
        assert_eq!(m.penetration, Vec2::ZERO);
        // Both degenerate and apart
        assert!(!overlaps(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 3.0), 0.0));
        assert!(contact(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 3.0), 0.0).is_none());
    }
}
