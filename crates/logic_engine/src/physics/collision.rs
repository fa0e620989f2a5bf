//! Narrow-phase intersection tests for 2D collider shapes
//!
//! Every positive [`CollisionInfo`] returned here has its normal pointing
//! from the first argument toward the second. Reversed shape orders reuse the
//! canonical test with swapped arguments and a negated normal.

use crate::ecs::components::CollisionInfo;
use crate::foundation::math::{constants::LENGTH_EPSILON, normalize_or_zero, Vec2};

/// A collider resolved into world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// Circle
    Circle {
        /// World-space center
        center: Vec2,
        /// Radius
        radius: f32,
    },
    /// Axis-aligned box
    Aabb {
        /// World-space center
        center: Vec2,
        /// Half width and half height
        half_size: Vec2,
    },
    /// Thick line segment
    LineSegment {
        /// First endpoint
        start: Vec2,
        /// Second endpoint
        end: Vec2,
        /// Extra contact radius around the segment
        thickness: f32,
    },
}

/// Dispatch on the shape pair
///
/// Pairs without a dedicated test (line-line, line-box, box-line) report no
/// collision.
pub fn check_collision(a: &WorldShape, b: &WorldShape) -> CollisionInfo {
    use WorldShape::{Aabb, Circle, LineSegment};

    match (*a, *b) {
        (Circle { center: ca, radius: ra }, Circle { center: cb, radius: rb }) => {
            check_circle_circle(ca, ra, cb, rb)
        }
        (Circle { center, radius }, LineSegment { start, end, thickness }) => {
            check_circle_line(center, radius, start, end, thickness)
        }
        (LineSegment { start, end, thickness }, Circle { center, radius }) => {
            flipped(check_circle_line(center, radius, start, end, thickness))
        }
        (Circle { center, radius }, Aabb { center: box_center, half_size }) => {
            check_circle_aabb(center, radius, box_center, half_size)
        }
        (Aabb { center: box_center, half_size }, Circle { center, radius }) => {
            flipped(check_circle_aabb(center, radius, box_center, half_size))
        }
        (Aabb { center: ca, half_size: ha }, Aabb { center: cb, half_size: hb }) => {
            check_aabb_aabb(ca, ha, cb, hb)
        }
        _ => CollisionInfo::none(),
    }
}

fn flipped(mut info: CollisionInfo) -> CollisionInfo {
    info.normal = -info.normal;
    info
}

/// Circle against circle
///
/// Coincident centers separate along +X.
pub fn check_circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> CollisionInfo {
    let delta = center_b - center_a;
    let distance = delta.magnitude();
    let combined = radius_a + radius_b;

    if distance >= combined {
        return CollisionInfo::none();
    }

    let normal = if distance > LENGTH_EPSILON {
        delta / distance
    } else {
        Vec2::new(1.0, 0.0)
    };

    CollisionInfo::new(center_a + normal * radius_a, normal, combined - distance)
}

/// Circle against a thick segment
///
/// The contact point is the closest point on the segment. A circle centered
/// on the segment is pushed along +Y, so the normal falls back to -Y.
pub fn check_circle_line(
    center: Vec2,
    radius: f32,
    start: Vec2,
    end: Vec2,
    thickness: f32,
) -> CollisionInfo {
    let closest = closest_point_on_segment(center, start, end);
    toward_closest_point(center, closest, radius + thickness)
}

/// Circle against an axis-aligned box
///
/// The contact point is the center clamped into the box.
pub fn check_circle_aabb(center: Vec2, radius: f32, box_center: Vec2, half_size: Vec2) -> CollisionInfo {
    let min = box_center - half_size;
    let max = box_center + half_size;
    let closest = Vec2::new(center.x.clamp(min.x, max.x), center.y.clamp(min.y, max.y));
    toward_closest_point(center, closest, radius)
}

/// Shared tail of the circle tests: overlap if `closest` lies within `reach`
/// of `center`, with the normal pointing from the circle toward `closest`
fn toward_closest_point(center: Vec2, closest: Vec2, reach: f32) -> CollisionInfo {
    let outward = center - closest;
    let distance = outward.magnitude();

    if distance >= reach {
        return CollisionInfo::none();
    }

    let normal = if distance > LENGTH_EPSILON {
        -outward / distance
    } else {
        Vec2::new(0.0, -1.0)
    };

    CollisionInfo::new(closest, normal, reach - distance)
}

/// Box against box, separated along the axis of least penetration
///
/// Equal penetration on both axes separates along Y. The contact point sits
/// on the face of `a` facing `b`.
pub fn check_aabb_aabb(center_a: Vec2, half_a: Vec2, center_b: Vec2, half_b: Vec2) -> CollisionInfo {
    let delta = center_b - center_a;
    let combined = half_a + half_b;

    if delta.x.abs() >= combined.x || delta.y.abs() >= combined.y {
        return CollisionInfo::none();
    }

    let penetration_x = combined.x - delta.x.abs();
    let penetration_y = combined.y - delta.y.abs();

    if penetration_x < penetration_y {
        let sign = if delta.x > 0.0 { 1.0 } else { -1.0 };
        CollisionInfo::new(
            center_a + Vec2::new(sign * half_a.x, 0.0),
            Vec2::new(sign, 0.0),
            penetration_x,
        )
    } else {
        let sign = if delta.y > 0.0 { 1.0 } else { -1.0 };
        CollisionInfo::new(
            center_a + Vec2::new(0.0, sign * half_a.y),
            Vec2::new(0.0, sign),
            penetration_y,
        )
    }
}

/// Closest point to `point` on the segment `start..end`
///
/// Degenerate segments collapse to `start`.
pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let segment = end - start;
    let length = segment.magnitude();

    if length < LENGTH_EPSILON {
        return start;
    }

    let direction = normalize_or_zero(segment);
    let projection = (point - start).dot(&direction).clamp(0.0, length);
    start + direction * projection
}
