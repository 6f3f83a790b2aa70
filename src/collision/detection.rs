use crate::objects::Body;
use crate::shapes::{Capsule, Sphere};
use super::info::CollisionInfo;

/// Checks for overlap between two spheres.
///
/// Records depth `r1 + r2 - d`, the unit normal from `a` toward `b`, and `a`'s
/// centre as the contact point. Returns 1 if the record changed, 0 otherwise.
pub fn sphere_sphere(a: &Sphere, b: &Sphere, info: &mut CollisionInfo) -> i32 {
    let delta = b.position - a.position;
    let dist_sq = delta.magnitude_squared();
    let radii_sum = a.radius + b.radius;

    if dist_sq < radii_sum * radii_sum {
        let distance = dist_sq.sqrt();
        if distance == 0.0 {
            // Coincident centres have no direction to push along.
            return 0;
        }
        return info.update(radii_sum - distance, delta / distance, a.position) as i32;
    }
    0
}

/// Checks for overlap between a capsule and a sphere.
///
/// Past either end the test falls back to that endpoint's sphere. Along the
/// body the normal is the segment's perpendicular, flipped to point from the
/// segment toward the sphere, and the contact is the sphere's centre.
pub fn line_sphere(line: Capsule<'_>, sphere: &Sphere, info: &mut CollisionInfo) -> i32 {
    if line.is_degenerate() {
        return sphere_sphere(line.s1, sphere, info);
    }

    let t = line.project(sphere.position);
    if t < 0.0 {
        return sphere_sphere(line.s1, sphere, info);
    }
    if t > 1.0 {
        return sphere_sphere(line.s2, sphere, info);
    }

    let direction = line.direction();
    let mut normal = direction.perpendicular() / direction.magnitude();
    let mut distance = normal.dot(sphere.position - line.s1.position);
    if distance < 0.0 {
        distance = -distance;
        normal = -normal;
    }

    let radii_sum = line.radius + sphere.radius;
    if distance < radii_sum {
        return info.update(radii_sum - distance, normal, sphere.position) as i32;
    }
    0
}

/// Checks two capsules by probing each endpoint against the other segment.
///
/// All four probes share `info`, so only the shallowest overlap is kept. The
/// result says which side that probe came from: -1 when one of `a`'s
/// endpoints against `b` won, 1 when one of `b`'s endpoints against `a` won,
/// 0 when nothing was recorded. Used as an impulse scale for `a`, the sign
/// always pushes `a` out of `b`.
pub fn line_line(a: Capsule<'_>, b: Capsule<'_>, info: &mut CollisionInfo) -> i32 {
    let b1_in_a = line_sphere(a, b.s1, info);
    let b2_in_a = line_sphere(a, b.s2, info);
    let a1_in_b = line_sphere(b, a.s1, info);
    let a2_in_b = line_sphere(b, a.s2, info);

    if a1_in_b != 0 || a2_in_b != 0 {
        -1
    } else if b1_in_a != 0 || b2_in_a != 0 {
        1
    } else {
        0
    }
}

/// Dispatches on the shape pair. Seesaws collide as capsules over their endpoints.
///
/// The returned sign is the impulse scale that separates `a` from `b` along
/// `info.normal`; `b` takes the opposite sign.
pub fn check_collision(a: &Body, b: &Body, info: &mut CollisionInfo) -> i32 {
    match (a.as_sphere(), b.as_sphere()) {
        (Some(sa), Some(sb)) => sphere_sphere(sa, sb, info),
        (Some(sa), None) => match b.capsule() {
            Some(cb) => -line_sphere(cb, sa, info),
            None => 0,
        },
        (None, Some(sb)) => match a.capsule() {
            Some(ca) => line_sphere(ca, sb, info),
            None => 0,
        },
        (None, None) => match (a.capsule(), b.capsule()) {
            (Some(ca), Some(cb)) => line_line(ca, cb, info),
            _ => 0,
        },
    }
}
