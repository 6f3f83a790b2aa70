use crate::math::vec2::Vec2;
use crate::shapes::Sphere;

/// Advances a sphere one Verlet step.
///
/// `next = pos + (pos - old)`. Gravity is folded into the history rather than
/// the position (`old = pos - (0, gravity)`), so it shows up as extra velocity
/// from the following step on and is independent of mass. The y axis points down.
pub fn integrate(sphere: &mut Sphere, gravity: f64) {
    let current = sphere.position;
    sphere.position += current - sphere.old_position;
    sphere.old_position = current - Vec2::new(0.0, gravity);
}
