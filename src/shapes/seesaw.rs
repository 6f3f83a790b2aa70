use crate::collision::CollisionInfo;
use crate::constraints::{Constraint, DistanceConstraint, PinJoint};
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use super::line::Capsule;
use super::sphere::Sphere;

/// A rod pivoting around a fixed hinge point, with independently weighted ends.
///
/// The ends are plain spheres that integrate and take impulses on their own;
/// [`Seesaw::align`] pulls them back onto the pivot and rod length afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seesaw {
    pub s1: Sphere,
    pub s2: Sphere,
    pub radius: f64,
    pivot: PinJoint,
    rod: DistanceConstraint,
}

impl Seesaw {
    /// `hinge` is the pivot's fraction along a→b; the pivot is pinned where it
    /// starts out in world space.
    pub fn new(a: Vec2, b: Vec2, radius: f64, hinge: f64, mass1: f64, mass2: f64) -> Self {
        let length = a.distance(b);
        assert!(length > 0.0, "Seesaw needs a non-zero length");
        let s1 = Sphere::new(a, radius, mass1);
        let s2 = Sphere::new(b, radius, mass2);
        Self {
            s1,
            s2,
            radius,
            pivot: PinJoint::new(hinge, a.lerp(b, hinge), mass1 / (mass1 + mass2)),
            rod: DistanceConstraint::new(length),
        }
    }

    pub fn capsule(&self) -> Capsule<'_> {
        Capsule { s1: &self.s1, s2: &self.s2, radius: self.radius }
    }

    pub fn hinge(&self) -> f64 {
        self.pivot.hinge
    }

    /// The fixed world point the pivot is pinned to.
    pub fn anchor(&self) -> Vec2 {
        self.pivot.anchor
    }

    /// Where the pivot currently sits on the rod.
    pub fn pivot_position(&self) -> Vec2 {
        self.pivot.pivot(&self.s1, &self.s2)
    }

    pub fn length(&self) -> f64 {
        self.rod.distance
    }

    pub fn lambda(&self) -> f64 {
        self.pivot.lambda
    }

    pub fn mass_ratio(&self) -> f64 {
        self.s1.mass / (self.s1.mass + self.s2.mass)
    }

    /// Pivot correction, then rod length correction.
    pub fn align(&mut self) {
        self.pivot.solve_position(&mut self.s1, &mut self.s2);
        self.rod.solve_position(&mut self.s1, &mut self.s2);
    }

    pub fn integrate(&mut self, gravity: f64) {
        integrator::integrate(&mut self.s1, gravity);
        integrator::integrate(&mut self.s2, gravity);
        self.align();
    }

    /// Splits the push between both ends by contact position and mass ratio.
    pub fn apply_impulse(&mut self, info: &CollisionInfo, scale: f64) {
        let t = self.capsule().clamped_param(info.point);
        let r = self.mass_ratio();
        self.s1.apply_impulse(info, scale * (1.0 - t) * (1.0 - r), false);
        self.s2.apply_impulse(info, scale * t * r, false);
        self.align();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn scene_seesaw() -> Seesaw {
        Seesaw::new(Vec2::new(260.0, 124.0), Vec2::new(390.0, 139.0), 3.0, 0.8, 1.0, 4.2)
    }

    fn assert_aligned(seesaw: &Seesaw, tolerance: f64) {
        let length = seesaw.s1.position.distance(seesaw.s2.position);
        assert!((length - seesaw.length()).abs() < tolerance, "length drift {}", length - seesaw.length());
        let drift = seesaw.pivot_position().distance(seesaw.anchor());
        assert!(drift < tolerance, "pivot drift {}", drift);
    }

    #[test]
    fn test_seesaw_new() {
        let seesaw = scene_seesaw();
        let expected_length = (130.0f64 * 130.0 + 15.0 * 15.0).sqrt();
        assert!((seesaw.length() - expected_length).abs() < EPSILON);
        assert!((seesaw.anchor().x - 364.0).abs() < EPSILON);
        assert!((seesaw.anchor().y - 136.0).abs() < EPSILON);
        let r = 1.0 / 5.2;
        let lambda = 1.0 / (0.64 * r + 0.04 * (1.0 - r));
        assert!((seesaw.lambda() - lambda).abs() < EPSILON);
        assert_aligned(&seesaw, EPSILON);
    }

    #[test]
    #[should_panic]
    fn test_zero_length_seesaw_panics() {
        Seesaw::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 3.0, 0.5, 1.0, 1.0);
    }

    #[test]
    fn test_integration_converges_to_constraints() {
        let mut seesaw = scene_seesaw();
        for _ in 0..200 {
            seesaw.integrate(1.0);
            assert!(seesaw.s1.position.is_finite() && seesaw.s2.position.is_finite());
        }
        for _ in 0..100 {
            seesaw.align();
        }
        assert_aligned(&seesaw, 1e-6);
    }

    #[test]
    fn test_impulses_converge_back_to_constraints() {
        let mut seesaw = scene_seesaw();
        let mut info = CollisionInfo::new();
        info.update(4.0, Vec2::new(0.0, -1.0), Vec2::new(280.0, 126.0));
        for step in 0..50 {
            seesaw.integrate(1.0);
            if step % 3 == 0 {
                seesaw.apply_impulse(&info, -1.0);
            }
        }
        for _ in 0..100 {
            seesaw.align();
        }
        assert_aligned(&seesaw, 1e-6);
    }

    #[test]
    fn test_impulse_near_s1_moves_s1_more() {
        let mut seesaw = Seesaw::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 3.0, 0.5, 1.0, 1.0);
        let mut info = CollisionInfo::new();
        info.update(2.0, Vec2::new(0.0, -1.0), Vec2::new(10.0, 0.0));
        seesaw.apply_impulse(&info, 1.0);
        // Pushed along +y near s1: the rod tilts around the pivot.
        assert!(seesaw.s1.position.y > 0.0);
        assert!(seesaw.s2.position.y < 0.0);
    }
}
