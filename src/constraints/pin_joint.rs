use crate::math::vec2::Vec2;
use crate::shapes::Sphere;
use super::Constraint;

/// Pins the point at fraction `hinge` along the segment a→b to a fixed world anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinJoint {
    /// Pivot position along the segment, 0 at `a`, 1 at `b`.
    pub hinge: f64,
    /// World position the pivot is pinned to.
    pub anchor: Vec2,
    /// Stiffness that makes one solve land the pivot exactly on the anchor.
    pub lambda: f64,
}

impl PinJoint {
    /// `mass_ratio` is `m_a / (m_a + m_b)`.
    pub fn new(hinge: f64, anchor: Vec2, mass_ratio: f64) -> Self {
        assert!((0.0..=1.0).contains(&hinge), "Hinge must lie on the segment");
        let lambda = 1.0
            / (hinge * hinge * mass_ratio + (1.0 - hinge) * (1.0 - hinge) * (1.0 - mass_ratio));
        Self { hinge, anchor, lambda }
    }

    /// Current world position of the pivot point.
    pub fn pivot(&self, a: &Sphere, b: &Sphere) -> Vec2 {
        a.position.lerp(b.position, self.hinge)
    }
}

impl Constraint for PinJoint {
    fn solve_position(&self, a: &mut Sphere, b: &mut Sphere) {
        let delta = (self.anchor - self.pivot(a, b)) * self.lambda;
        let ratio = a.mass / (a.mass + b.mass);
        a.position += delta * ((1.0 - self.hinge) * (1.0 - ratio));
        b.position += delta * (self.hinge * ratio);
    }
}
