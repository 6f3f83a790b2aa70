use crate::shapes::Sphere;
use super::Constraint;

/// Keeps two endpoint spheres at a fixed distance, correcting both symmetrically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    /// The target distance to maintain between the endpoints.
    pub distance: f64,
}

impl DistanceConstraint {
    pub fn new(distance: f64) -> Self {
        assert!(distance > 0.0, "Rod length must be positive");
        Self { distance }
    }
}

impl Constraint for DistanceConstraint {
    /// Each endpoint moves half the length error along the segment.
    fn solve_position(&self, a: &mut Sphere, b: &mut Sphere) {
        let delta = b.position - a.position;
        let current = delta.magnitude();
        if current < 1e-12 {
            return;
        }
        let half_error = (current - self.distance) / current * 0.5;
        a.position += delta * half_error;
        b.position -= delta * half_error;
    }
}
