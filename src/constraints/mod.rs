use crate::shapes::Sphere;

pub mod distance_constraint;
pub mod pin_joint;

pub use distance_constraint::DistanceConstraint;
pub use pin_joint::PinJoint;

/// A position-level constraint between the two endpoint spheres of a compound body.
pub trait Constraint {
    /// Moves the endpoints toward satisfying the constraint (PBD style).
    fn solve_position(&self, a: &mut Sphere, b: &mut Sphere);
}
