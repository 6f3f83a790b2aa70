use crate::collision::CollisionInfo;
use crate::math::vec2::Vec2;

/// A disc with Verlet position history. Velocity is `position - old_position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub position: Vec2,
    pub old_position: Vec2,
    pub radius: f64,
    pub mass: f64,
}

impl Sphere {
    /// Creates a sphere at rest at `position`.
    pub fn new(position: Vec2, radius: f64, mass: f64) -> Self {
        assert!(radius >= 0.0, "Sphere radius cannot be negative");
        assert!(mass > 0.0, "Sphere mass must be positive");
        Self {
            position,
            old_position: position,
            radius,
            mass,
        }
    }

    /// Implicit velocity per frame.
    pub fn velocity(&self) -> Vec2 {
        self.position - self.old_position
    }

    /// Moves the sphere and discards its velocity.
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.old_position = position;
    }

    /// Pushes the sphere along `-normal * depth * scale`.
    ///
    /// With `is_static`, the velocity component along the push direction is
    /// removed from the position history, so the correction cannot turn into a bounce.
    pub fn apply_impulse(&mut self, info: &CollisionInfo, scale: f64, is_static: bool) {
        self.position -= info.normal * (info.depth * scale);
        if is_static {
            let mut velocity = self.velocity();
            let along_push = (velocity.dot(info.normal) * scale).min(0.0);
            velocity -= info.normal * (scale * along_push);
            self.old_position = self.position - velocity;
        }
    }
}
