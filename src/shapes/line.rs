use crate::math::vec2::Vec2;
use super::sphere::Sphere;

/// Squared lengths below this are treated as a single point.
pub const DEGENERATE_LENGTH_SQUARED: f64 = 1e-12;

/// A capsule between two endpoint spheres. Static scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub s1: Sphere,
    pub s2: Sphere,
    pub radius: f64,
}

impl Line {
    /// Endpoints carry unit mass and the line's radius.
    pub fn new(a: Vec2, b: Vec2, radius: f64) -> Self {
        Self {
            s1: Sphere::new(a, radius, 1.0),
            s2: Sphere::new(b, radius, 1.0),
            radius,
        }
    }

    pub fn capsule(&self) -> Capsule<'_> {
        Capsule { s1: &self.s1, s2: &self.s2, radius: self.radius }
    }

    /// Sets both endpoints directly, discarding any history.
    pub fn set_endpoints(&mut self, a: Vec2, b: Vec2) {
        self.s1.place(a);
        self.s2.place(b);
    }
}

/// Borrowed segment view shared by lines and seesaws for collision queries.
#[derive(Debug, Clone, Copy)]
pub struct Capsule<'a> {
    pub s1: &'a Sphere,
    pub s2: &'a Sphere,
    pub radius: f64,
}

impl<'a> Capsule<'a> {
    /// Returns the direction vector of the segment (from s1 to s2).
    pub fn direction(&self) -> Vec2 {
        self.s2.position - self.s1.position
    }

    pub fn length_squared(&self) -> f64 {
        self.direction().magnitude_squared()
    }

    /// Zero-length segments behave as a single sphere (a peg).
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < DEGENERATE_LENGTH_SQUARED
    }

    /// Unclamped parameter of `point` projected onto the infinite line.
    ///
    /// Panics on a zero-length segment; callers check `is_degenerate` first.
    pub fn project(&self, point: Vec2) -> f64 {
        let length_sq = self.length_squared();
        assert!(
            length_sq >= DEGENERATE_LENGTH_SQUARED,
            "Cannot project onto a zero-length segment"
        );
        (point - self.s1.position).dot(self.direction()) / length_sq
    }

    /// Projection parameter clamped to the segment, 0 for a degenerate segment.
    pub fn clamped_param(&self, point: Vec2) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.project(point).clamp(0.0, 1.0)
        }
    }

    /// Endpoint mass interpolated at the projection of `point`.
    pub fn mass_at(&self, point: Vec2) -> f64 {
        let t = self.clamped_param(point);
        (1.0 - t) * self.s1.mass + t * self.s2.mass
    }
}
