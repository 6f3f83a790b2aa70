use super::vec2::Vec2;

/// 2D affine transform in canvas layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn translation(offset: Vec2) -> Self {
        Self { e: offset.x, f: offset.y, ..Self::IDENTITY }
    }

    pub fn rotation(angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self { a: cos_a, b: sin_a, c: -sin_a, d: cos_a, e: 0.0, f: 0.0 }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Returns `self * other`: `other` is applied to a point first.
    /// This is how canvas `translate`/`rotate`/`scale` compose onto the current matrix.
    pub fn then(self, other: Transform) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Applies the transform to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }

    /// Uniform length scale (square root of the determinant), used for line widths and radii.
    pub fn length_scale(self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    fn assert_close(p: Vec2, x: f64, y: f64) {
        assert!((p.x - x).abs() < EPSILON && (p.y - y).abs() < EPSILON, "got {:?}, expected ({}, {})", p, x, y);
    }

    #[test]
    fn test_identity_leaves_points() {
        assert_close(Transform::IDENTITY.apply(Vec2::new(5.0, -3.0)), 5.0, -3.0);
    }

    #[test]
    fn test_translate_then_scale_matches_canvas_order() {
        // ctx.translate(10, 20); ctx.scale(2, 2); point (1, 1) lands at (12, 22).
        let t = Transform::IDENTITY
            .then(Transform::translation(Vec2::new(10.0, 20.0)))
            .then(Transform::scaling(2.0, 2.0));
        assert_close(t.apply(Vec2::new(1.0, 1.0)), 12.0, 22.0);
        assert!((t.length_scale() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let t = Transform::rotation(PI / 2.0);
        assert_close(t.apply(Vec2::new(1.0, 0.0)), 0.0, 1.0);
        assert!((t.length_scale() - 1.0).abs() < EPSILON);
    }
}
