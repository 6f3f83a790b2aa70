use crate::math::vec2::Vec2;

/// Accumulates the single collision kept by a pairwise query.
///
/// Several probes may feed the same instance (line-vs-line runs four); only the
/// probe with the smallest depth survives. Reset it before each pairwise test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Contact point in world coordinates.
    pub point: Vec2,
    /// Unit contact normal.
    pub normal: Vec2,
    /// Penetration depth; `f64::INFINITY` while nothing has been recorded.
    pub depth: f64,
}

impl CollisionInfo {
    pub fn new() -> Self {
        Self {
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            depth: f64::INFINITY,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Records the probe if `depth` is strictly smaller than the current one.
    /// Returns whether the record changed.
    pub fn update(&mut self, depth: f64, normal: Vec2, point: Vec2) -> bool {
        if depth < self.depth {
            self.point = point;
            self.normal = normal;
            self.depth = depth;
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.depth == f64::INFINITY
    }
}

impl Default for CollisionInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let info = CollisionInfo::new();
        assert!(info.is_empty());
        assert_eq!(info.depth, f64::INFINITY);
    }

    #[test]
    fn test_keeps_minimum_depth() {
        let mut info = CollisionInfo::new();
        let probes = [
            (5.0, Vec2::new(1.0, 0.0), Vec2::new(10.0, 10.0)),
            (2.0, Vec2::new(0.0, 1.0), Vec2::new(20.0, 20.0)),
            (8.0, Vec2::new(-1.0, 0.0), Vec2::new(30.0, 30.0)),
            (1.0, Vec2::new(0.0, -1.0), Vec2::new(40.0, 40.0)),
        ];
        let updated: Vec<bool> = probes
            .iter()
            .map(|&(depth, normal, point)| info.update(depth, normal, point))
            .collect();

        assert_eq!(updated, vec![true, true, false, true]);
        assert_eq!(info.depth, 1.0);
        assert_eq!(info.normal, Vec2::new(0.0, -1.0));
        assert_eq!(info.point, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_equal_depth_does_not_overwrite() {
        let mut info = CollisionInfo::new();
        assert!(info.update(3.0, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)));
        assert!(!info.update(3.0, Vec2::new(0.0, 1.0), Vec2::new(2.0, 2.0)));
        assert_eq!(info.point, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_reset_clears_record() {
        let mut info = CollisionInfo::new();
        info.update(0.5, Vec2::new(1.0, 0.0), Vec2::new(3.0, 4.0));
        info.reset();
        assert_eq!(info, CollisionInfo::new());
    }
}
