use crate::math::{Transform, Vec2};
use super::{Color, LineCap, TextAlign};

/// Style and transform state saved and restored as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub transform: Transform,
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub text_align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            text_align: TextAlign::Left,
        }
    }
}

/// The implicit canvas path, kept in device coordinates.
///
/// Points are transformed when they are added, matching canvas semantics
/// where later transform changes do not affect already-built geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub polylines: Vec<Vec<Vec2>>,
    /// Closed outlines (rectangles) that can be filled.
    pub polygons: Vec<Vec<Vec2>>,
    pub circles: Vec<(Vec2, f64)>,
}

impl Path {
    pub fn clear(&mut self) {
        self.polylines.clear();
        self.polygons.clear();
        self.circles.clear();
    }

    pub fn move_to(&mut self, transform: Transform, point: Vec2) {
        self.polylines.push(vec![transform.apply(point)]);
    }

    pub fn line_to(&mut self, transform: Transform, point: Vec2) {
        let point = transform.apply(point);
        match self.polylines.last_mut() {
            Some(polyline) => polyline.push(point),
            None => self.polylines.push(vec![point]),
        }
    }

    pub fn circle(&mut self, transform: Transform, center: Vec2, radius: f64) {
        self.circles.push((transform.apply(center), radius * transform.length_scale()));
    }

    pub fn rect(&mut self, transform: Transform, origin: Vec2, width: f64, height: f64) {
        let corners = [
            origin,
            origin + Vec2::new(width, 0.0),
            origin + Vec2::new(width, height),
            origin + Vec2::new(0.0, height),
        ];
        self.polygons.push(corners.iter().map(|&corner| transform.apply(corner)).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_are_transformed_on_insert() {
        let mut path = Path::default();
        let scaled = Transform::scaling(2.0, 2.0);
        path.move_to(scaled, Vec2::new(1.0, 1.0));
        path.line_to(Transform::IDENTITY, Vec2::new(5.0, 5.0));
        assert_eq!(path.polylines, vec![vec![Vec2::new(2.0, 2.0), Vec2::new(5.0, 5.0)]]);
    }

    #[test]
    fn test_line_to_without_move_starts_polyline() {
        let mut path = Path::default();
        path.line_to(Transform::IDENTITY, Vec2::new(3.0, 4.0));
        assert_eq!(path.polylines.len(), 1);
    }

    #[test]
    fn test_circle_radius_scales() {
        let mut path = Path::default();
        path.circle(Transform::scaling(3.0, 3.0), Vec2::new(1.0, 0.0), 2.0);
        assert_eq!(path.circles, vec![(Vec2::new(3.0, 0.0), 6.0)]);
        path.clear();
        assert_eq!(path, Path::default());
    }
}
