use crate::math::{Transform, Vec2};
use super::{Color, DrawState, LineCap, Path, Surface, TextAlign};

/// A resolved drawing operation, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillCircle { center: Vec2, radius: f64, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    StrokePath { points: Vec<Vec2>, width: f64, cap: LineCap, color: Color },
    Text { text: String, position: Vec2, angle: f64, align: TextAlign, color: Color },
}

/// Headless [`Surface`] that records every fill, stroke and text call.
///
/// Used by tests and benchmarks to observe what a frame would draw.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Path,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            saved: Vec::new(),
            path: Path::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands so the surface can be reused for the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.path.clear();
        self.saved.clear();
        self.state = DrawState::default();
    }

    /// Number of outstanding `save` calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn transform(&self) -> Transform {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.state.transform = transform;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        // Unbalanced restores are ignored, as on a canvas.
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Vec2) {
        self.path.move_to(self.state.transform, point);
    }

    fn line_to(&mut self, point: Vec2) {
        self.path.line_to(self.state.transform, point);
    }

    fn circle(&mut self, center: Vec2, radius: f64) {
        self.path.circle(self.state.transform, center, radius);
    }

    fn rect(&mut self, origin: Vec2, width: f64, height: f64) {
        self.path.rect(self.state.transform, origin, width, height);
    }

    fn fill(&mut self) {
        let color = self.state.fill;
        for &(center, radius) in &self.path.circles {
            self.commands.push(DrawCommand::FillCircle { center, radius, color });
        }
        for polygon in &self.path.polygons {
            self.commands.push(DrawCommand::FillPolygon { points: polygon.clone(), color });
        }
    }

    fn stroke(&mut self) {
        let width = self.state.line_width * self.state.transform.length_scale();
        let cap = self.state.line_cap;
        let color = self.state.stroke;
        for polyline in self.path.polylines.iter().filter(|polyline| polyline.len() > 1) {
            self.commands.push(DrawCommand::StrokePath { points: polyline.clone(), width, cap, color });
        }
        for polygon in &self.path.polygons {
            let mut points = polygon.clone();
            points.extend(polygon.first().copied());
            self.commands.push(DrawCommand::StrokePath { points, width, cap, color });
        }
    }

    fn fill_text(&mut self, text: &str, at: Vec2) {
        let transform = self.state.transform;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position: transform.apply(at),
            angle: transform.b.atan2(transform.a),
            align: self.state.text_align,
            color: self.state.fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_save_restore_round_trips_state() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.save();
        surface.translate(Vec2::new(10.0, 0.0));
        surface.set_fill_color(Color::WHITE);
        surface.restore();
        assert_eq!(surface.transform(), Transform::IDENTITY);
        assert_eq!(surface.save_depth(), 0);

        surface.begin_path();
        surface.circle(Vec2::ZERO, 1.0);
        surface.fill();
        assert_eq!(
            surface.commands(),
            &[DrawCommand::FillCircle { center: Vec2::ZERO, radius: 1.0, color: Color::BLACK }]
        );
    }

    #[test]
    fn test_stroke_width_follows_scale() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.scale(2.0, 2.0);
        surface.set_line_width(3.0);
        surface.begin_path();
        surface.move_to(Vec2::new(1.0, 1.0));
        surface.line_to(Vec2::new(2.0, 1.0));
        surface.stroke();
        match &surface.commands()[0] {
            DrawCommand::StrokePath { points, width, .. } => {
                assert_eq!(points, &vec![Vec2::new(2.0, 2.0), Vec2::new(4.0, 2.0)]);
                assert!((width - 6.0).abs() < EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rect_stroke_is_closed() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.begin_path();
        surface.rect(Vec2::ZERO, 4.0, 2.0);
        surface.stroke();
        match &surface.commands()[0] {
            DrawCommand::StrokePath { points, .. } => {
                assert_eq!(points.len(), 5);
                assert_eq!(points.first(), points.last());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_text_records_rotation_and_align() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.translate(Vec2::new(50.0, 50.0));
        surface.rotate(0.25);
        surface.set_text_align(TextAlign::Right);
        surface.fill_text("12", Vec2::ZERO);
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["12"]);
        match &surface.commands()[0] {
            DrawCommand::Text { position, angle, align, .. } => {
                assert!((position.x - 50.0).abs() < EPSILON);
                assert!((angle - 0.25).abs() < EPSILON);
                assert_eq!(*align, TextAlign::Right);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_begin_path_discards_previous_geometry() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.circle(Vec2::ZERO, 1.0);
        surface.begin_path();
        surface.fill();
        assert!(surface.commands().is_empty());
    }
}
