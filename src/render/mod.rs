//! Drawing capability consumed by the clock.
//!
//! The engine never owns a canvas. Hosts implement [`Surface`] (the ggez
//! window in `clock_demo`, or [`RecordingSurface`] for headless use) and pass
//! it to `Simulation::draw`. The API mirrors a 2D canvas: a current affine
//! transform with save/restore, style state, and an implicit path that is
//! filled or stroked.

pub mod path;
pub mod recording;

pub use path::{DrawState, Path};
pub use recording::{DrawCommand, RecordingSurface};

use crate::math::{Transform, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A 2D drawing target.
pub trait Surface {
    /// Viewport size in device pixels.
    fn viewport(&self) -> (f64, f64);

    fn transform(&self) -> Transform;
    fn set_transform(&mut self, transform: Transform);

    fn translate(&mut self, offset: Vec2) {
        let transform = self.transform().then(Transform::translation(offset));
        self.set_transform(transform);
    }

    fn rotate(&mut self, angle: f64) {
        let transform = self.transform().then(Transform::rotation(angle));
        self.set_transform(transform);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let transform = self.transform().then(Transform::scaling(sx, sy));
        self.set_transform(transform);
    }

    /// Pushes transform and style state.
    fn save(&mut self);
    /// Pops the state pushed by the matching `save`.
    fn restore(&mut self);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_text_align(&mut self, align: TextAlign);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Vec2);
    fn line_to(&mut self, point: Vec2);
    fn circle(&mut self, center: Vec2, radius: f64);
    fn rect(&mut self, origin: Vec2, width: f64, height: f64);

    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_text(&mut self, text: &str, at: Vec2);
}
