use ggez::event::{self, EventHandler};
use ggez::glam::Vec2 as GVec2;
use ggez::graphics::{self, Canvas, DrawMode, DrawParam, Mesh, PxScale, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameError, GameResult};
use seesaw_clock::math::Transform;
use seesaw_clock::render::{DrawState, LineCap, Path, TextAlign};
use seesaw_clock::{Color, Simulation, Surface, SystemClock, Vec2};
use tracing::info;

/// Canvas default font size, in scene units.
const FONT_SIZE: f64 = 10.0;
const CIRCLE_TOLERANCE: f32 = 0.1;

fn to_ggez(color: Color) -> graphics::Color {
    let [r, g, b] = color.to_unit();
    graphics::Color::new(r, g, b, 1.0)
}

fn point(p: Vec2) -> GVec2 {
    GVec2::new(p.x as f32, p.y as f32)
}

/// [`Surface`] over a ggez canvas. Paths are turned into meshes on fill and stroke.
///
/// Mesh errors cannot surface through the trait, so the first one is kept
/// and returned from [`GgezSurface::finish`].
struct GgezSurface<'a> {
    ctx: &'a mut Context,
    canvas: Canvas,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Path,
    error: Option<GameError>,
}

impl<'a> GgezSurface<'a> {
    fn new(ctx: &'a mut Context) -> Self {
        let canvas = Canvas::from_frame(ctx, graphics::Color::WHITE);
        Self { ctx, canvas, state: DrawState::default(), saved: Vec::new(), path: Path::default(), error: None }
    }

    fn finish(self) -> GameResult {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.canvas.finish(self.ctx)
    }

    fn record(&mut self, result: GameResult) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: graphics::Color) -> GameResult {
        let mesh = Mesh::new_circle(self.ctx, DrawMode::fill(), point(center), radius as f32, CIRCLE_TOLERANCE, color)?;
        self.canvas.draw(&mesh, DrawParam::new());
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f64, cap: LineCap, color: graphics::Color) -> GameResult {
        let distinct = points.windows(2).any(|pair| pair[0] != pair[1]);
        if distinct {
            let vertices: Vec<GVec2> = points.iter().copied().map(point).collect();
            let mesh = Mesh::new_line(self.ctx, &vertices, width as f32, color)?;
            self.canvas.draw(&mesh, DrawParam::new());
        }
        // ggez lines have butt ends; round caps are drawn as discs.
        if cap == LineCap::Round {
            if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
                self.fill_circle(first, width * 0.5, color)?;
                if last != first {
                    self.fill_circle(last, width * 0.5, color)?;
                }
            }
        }
        Ok(())
    }

    fn fill_path(&mut self) -> GameResult {
        let color = to_ggez(self.state.fill);
        let circles = self.path.circles.clone();
        for (center, radius) in circles {
            self.fill_circle(center, radius, color)?;
        }
        for polygon in self.path.polygons.clone() {
            let vertices: Vec<GVec2> = polygon.into_iter().map(point).collect();
            let mesh = Mesh::new_polygon(self.ctx, DrawMode::fill(), &vertices, color)?;
            self.canvas.draw(&mesh, DrawParam::new());
        }
        Ok(())
    }

    fn stroke_path(&mut self) -> GameResult {
        let width = self.state.line_width * self.state.transform.length_scale();
        let color = to_ggez(self.state.stroke);
        let cap = self.state.line_cap;
        for polyline in self.path.polylines.clone() {
            if polyline.len() > 1 {
                self.stroke_polyline(&polyline, width, cap, color)?;
            }
        }
        for mut polygon in self.path.polygons.clone() {
            polygon.extend(polygon.first().copied());
            self.stroke_polyline(&polygon, width, cap, color)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Vec2) -> GameResult {
        let transform = self.state.transform;
        let angle = transform.b.atan2(transform.a);
        let mut label = Text::new(text);
        label.set_scale(PxScale::from((FONT_SIZE * transform.length_scale()) as f32));
        let size = label.measure(self.ctx)?;

        // `at` is on the baseline; ggez places the top-left corner.
        let shift_x = match self.state.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -0.5 * size.x as f64,
            TextAlign::Right => -(size.x as f64),
        };
        let rotate = Transform::rotation(angle);
        let origin = transform.apply(at) + rotate.apply(Vec2::new(shift_x, -(size.y as f64)));
        self.canvas.draw(
            &label,
            DrawParam::new().dest(point(origin)).rotation(angle as f32).color(to_ggez(self.state.fill)),
        );
        Ok(())
    }
}

impl Surface for GgezSurface<'_> {
    fn viewport(&self) -> (f64, f64) {
        let (width, height) = self.ctx.gfx.drawable_size();
        (width as f64, height as f64)
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
        let result = self.fill_path();
        self.record(result);
    }

    fn stroke(&mut self) {
        let result = self.stroke_path();
        self.record(result);
    }

    fn fill_text(&mut self, text: &str, at: Vec2) {
        let result = self.draw_text(text, at);
        self.record(result);
    }
}

struct MainState {
    simulation: Simulation<SystemClock>,
}

impl EventHandler for MainState {
    fn update(&mut self, _ctx: &mut Context) -> GameResult {
        self.simulation.update();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut surface = GgezSurface::new(ctx);
        self.simulation.draw(&mut surface);
        surface.finish()
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        match input.keycode {
            Some(KeyCode::Escape) => ctx.request_quit(),
            Some(KeyCode::R) => self.simulation.reset(),
            Some(KeyCode::Up) => {
                let speed = self.simulation.config().speed * 2.0;
                self.simulation.set_speed(speed);
                info!(speed, "speed changed");
            }
            Some(KeyCode::Down) => {
                let speed = self.simulation.config().speed * 0.5;
                self.simulation.set_speed(speed);
                info!(speed, "speed changed");
            }
            _ => {}
        }
        Ok(())
    }
}

pub fn run(simulation: Simulation<SystemClock>) -> GameResult {
    let cb = ggez::ContextBuilder::new("clock_demo", "seesaw_clock")
        .window_setup(ggez::conf::WindowSetup::default().title("Seesaw Clock"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(830.0, 830.0).resizable(true));

    let (ctx, event_loop) = cb.build()?;
    event::run(ctx, event_loop, MainState { simulation })
}
