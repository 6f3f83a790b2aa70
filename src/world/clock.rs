use chrono::NaiveDateTime;
use tracing::{info, trace, warn};

use crate::collision::CollisionInfo;
use crate::common::time::{seconds_of, TimeBase, TimeSource};
use crate::common::SimulationConfig;
use crate::error::ClockError;
use crate::math::vec2::Vec2;
use crate::objects::Body;
use crate::render::{Color, LineCap, Surface, TextAlign};
use crate::math::Transform;
use super::elevator::Elevator;
use super::scene::{BallCounts, SceneLayout, SegmentSpec, SeesawSpec};

/// Side length of the square clock face, in scene units.
pub const FACE_SIZE: f64 = 400.0;
/// Viewport extent that maps onto the face plus its frame.
const VIEW_EXTENT: f64 = 415.0;
const FRAME_COLOR: Color = Color::rgb(0xcc, 0xcc, 0xcc);
/// Period of the spoke animation clock, in seconds.
const SPOKE_PERIOD: f64 = 10_000.0;

/// The seesaw clock: scene bodies, the relaxation loop and the time mapping.
///
/// Owns every body. `update` advances one frame, `draw` only reads.
pub struct Simulation<T: TimeSource> {
    config: SimulationConfig,
    layout: SceneLayout,
    time: T,
    time_base: TimeBase,
    last_update: NaiveDateTime,
    static_bodies: Vec<Body>,
    dynamic_bodies: Vec<Body>,
    elevator: Elevator,
}

impl<T: TimeSource> Simulation<T> {
    /// Validates the inputs and builds the scene for the current time.
    pub fn new(config: SimulationConfig, layout: SceneLayout, time: T) -> Result<Self, ClockError> {
        config.validate()?;
        layout.validate()?;

        let now = time.now();
        let time_base = TimeBase::new(now, config.speed);
        let (static_bodies, dynamic_bodies, elevator) = build_scene(&layout, time_base.cur_date(now));

        let simulation = Self {
            config,
            layout,
            time,
            time_base,
            last_update: now,
            static_bodies,
            dynamic_bodies,
            elevator,
        };
        simulation.log_reset();
        Ok(simulation)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn static_bodies(&self) -> &[Body] {
        &self.static_bodies
    }

    pub fn dynamic_bodies(&self) -> &[Body] {
        &self.dynamic_bodies
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    /// Appends immovable geometry and returns its index.
    pub fn add_static_body(&mut self, body: Body) -> usize {
        self.static_bodies.push(body);
        self.static_bodies.len() - 1
    }

    /// Appends a simulated body and returns its index.
    pub fn add_dynamic_body(&mut self, body: Body) -> usize {
        self.dynamic_bodies.push(body);
        self.dynamic_bodies.len() - 1
    }

    /// Simulated wall time.
    pub fn cur_date(&self) -> NaiveDateTime {
        self.time_base.cur_date(self.time.now())
    }

    /// Seconds within the current simulated minute.
    pub fn seconds(&self) -> f64 {
        seconds_of(self.cur_date())
    }

    /// Jumps simulated time. The balls follow on the next reset.
    pub fn set_time(&mut self, date: NaiveDateTime) {
        self.time_base.set_time(date, self.time.now());
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.time_base.set_speed(speed, self.time.now());
        self.config.speed = speed;
    }

    /// Rebuilds every body from the layout and the current simulated time.
    pub fn reset(&mut self) {
        let (static_bodies, dynamic_bodies, elevator) = build_scene(&self.layout, self.cur_date());
        self.static_bodies = static_bodies;
        self.dynamic_bodies = dynamic_bodies;
        self.elevator = elevator;
        self.log_reset();
    }

    fn log_reset(&self) {
        let counts = BallCounts::from_time(self.cur_date());
        info!(
            minute_units = counts.seesaws[0],
            minute_tens = counts.seesaws[1],
            hours = counts.seesaws[2],
            resting = counts.resting,
            dynamic = self.dynamic_bodies.len(),
            "scene rebuilt"
        );
    }

    /// Advances one frame: stale check, elevator, integration, then relaxation.
    pub fn update(&mut self) {
        let now = self.time.now();
        let gap_ms = (now - self.last_update).num_milliseconds();
        if gap_ms > self.config.stale_after_ms as i64 {
            warn!(gap_ms, "stale frame gap, rebuilding scene");
            self.reset();
        }
        self.last_update = now;

        let ratio = self.seconds() / 60.0;
        self.elevator.set_ratio(ratio, &mut self.static_bodies);

        for body in &mut self.dynamic_bodies {
            body.integrate(self.config.gravity);
        }

        let mut info = CollisionInfo::new();
        let mut contacts = 0usize;
        for _ in 0..self.config.iterations {
            for body in &mut self.dynamic_bodies {
                for fixed in &self.static_bodies {
                    info.reset();
                    let sign = body.detect_collision(fixed, &mut info);
                    if sign != 0 {
                        body.apply_impulse(&info, sign as f64, false);
                        contacts += 1;
                    }
                }
            }

            for i in 0..self.dynamic_bodies.len() {
                let (head, tail) = self.dynamic_bodies.split_at_mut(i + 1);
                let body_a = &mut head[i];
                for body_b in tail {
                    info.reset();
                    if resolve_pair(body_a, body_b, &mut info) {
                        contacts += 1;
                    }
                }
            }
        }
        trace!(contacts, ratio, "frame relaxed");
    }

    /// Draws the face scaled to fit the surface's viewport.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = surface.viewport();
        let scale = width.min(height) / VIEW_EXTENT;
        let half = FACE_SIZE * 0.5;

        surface.save();
        surface.set_transform(Transform::IDENTITY);
        surface.translate(Vec2::new(width * 0.5 - half * scale, height * 0.5 - half * scale));
        surface.scale(scale, scale);

        surface.set_fill_color(Color::WHITE);
        surface.begin_path();
        surface.rect(Vec2::ZERO, FACE_SIZE, FACE_SIZE);
        surface.fill();

        surface.set_stroke_color(FRAME_COLOR);
        surface.set_line_cap(LineCap::Square);
        surface.set_line_width(20.0);
        surface.begin_path();
        surface.move_to(Vec2::new(-12.0, -10.0));
        surface.line_to(Vec2::new(410.0, -10.0));
        surface.line_to(Vec2::new(410.0, 410.0));
        surface.line_to(Vec2::new(-12.0, 410.0));
        surface.line_to(Vec2::new(-12.0, -10.0));
        surface.stroke();

        self.elevator.draw_background(surface);
        for body in self.dynamic_bodies.iter().chain(&self.static_bodies) {
            body.render(surface);
        }

        let spoke_seconds = self.cur_date().and_utc().timestamp_millis() as f64 * 1e-3 % SPOKE_PERIOD;
        self.elevator.draw_foreground(surface, spoke_seconds);

        self.draw_labels(surface);
        surface.restore();
    }

    fn draw_labels<S: Surface + ?Sized>(&self, surface: &mut S) {
        let layout = &self.layout;
        surface.set_text_align(TextAlign::Right);
        surface.set_fill_color(Color::BLACK);
        for row in &layout.labels {
            surface.save();
            surface.translate(row.anchor);
            surface.rotate(layout.label_angle_degrees.to_radians());
            for i in 0..row.count {
                let nudge = if i == 0 { 0.0 } else { row.nudge };
                let x = -(i as f64) * layout.label_spacing + nudge;
                let value = row.first + i * row.step;
                surface.fill_text(&value.to_string(), Vec2::new(x, 0.0));
            }
            surface.restore();
        }
    }
}

/// Separates two dynamic bodies, splitting the push by mass at the contact.
///
/// Returns whether they were in contact.
pub fn resolve_pair(body_a: &mut Body, body_b: &mut Body, info: &mut CollisionInfo) -> bool {
    let sign = body_a.detect_collision(body_b, info);
    if sign == 0 {
        return false;
    }
    let mass_a = body_a.compute_mass(info);
    let mass_b = body_b.compute_mass(info);
    let ratio = mass_a / (mass_a + mass_b);
    let sign = sign as f64;
    body_a.apply_impulse(info, sign * (1.0 - ratio), false);
    body_b.apply_impulse(info, -sign * ratio, false);
    true
}

fn build_scene(layout: &SceneLayout, date: NaiveDateTime) -> (Vec<Body>, Vec<Body>, Elevator) {
    let mut statics: Vec<Body> = layout.statics.iter().map(SegmentSpec::build).collect();

    let counts = BallCounts::from_time(date);
    let mut dynamics: Vec<Body> = layout.seesaws.iter().map(SeesawSpec::build).collect();
    dynamics.extend(layout.ball_positions(&counts).into_iter().map(|position| layout.ball(position)));

    let ratio = seconds_of(date) / 60.0;
    let elevator = Elevator::new(layout.elevator, ratio, &mut statics);
    if ratio > 0.5 {
        dynamics.push(elevator.rider(layout.ball_radius, layout.ball_mass).into());
    }
    (statics, dynamics, elevator)
}
