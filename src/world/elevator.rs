use std::f64::consts::PI;

use tracing::debug;

use crate::math::vec2::Vec2;
use crate::objects::Body;
use crate::render::{Color, LineCap, Surface};
use crate::shapes::{Line, Sphere};
use super::scene::ElevatorSpec;

const LINK_LENGTH: f64 = 10.0;
const LINK_RADIUS: f64 = 3.0;
const PULLEY_MASS: f64 = 1.0;
const SPOKES: usize = 10;
const RAIL_COLOR: Color = Color::rgb(0xee, 0xee, 0xee);

/// The three points of the V-shaped bucket.
///
/// `lip1` rides on the belt, `apex` is one link out and one link down, `lip2`
/// two links out. The first link runs `lip1 -> apex`, the second `lip2 -> apex`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketPose {
    pub lip1: Vec2,
    pub apex: Vec2,
    pub lip2: Vec2,
}

/// A bucket carried around two pulleys, positioned analytically from a ratio.
///
/// Its four bodies live in the simulation's static list; the elevator keeps
/// their indices and rewrites the link endpoints on every `set_ratio`.
#[derive(Debug, Clone, PartialEq)]
pub struct Elevator {
    spec: ElevatorSpec,
    links: [usize; 2],
    pulleys: [usize; 2],
    pose: BucketPose,
}

impl Elevator {
    /// Registers two links and two pulleys in `statics` and poses them at `ratio`.
    pub fn new(spec: ElevatorSpec, ratio: f64, statics: &mut Vec<Body>) -> Self {
        let half = spec.width * 0.5;
        let top = Vec2::new(spec.x + half, spec.y + half);
        let bottom = Vec2::new(spec.x + half, spec.y + spec.height - half);

        let mut register = |body: Body| {
            statics.push(body);
            statics.len() - 1
        };
        let links = [
            register(Line::new(Vec2::ZERO, Vec2::new(LINK_LENGTH, LINK_LENGTH), LINK_RADIUS).into()),
            register(Line::new(Vec2::new(LINK_LENGTH, LINK_LENGTH), Vec2::new(2.0 * LINK_LENGTH, 0.0), LINK_RADIUS).into()),
        ];
        let pulleys = [
            register(Sphere::new(top, half, PULLEY_MASS).into()),
            register(Sphere::new(bottom, half, PULLEY_MASS).into()),
        ];

        let mut elevator = Self { spec, links, pulleys, pose: BucketPose { lip1: Vec2::ZERO, apex: Vec2::ZERO, lip2: Vec2::ZERO } };
        elevator.set_ratio(ratio, statics);
        elevator
    }

    pub fn spec(&self) -> &ElevatorSpec {
        &self.spec
    }

    pub fn pose(&self) -> BucketPose {
        self.pose
    }

    /// Indices of the two links, then the two pulleys, in the static list.
    pub fn static_indices(&self) -> [usize; 4] {
        [self.links[0], self.links[1], self.pulleys[0], self.pulleys[1]]
    }

    fn top_pulley(&self) -> Vec2 {
        Vec2::new(self.spec.x + self.spec.width * 0.5, self.spec.y + self.spec.width * 0.5)
    }

    fn bottom_pulley(&self) -> Vec2 {
        self.top_pulley() + Vec2::new(0.0, self.spec.height - self.spec.width)
    }

    /// Share of the belt wrapped around the two pulleys.
    pub fn circle_fraction(&self) -> f64 {
        let wrap = self.spec.width * PI;
        wrap / (wrap + 2.0 * (self.spec.height - self.spec.width))
    }

    /// Bucket pose for a belt position in `[0, 1)`.
    pub fn pose_at(&self, ratio: f64) -> BucketPose {
        let circle = self.circle_fraction();
        let rope = 1.0 - circle;
        let quarter = 0.25 * circle;

        if ratio < quarter {
            self.wrapped(PI * 0.5 * (1.0 - ratio / quarter), self.top_pulley())
        } else if ratio >= rope + 3.0 * quarter {
            let angle = -PI * (1.0 + 0.5 * (ratio - rope - 3.0 * quarter) / quarter);
            self.wrapped(angle, self.top_pulley())
        } else if ratio >= 0.5 * rope + quarter && ratio <= 0.5 * rope + 3.0 * quarter {
            let angle = -PI * (ratio - 0.5 * rope - quarter) / (0.5 * circle);
            self.wrapped(angle, self.bottom_pulley())
        } else if ratio >= quarter && ratio <= quarter + 0.5 * rope {
            self.descending((ratio - quarter) / (0.5 * rope))
        } else {
            self.climbing((ratio - 0.5 * rope - 3.0 * quarter) / (0.5 * rope))
        }
    }

    fn wrapped(&self, angle: f64, center: Vec2) -> BucketPose {
        let inner = self.spec.width * 0.5;
        let outer = inner + LINK_LENGTH;
        let apex_radius = (outer * outer + LINK_LENGTH * LINK_LENGTH).sqrt();
        let apex_angle = LINK_LENGTH.atan2(outer);
        BucketPose {
            lip1: center.polar_offset(inner, angle),
            apex: center.polar_offset(apex_radius, angle + apex_angle),
            lip2: center.polar_offset(inner + 2.0 * LINK_LENGTH, angle),
        }
    }

    /// Right-hand run, `t` from the top pulley to the bottom one.
    fn descending(&self, t: f64) -> BucketPose {
        let spec = &self.spec;
        let y = spec.y + spec.width * 0.5 + (spec.height - spec.width) * t;
        let lip1 = Vec2::new(spec.x + spec.width, y);
        BucketPose {
            lip1,
            apex: lip1 + Vec2::new(LINK_LENGTH, -LINK_LENGTH),
            lip2: lip1 + Vec2::new(2.0 * LINK_LENGTH, 0.0),
        }
    }

    /// Left-hand run, `t` from the bottom pulley to the top one.
    fn climbing(&self, t: f64) -> BucketPose {
        let spec = &self.spec;
        let y = spec.y - spec.width * 0.5 + spec.height - (spec.height - spec.width) * t;
        let lip1 = Vec2::new(spec.x, y);
        BucketPose {
            lip1,
            apex: lip1 + Vec2::new(-LINK_LENGTH, LINK_LENGTH),
            lip2: lip1 + Vec2::new(-2.0 * LINK_LENGTH, 0.0),
        }
    }

    /// Moves the bucket to `ratio`, rewriting the link endpoints in `statics`.
    pub fn set_ratio(&mut self, ratio: f64, statics: &mut [Body]) {
        let pose = self.pose_at(ratio);
        if let Some(Body::Line(line)) = statics.get_mut(self.links[0]) {
            line.set_endpoints(pose.lip1, pose.apex);
        }
        if let Some(Body::Line(line)) = statics.get_mut(self.links[1]) {
            line.set_endpoints(pose.lip2, pose.apex);
        }
        self.pose = pose;
    }

    /// A ball sitting in the bucket, just above its lips.
    pub fn rider(&self, radius: f64, mass: f64) -> Sphere {
        let position = (self.pose.lip1 + self.pose.lip2) * 0.5 - Vec2::new(0.0, 8.0);
        debug!(x = position.x, y = position.y, "elevator rider spawned");
        Sphere::new(position, radius, mass)
    }

    /// Rails behind the belt.
    pub fn draw_background<S: Surface + ?Sized>(&self, surface: &mut S) {
        let spec = &self.spec;
        let top = spec.y + spec.width * 0.5;
        let bottom = spec.y + spec.height - spec.width * 0.5;

        surface.set_stroke_color(RAIL_COLOR);
        surface.set_line_cap(LineCap::Square);
        surface.set_line_width(2.0);
        surface.begin_path();
        surface.move_to(Vec2::new(spec.x + spec.width - 2.0, top));
        surface.line_to(Vec2::new(spec.x + spec.width - 2.0, bottom));
        surface.move_to(Vec2::new(spec.x + 2.0, top));
        surface.line_to(Vec2::new(spec.x + 2.0, bottom));
        surface.stroke();
    }

    /// Pulley spokes, turning with the belt at one circuit per minute.
    pub fn draw_foreground<S: Surface + ?Sized>(&self, surface: &mut S, seconds: f64) {
        let spec = &self.spec;
        let circumference = spec.width * PI + 2.0 * (spec.height - spec.width);
        let turn_per_second = 2.0 * PI * circumference / (spec.width * PI * 60.0);
        let rotation = seconds * turn_per_second;

        for center in [self.top_pulley(), self.bottom_pulley()] {
            surface.save();
            surface.translate(center);
            surface.rotate(rotation);
            for _ in 0..SPOKES {
                surface.set_stroke_color(Color::WHITE);
                surface.set_line_cap(LineCap::Round);
                surface.set_line_width(1.0);
                surface.begin_path();
                surface.move_to(Vec2::new(10.0, 0.0));
                surface.line_to(Vec2::new(spec.width * 0.5 - 5.0, 0.0));
                surface.stroke();
                surface.rotate(2.0 * PI / SPOKES as f64);
            }
            surface.restore();
        }
    }
}
