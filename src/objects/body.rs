use crate::collision::{self, CollisionInfo};
use crate::integration::integrator;
use crate::render::{Color, LineCap, Surface};
use crate::shapes::{Capsule, Line, Seesaw, Sphere};

/// Fill and stroke colour shared by every body.
pub const BODY_COLOR: Color = Color::rgb(0xcc, 0xcc, 0xcc);

/// Every shape the clock scene is built from.
///
/// Lines only ever appear as static geometry; seesaws only as dynamic bodies.
/// Spheres play both roles (balls are dynamic, elevator pulleys are static).
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Sphere(Sphere),
    Line(Line),
    Seesaw(Seesaw),
}

impl Body {
    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Body::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    /// Segment view for lines and seesaws.
    pub fn capsule(&self) -> Option<Capsule<'_>> {
        match self {
            Body::Sphere(_) => None,
            Body::Line(line) => Some(line.capsule()),
            Body::Seesaw(seesaw) => Some(seesaw.capsule()),
        }
    }

    /// See [`collision::check_collision`] for the meaning of the returned sign.
    pub fn detect_collision(&self, other: &Body, info: &mut CollisionInfo) -> i32 {
        collision::check_collision(self, other, info)
    }

    /// Effective mass at the recorded contact point.
    pub fn compute_mass(&self, info: &CollisionInfo) -> f64 {
        match self {
            Body::Sphere(sphere) => sphere.mass,
            Body::Line(line) => line.capsule().mass_at(info.point),
            Body::Seesaw(seesaw) => seesaw.capsule().mass_at(info.point),
        }
    }

    /// Pushes the body out along `-normal * depth * scale`. Lines are immovable.
    pub fn apply_impulse(&mut self, info: &CollisionInfo, scale: f64, is_static: bool) {
        match self {
            Body::Sphere(sphere) => sphere.apply_impulse(info, scale, is_static),
            Body::Line(_) => {}
            Body::Seesaw(seesaw) => seesaw.apply_impulse(info, scale),
        }
    }

    /// One Verlet step. Lines never move on their own.
    pub fn integrate(&mut self, gravity: f64) {
        match self {
            Body::Sphere(sphere) => integrator::integrate(sphere, gravity),
            Body::Line(_) => {}
            Body::Seesaw(seesaw) => seesaw.integrate(gravity),
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.begin_path();
        surface.set_fill_color(BODY_COLOR);
        surface.set_stroke_color(BODY_COLOR);
        match self {
            Body::Sphere(sphere) => {
                surface.circle(sphere.position, sphere.radius);
                surface.fill();
            }
            Body::Line(_) | Body::Seesaw(_) => {
                if let Some(capsule) = self.capsule() {
                    surface.set_line_cap(LineCap::Round);
                    surface.set_line_width(capsule.radius * 2.0);
                    surface.move_to(capsule.s1.position);
                    surface.line_to(capsule.s2.position);
                    surface.stroke();
                }
            }
        }
    }
}

impl From<Sphere> for Body {
    fn from(sphere: Sphere) -> Self {
        Body::Sphere(sphere)
    }
}

impl From<Line> for Body {
    fn from(line: Line) -> Self {
        Body::Line(line)
    }
}

impl From<Seesaw> for Body {
    fn from(seesaw: Seesaw) -> Self {
        Body::Seesaw(seesaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::render::{DrawCommand, RecordingSurface};
    const EPSILON: f64 = 1e-10;

    fn contact_at(point: Vec2) -> CollisionInfo {
        let mut info = CollisionInfo::new();
        info.update(1.0, Vec2::new(0.0, 1.0), point);
        info
    }

    #[test]
    fn test_compute_mass_per_variant() {
        let ball = Body::from(Sphere::new(Vec2::ZERO, 10.0, 0.1));
        assert_eq!(ball.compute_mass(&contact_at(Vec2::ZERO)), 0.1);

        let line = Body::from(Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 3.0));
        assert!((line.compute_mass(&contact_at(Vec2::new(5.0, 0.0))) - 1.0).abs() < EPSILON);

        let seesaw = Body::from(Seesaw::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 3.0, 0.8, 1.0, 4.0));
        assert!((seesaw.compute_mass(&contact_at(Vec2::new(5.0, 0.0))) - 2.5).abs() < EPSILON);
        // Clamped past the ends.
        assert!((seesaw.compute_mass(&contact_at(Vec2::new(20.0, 0.0))) - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_line_ignores_impulse_and_integration() {
        let original = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 3.0);
        let mut body = Body::from(original);
        body.apply_impulse(&contact_at(Vec2::ZERO), 1.0, false);
        body.integrate(1.0);
        assert_eq!(body, Body::Line(original));
    }

    #[test]
    fn test_sphere_integrates_with_gravity() {
        let mut body = Body::from(Sphere::new(Vec2::new(0.0, 0.0), 10.0, 0.1));
        body.integrate(1.0);
        body.integrate(1.0);
        let sphere = body.as_sphere().copied().unwrap();
        assert!((sphere.position.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_render_sphere_fills_circle() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        Body::from(Sphere::new(Vec2::new(5.0, 6.0), 10.0, 0.1)).render(&mut surface);
        assert!(surface.commands().contains(&DrawCommand::FillCircle {
            center: Vec2::new(5.0, 6.0),
            radius: 10.0,
            color: BODY_COLOR,
        }));
    }

    #[test]
    fn test_render_line_strokes_with_diameter() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        Body::from(Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 3.0)).render(&mut surface);
        let strokes: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::StrokePath { points, width, cap, .. } => Some((points.clone(), *width, *cap)),
                _ => None,
            })
            .collect();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].0, vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
        assert_eq!(strokes[0].1, 6.0);
        assert_eq!(strokes[0].2, LineCap::Round);
    }
}
