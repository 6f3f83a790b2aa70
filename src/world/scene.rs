//! Clock-face geometry and the time-to-ball-count policy.
//!
//! The layout is plain data. [`SceneLayout::clock_face`] is the built-in
//! face; hosts can load a replacement from JSON.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ClockError;
use crate::math::vec2::Vec2;
use crate::objects::Body;
use crate::shapes::{Line, Seesaw, Sphere};

/// A static capsule. Equal endpoints make a round peg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub from: Vec2,
    pub to: Vec2,
    pub radius: f64,
}

impl SegmentSpec {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Self {
        Self { from: Vec2::new(x1, y1), to: Vec2::new(x2, y2), radius }
    }

    pub fn build(&self) -> Body {
        Line::new(self.from, self.to, self.radius).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeesawSpec {
    pub from: Vec2,
    pub to: Vec2,
    pub radius: f64,
    /// Pivot position along the rod, `0` at `from` and `1` at `to`.
    pub hinge: f64,
    pub mass1: f64,
    pub mass2: f64,
}

impl SeesawSpec {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, radius: f64, hinge: f64, mass1: f64, mass2: f64) -> Self {
        Self { from: Vec2::new(x1, y1), to: Vec2::new(x2, y2), radius, hinge, mass1, mass2 }
    }

    pub fn build(&self) -> Body {
        Seesaw::new(self.from, self.to, self.radius, self.hinge, self.mass1, self.mass2).into()
    }
}

/// Evenly spaced ball positions: ball `i` sits at `start + step * i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallRow {
    pub start: Vec2,
    pub step: Vec2,
    /// Maximum balls on this row; `None` takes whatever is left.
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl BallRow {
    pub const fn new(start: Vec2, step: Vec2, capacity: Option<usize>) -> Self {
        Self { start, step, capacity }
    }

    pub fn position(&self, index: usize) -> Vec2 {
        self.start + self.step * index as f64
    }
}

/// Belt-and-bucket seconds indicator. `(x, y)` is the top-left of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevatorSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rotated row of right-aligned numbers: `first, first + step, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelRow {
    pub anchor: Vec2,
    pub first: u32,
    pub step: u32,
    pub count: u32,
    /// Extra x offset applied to every label after the first.
    pub nudge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    pub statics: Vec<SegmentSpec>,
    /// Minute-units, minute-tens and hour seesaws, in that order.
    pub seesaws: Vec<SeesawSpec>,
    /// Where each seesaw's balls start, parallel to `seesaws`.
    pub seesaw_rows: Vec<BallRow>,
    /// Rows for the balls not on a seesaw, filled in order.
    pub resting_rows: Vec<BallRow>,
    pub ball_radius: f64,
    pub ball_mass: f64,
    pub elevator: ElevatorSpec,
    pub labels: Vec<LabelRow>,
    pub label_spacing: f64,
    pub label_angle_degrees: f64,
}

impl SceneLayout {
    pub const SEESAW_COUNT: usize = 3;

    /// The built-in clock face on its 400x400 canvas.
    pub fn clock_face() -> Self {
        let statics = vec![
            SegmentSpec::new(90.0, 407.0, 400.0, 397.0, 7.0),
            SegmentSpec::new(67.0, 397.0, 80.0, 405.0, 3.0),
            SegmentSpec::new(-7.0, 383.0, 10.0, 405.0, 7.0),
            SegmentSpec::new(50.0, 377.0, 367.0, 365.0, 3.0),
            SegmentSpec::new(90.0, 363.0, 367.0, 365.0, 3.0),
            SegmentSpec::new(90.0, 363.0, 23.0, 250.0, 3.0),
            SegmentSpec::new(410.0, 360.0, 395.0, 395.0, 10.0),
            SegmentSpec::new(100.0, 104.5, 250.0, 123.0, 3.0),
            SegmentSpec::new(390.0, 145.0, 400.0, 145.0, 3.0),
            SegmentSpec::new(170.0, 175.0, 290.0, 167.0, 3.0),
            SegmentSpec::new(110.0, 197.0, 190.0, 207.0, 3.0),
            SegmentSpec::new(390.0, 237.0, 400.0, 237.0, 3.0),
            SegmentSpec::new(160.0, 260.0, 200.0, 256.0, 3.0),
            SegmentSpec::new(250.0, 246.0, 250.0, 246.0, 3.0),
            SegmentSpec::new(110.0, 336.0, 160.0, 335.0, 3.0),
            SegmentSpec::new(260.0, 324.0, 260.0, 324.0, 3.0),
            SegmentSpec::new(110.0, 280.0, 150.0, 285.5, 3.0),
            SegmentSpec::new(390.0, 320.0, 400.0, 320.0, 3.0),
            // Frame.
            SegmentSpec::new(0.0, -10.0, 400.0, -10.0, 10.0),
            SegmentSpec::new(0.0, 410.0, 400.0, 410.0, 10.0),
            SegmentSpec::new(-12.0, 0.0, -12.0, 410.0, 10.0),
            SegmentSpec::new(410.0, 0.0, 410.0, 400.0, 10.0),
        ];
        let seesaws = vec![
            SeesawSpec::new(260.0, 124.0, 390.0, 139.0, 3.0, 0.8, 1.0, 4.2),
            SeesawSpec::new(200.0, 212.0, 390.0, 230.0, 3.0, 0.8, 1.0, 4.5),
            SeesawSpec::new(163.0, 291.0, 390.0, 313.0, 3.0, 0.8, 1.0, 4.6),
        ];
        let climb = Vec2::new(-20.0, -2.0);
        let seesaw_rows = vec![
            BallRow::new(Vec2::new(365.0, 122.0), climb, None),
            BallRow::new(Vec2::new(390.0, 216.0), climb, None),
            BallRow::new(Vec2::new(390.0, 300.0), climb, None),
        ];
        let resting_rows = vec![
            BallRow::new(Vec2::new(80.0, 390.0), Vec2::new(21.0, -1.0), Some(14)),
            BallRow::new(Vec2::new(373.0, 350.0), Vec2::new(-21.0, 0.0), None),
        ];
        let labels = vec![
            LabelRow { anchor: Vec2::new(385.0, 150.0), first: 1, step: 1, count: 6, nudge: 3.0 },
            LabelRow { anchor: Vec2::new(385.0, 242.0), first: 6, step: 6, count: 10, nudge: 7.0 },
            LabelRow { anchor: Vec2::new(385.0, 325.0), first: 1, step: 1, count: 12, nudge: 5.0 },
        ];

        Self {
            statics,
            seesaws,
            seesaw_rows,
            resting_rows,
            ball_radius: 10.0,
            ball_mass: 0.1,
            elevator: ElevatorSpec { x: 20.0, y: 50.0, width: 60.0, height: 330.0 },
            labels,
            label_spacing: 20.0,
            label_angle_degrees: 6.5,
        }
    }

    /// Rejects layouts that would trip a geometric assertion while building bodies.
    pub fn validate(&self) -> Result<(), ClockError> {
        let invalid = |message: String| Err(ClockError::InvalidLayout(message));

        if self.seesaws.len() != Self::SEESAW_COUNT || self.seesaw_rows.len() != Self::SEESAW_COUNT {
            return invalid(format!(
                "expected {} seesaws and seesaw rows, got {} and {}",
                Self::SEESAW_COUNT,
                self.seesaws.len(),
                self.seesaw_rows.len()
            ));
        }
        if self.resting_rows.is_empty() {
            return invalid("at least one resting row is required".into());
        }
        if self.resting_rows.last().and_then(|row| row.capacity).is_some() {
            return invalid("the last resting row must be unbounded".into());
        }
        if !(self.ball_radius > 0.0) || !(self.ball_mass > 0.0) {
            return invalid(format!("ball radius and mass must be positive, got {} and {}", self.ball_radius, self.ball_mass));
        }
        for (index, segment) in self.statics.iter().enumerate() {
            if !(segment.radius >= 0.0) {
                return invalid(format!("static segment {index} has negative radius {}", segment.radius));
            }
        }
        for (index, seesaw) in self.seesaws.iter().enumerate() {
            if seesaw.from.distance(seesaw.to) <= 0.0 {
                return invalid(format!("seesaw {index} has zero length"));
            }
            if !(0.0..=1.0).contains(&seesaw.hinge) {
                return invalid(format!("seesaw {index} hinge {} is outside [0, 1]", seesaw.hinge));
            }
            if !(seesaw.mass1 > 0.0) || !(seesaw.mass2 > 0.0) || !(seesaw.radius >= 0.0) {
                return invalid(format!("seesaw {index} needs positive masses and a non-negative radius"));
            }
        }
        let elevator = &self.elevator;
        if !(elevator.width > 0.0) || !(elevator.height > elevator.width) {
            return invalid(format!(
                "elevator must be taller than it is wide, got {}x{}",
                elevator.width, elevator.height
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ClockError> {
        let layout: SceneLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn ball(&self, position: Vec2) -> Body {
        Sphere::new(position, self.ball_radius, self.ball_mass).into()
    }

    /// Ball positions for `counts`: the seesaw rows first, then the resting rows.
    pub fn ball_positions(&self, counts: &BallCounts) -> Vec<Vec2> {
        let mut positions = Vec::new();
        for (row, &count) in self.seesaw_rows.iter().zip(counts.seesaws.iter()) {
            positions.extend((0..count as usize).map(|i| row.position(i)));
        }

        let mut remaining = counts.resting as usize;
        for row in &self.resting_rows {
            let take = row.capacity.map_or(remaining, |capacity| capacity.min(remaining));
            positions.extend((0..take).map(|i| row.position(i)));
            remaining -= take;
        }
        positions
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::clock_face()
    }
}

/// How many balls sit on each seesaw, and how many rest below, for a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallCounts {
    /// Minute units (`minute % 6`), minute tens (`minute / 6`), hours (`hour % 12`).
    pub seesaws: [u32; 3],
    pub resting: u32,
}

impl BallCounts {
    pub fn from_time(date: NaiveDateTime) -> Self {
        let minute = date.minute();
        let seesaws = [minute % 6, minute / 6, date.hour() % 12];
        let resting = (5 - seesaws[0]) + (9 - seesaws[1]) + (11 - seesaws[2]) + 2;
        Self { seesaws, resting }
    }

    pub fn total(&self) -> u32 {
        self.seesaws.iter().sum::<u32>() + self.resting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_counts_for_three_seventeen() {
        let counts = BallCounts::from_time(at(3, 17));
        assert_eq!(counts.seesaws, [5, 2, 3]);
        assert_eq!(counts.resting, 17);
    }

    #[test]
    fn test_ball_total_is_constant() {
        for (h, m) in [(0, 0), (3, 17), (11, 59), (12, 0), (23, 35)] {
            assert_eq!(BallCounts::from_time(at(h, m)).total(), 27, "at {h}:{m}");
        }
    }

    #[test]
    fn test_resting_overflow_splits_fourteen_and_rest() {
        let layout = SceneLayout::clock_face();
        let counts = BallCounts::from_time(at(3, 17));
        let positions = layout.ball_positions(&counts);
        assert_eq!(positions.len(), 27);

        let resting = &positions[10..];
        assert_eq!(resting.len(), 17);
        assert_eq!(resting[0], Vec2::new(80.0, 390.0));
        assert_eq!(resting[13], Vec2::new(80.0 + 13.0 * 21.0, 390.0 - 13.0));
        assert_eq!(resting[14], Vec2::new(373.0, 350.0));
        assert_eq!(resting[16], Vec2::new(373.0 - 42.0, 350.0));
    }

    #[test]
    fn test_seesaw_rows_climb_leftward() {
        let layout = SceneLayout::clock_face();
        let counts = BallCounts { seesaws: [2, 0, 1], resting: 0 };
        assert_eq!(
            layout.ball_positions(&counts),
            vec![Vec2::new(365.0, 122.0), Vec2::new(345.0, 120.0), Vec2::new(390.0, 300.0)]
        );
    }

    #[test]
    fn test_clock_face_is_valid() {
        let layout = SceneLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.statics.len(), 22);
    }

    #[test]
    fn test_layout_rejects_bad_hinge() {
        let mut layout = SceneLayout::clock_face();
        layout.seesaws[1].hinge = 1.5;
        assert!(matches!(layout.validate(), Err(ClockError::InvalidLayout(_))));
    }

    #[test]
    fn test_layout_json_round_trip() {
        let layout = SceneLayout::clock_face();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(SceneLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_layout_json_defaults_missing_fields() {
        let layout = SceneLayout::from_json(r#"{ "ball_radius": 8.0 }"#).unwrap();
        assert_eq!(layout.ball_radius, 8.0);
        assert_eq!(layout.seesaws.len(), 3);
    }
}
