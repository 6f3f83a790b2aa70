//! Wall-clock sources and the mapping from wall time to simulated time.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use tracing::debug;

/// Supplies the current wall-clock instant.
pub trait TimeSource {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A settable clock. Clones share the same instant, so a test can keep one
/// handle and move time under a simulation that owns the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, instant: NaiveDateTime) {
        self.now.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Affine map from wall time to simulated time:
/// `cur = base_time + (wall - base_wall) * speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBase {
    base_time: NaiveDateTime,
    base_wall: NaiveDateTime,
    speed: f64,
}

impl TimeBase {
    /// Starts the simulated clock at the wall time `now`.
    pub fn new(now: NaiveDateTime, speed: f64) -> Self {
        Self { base_time: now, base_wall: now, speed }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn cur_date(&self, wall: NaiveDateTime) -> NaiveDateTime {
        let elapsed = (wall - self.base_wall).num_microseconds().unwrap_or_default();
        let scaled = Duration::microseconds((elapsed as f64 * self.speed) as i64);
        self.base_time.checked_add_signed(scaled).unwrap_or(self.base_time)
    }

    /// Jumps simulated time to `date` as of wall time `wall`.
    pub fn set_time(&mut self, date: NaiveDateTime, wall: NaiveDateTime) {
        self.base_time = date;
        self.base_wall = wall;
        debug!(%date, "time base moved");
    }

    /// Changes the rate without a jump: the mapping is rebased at `wall` first.
    pub fn set_speed(&mut self, speed: f64, wall: NaiveDateTime) {
        self.base_time = self.cur_date(wall);
        self.base_wall = wall;
        self.speed = speed;
        debug!(speed, base_time = %self.base_time, "time base rebased");
    }
}

/// Seconds within the minute, including the fractional part.
pub fn seconds_of(date: NaiveDateTime) -> f64 {
    date.second() as f64 + date.nanosecond() as f64 * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    const EPSILON: f64 = 1e-9;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_manual_clock_clones_share_instant() {
        let clock = ManualClock::new(at(3, 17, 0));
        let handle = clock.clone();
        handle.advance(Duration::seconds(5));
        assert_eq!(clock.now(), at(3, 17, 5));
        handle.set(at(9, 0, 0));
        assert_eq!(clock.now(), at(9, 0, 0));
    }

    #[test]
    fn test_time_base_scales_elapsed_wall_time() {
        let base = TimeBase::new(at(3, 17, 0), 2.0);
        assert_eq!(base.cur_date(at(3, 17, 10)), at(3, 17, 20));
    }

    #[test]
    fn test_set_speed_is_continuous() {
        let mut base = TimeBase::new(at(3, 17, 0), 1.0);
        let wall = at(3, 17, 30);
        let before = base.cur_date(wall);
        base.set_speed(10.0, wall);
        assert_eq!(base.cur_date(wall), before);
        assert_eq!(base.cur_date(at(3, 17, 31)), at(3, 17, 40));
    }

    #[test]
    fn test_set_time_jumps() {
        let mut base = TimeBase::new(at(3, 17, 0), 1.0);
        base.set_time(at(11, 59, 0), at(3, 17, 0));
        assert_eq!(base.cur_date(at(3, 17, 1)), at(11, 59, 1));
    }

    #[test]
    fn test_seconds_of_includes_fraction() {
        let date = at(0, 0, 12) + Duration::milliseconds(250);
        assert!((seconds_of(date) - 12.25).abs() < EPSILON);
    }
}
