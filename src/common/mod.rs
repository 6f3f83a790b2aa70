pub mod config;
pub mod time;

pub use config::SimulationConfig;
pub use time::{ManualClock, SystemClock, TimeBase, TimeSource};
