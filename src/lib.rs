pub mod collision;
pub mod common;
pub mod constraints;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod render;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use common::{ManualClock, SimulationConfig, SystemClock, TimeSource};
pub use error::ClockError;
pub use math::vec2::Vec2;
pub use objects::Body;
pub use render::{Color, RecordingSurface, Surface};
pub use shapes::{Line, Seesaw, Sphere};
pub use world::{SceneLayout, Simulation};
