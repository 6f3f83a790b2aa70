pub mod clock;
pub mod elevator;
pub mod scene;

pub use clock::Simulation;
pub use elevator::{BucketPose, Elevator};
pub use scene::{BallCounts, BallRow, ElevatorSpec, LabelRow, SceneLayout, SegmentSpec, SeesawSpec};
