pub mod detection;
pub mod info;

pub use detection::*;
pub use info::CollisionInfo;
