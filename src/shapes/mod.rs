pub mod line;
pub mod seesaw;
pub mod sphere;

pub use line::{Capsule, Line};
pub use seesaw::Seesaw;
pub use sphere::Sphere;
