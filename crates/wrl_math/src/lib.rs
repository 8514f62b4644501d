// Re-export glam for convenience
pub use glam::*;

// WRL math types
mod axis;
mod bounds;
pub use axis::{yup_to_zup, zup_to_yup};
pub use bounds::Bounds;
