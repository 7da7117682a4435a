// Re-export glam for convenience
pub use glam::*;

// Refrakt math types
mod optics;
mod ray;
pub use optics::{ior, reflect, refract, schlick, schlick_r0};
pub use ray::{Ray, SURFACE_EPSILON};
