//! Refrakt Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style ray tracer: every primary ray is shaded by the effect of
//! the nearest object it hits, and effects may fire reflected and refracted
//! rays back into the scene until the ray's depth budget runs out.

mod cube_map;
mod effect;
mod error;
mod frame_buffer;
mod hittable;
mod output;
mod renderer;
mod sphere;
mod state;
mod triangle;

pub use cube_map::{CubeFace, CubeMap};
pub use effect::{Color, ColorEffect, Effect, FresnelEffect, MirrorEffect, PhongEffect, Shade};
pub use error::{RenderError, RenderResult};
pub use frame_buffer::FrameBuffer;
pub use hittable::{Hittable, SceneObject, NO_HIT};
pub use output::{find_free_filename, save_frame_buffer, MAX_FILE_COUNTER};
pub use renderer::{render_pixel, RayTracer, RenderConfig, ScreenWindow};
pub use sphere::Sphere;
pub use state::RayTracerState;
pub use triangle::Triangle;

/// Re-export Vec3 and Ray from refrakt_math
pub use refrakt_math::{Ray, Vec3};
