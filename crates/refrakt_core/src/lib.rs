//! Refrakt Core - image resources for the ray tracer.
//!
//! This crate provides:
//!
//! - **Textures**: float RGB images loaded from disk with nearest-neighbour sampling
//!
//! # Example
//!
//! ```ignore
//! use refrakt_core::Texture;
//!
//! let face = Texture::load("cubemaps/posx.jpg")?;
//! let texel = face.sample(0.5, 0.5);
//! ```

pub mod texture;

// Re-export commonly used types
pub use texture::{Texture, TextureError, TextureResult};
