//! Texture loading for environment maps.
//!
//! Textures are decoded with the `image` crate into float RGB triples and
//! addressed with the origin at the top-left corner, the convention cube-map
//! face images are authored in.

use std::path::Path;

use refrakt_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
///
/// Stores pixels as float RGB in the 0-1 range, row-major, top row first.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, one [R, G, B] triple per pixel
    pub pixels: Vec<[f32; 3]>,

    /// Source file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z]],
            path: "<solid>".to_string(),
        }
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(e) => {
                TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
            }
            e => TextureError::ImageError(e),
        })?;

        let rgb = img.to_rgb32f();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.display().to_string()));
        }

        let pixels: Vec<[f32; 3]> = rgb.pixels().map(|p| [p[0], p[1], p[2]]).collect();

        let texture = Texture::new(width, height, pixels, path.to_string_lossy());
        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            texture.path,
            width,
            height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Sample the texture at coordinates (s, t) with nearest-neighbour lookup.
    ///
    /// Coordinates are in [0, 1], with (0, 0) at the top-left. Values
    /// outside that range are clamped to the border texel. An empty texture
    /// samples as black.
    pub fn sample(&self, s: f32, t: f32) -> Vec3 {
        if self.width == 0 || self.height == 0 {
            return Vec3::ZERO;
        }

        let w = self.width as f32;
        let h = self.height as f32;
        let xf = (s * w).clamp(0.0, w - 1.0);
        let yf = (t * h).clamp(0.0, h - 1.0);

        let [r, g, b] = self.get_pixel(xf as u32, yf as u32);
        Vec3::new(r, g, b)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or([0.0, 0.0, 0.0])
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 3]>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 texture: top row red, green; bottom row blue, white.
    fn quad() -> Texture {
        Texture::new(
            2,
            2,
            vec![
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
            ],
            "<quad>",
        )
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);

        let sample = tex.sample(0.5, 0.5);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 0.5).abs() < 0.001);
        assert!((sample.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_sample_origin_is_top_left() {
        let tex = quad();
        assert_eq!(tex.sample(0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(0.99, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(0.0, 0.99), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(0.99, 0.99), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sample_is_nearest_not_blended() {
        let tex = quad();
        // Just below the centre lands on a single texel, no blending
        let c = tex.sample(0.49, 0.49);
        assert_eq!(c, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_sample_clamps_edges() {
        let tex = quad();
        assert_eq!(tex.sample(1.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(tex.sample(-0.5, 2.0), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Texture::load("definitely/not/here.png");
        assert!(matches!(result, Err(TextureError::LoadError(_))));
    }

    #[test]
    fn test_sample_empty_texture_is_black() {
        let tex = Texture::new(0, 0, Vec::new(), "<empty>");
        assert_eq!(tex.sample(0.5, 0.5), Vec3::ZERO);

        let tex = Texture::new(3, 0, Vec::new(), "<flat>");
        assert_eq!(tex.sample(1.0, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png at all").unwrap();

        let result = Texture::load(&path);
        assert!(matches!(result, Err(TextureError::ImageError(_))));
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("face.png");

        let mut img = image::RgbImage::new(4, 2);
        img.put_pixel(0, 1, image::Rgb([255, 0, 0]));
        img.save(&path).unwrap();

        let tex = Texture::load(&path).unwrap();
        assert_eq!(tex.width, 4);
        assert_eq!(tex.height, 2);
        assert_eq!(tex.pixels.len(), 8);
        // Bottom-left pixel of the file is red
        assert_eq!(tex.sample(0.0, 0.99), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(0.0, 0.0), Vec3::ZERO);
    }
}
