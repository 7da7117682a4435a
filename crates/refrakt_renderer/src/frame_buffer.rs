//! Float RGB frame buffer.

use crate::Color;
use image::{ImageBuffer, Rgb, RgbImage};

/// Width x height grid of float RGB pixels.
///
/// Row 0 is the bottom of the virtual screen. Conversions to `image` buffers
/// flip the rows so the written image is upright.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// All pixels, row-major from the bottom row up.
    pub fn data(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access for renderers that fill whole scanlines at a time.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Clamp to [0, 1] and quantise to 8-bit RGB, top row first.
    pub fn to_rgb8(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, self.height - 1 - y);
            Rgb([to_u8(c.x), to_u8(c.y), to_u8(c.z)])
        })
    }

    /// Linear float RGB, top row first.
    pub fn to_rgb32f(&self) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, self.height - 1 - y);
            Rgb([c.x, c.y, c.z])
        })
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.data().len(), 12);
        assert!(fb.data().iter().all(|c| *c == Color::ZERO));
    }

    #[test]
    fn test_set_get() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set(3, 2, Color::new(0.1, 0.2, 0.3));
        assert_eq!(fb.get(3, 2), Color::new(0.1, 0.2, 0.3));
        assert_eq!(fb.data()[11], Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_to_rgb8_flips_and_clamps() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(0, 0, Color::new(2.0, -1.0, 0.5));

        let img = fb.to_rgb8();
        // Bottom row of the buffer is the last row of the image
        assert_eq!(img.get_pixel(0, 1), &Rgb([255, 0, 128]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_to_rgb32f_keeps_range() {
        let mut fb = FrameBuffer::new(1, 2);
        fb.set(0, 1, Color::new(3.5, 0.25, 0.0));

        let img = fb.to_rgb32f();
        assert_eq!(img.get_pixel(0, 0), &Rgb([3.5, 0.25, 0.0]));
    }
}
