//! Ray tracer orchestration.
//!
//! Implements the pixel loop with:
//! - A 2x2 box filter of sub-pixel samples per pixel
//! - Scanlines traced in parallel with rayon
//! - Sequentially numbered output files

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    find_free_filename, save_frame_buffer, Color, FrameBuffer, RayTracerState, RenderError,
    RenderResult, SceneObject,
};
use refrakt_math::{Ray, Vec3};

/// Sub-pixel sample offsets, in pixels.
const SAMPLE_OFFSETS: [(f32, f32); 4] = [(-0.25, -0.25), (-0.25, 0.25), (0.25, 0.25), (0.25, -0.25)];

/// Depth of the virtual screen plane in camera space.
const SCREEN_Z: f32 = -1.0;

/// Render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Depth budget of primary rays
    pub max_depth: i32,
    /// Camera position in world space
    pub camera_position: [f32; 3],
    /// Background color when the scene has no environment
    pub background: [f32; 3],
    /// Trace scanlines on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_depth: 10,
            camera_position: [0.0, 0.0, 10.0],
            background: [0.0, 0.0, 0.0],
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let config_error = |message: String| RenderError::Config {
            path: path.to_path_buf(),
            message,
        };

        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the depth budget of primary rays.
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera_position = position.to_array();
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color.to_array();
        self
    }

    /// Enable or disable parallel scanlines.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Extent of the virtual screen on the z = -1 plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenWindow {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl ScreenWindow {
    /// Unit-high window stretched horizontally by the aspect ratio.
    pub fn from_resolution(width: u32, height: u32) -> Self {
        let aspect = width as f32 / height as f32;
        Self {
            left: -aspect,
            right: aspect,
            bottom: -1.0,
            top: 1.0,
        }
    }

    /// Direction from the camera through fractional pixel (x, y).
    pub fn direction(&self, x: f32, y: f32, width: u32, height: u32) -> Vec3 {
        Vec3::new(
            x * (self.right - self.left) / width as f32 + self.left,
            y * (self.top - self.bottom) / height as f32 + self.bottom,
            SCREEN_Z,
        )
    }
}

/// Owns the frame buffer and the scene, and drives a render.
pub struct RayTracer {
    fb: FrameBuffer,
    state: RayTracerState,
    screen: ScreenWindow,
    config: RenderConfig,
}

impl RayTracer {
    /// Create a ray tracer with an empty scene.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: config.width,
                height: config.height,
            });
        }

        let state = RayTracerState::new(Vec3::from_array(config.camera_position))
            .with_background(Color::from_array(config.background));

        Ok(Self {
            fb: FrameBuffer::new(config.width, config.height),
            state,
            screen: ScreenWindow::from_resolution(config.width, config.height),
            config,
        })
    }

    /// Add an object to the scene. Must happen before `render`.
    pub fn add_scene_object(&mut self, object: impl Into<SceneObject>) {
        self.state.add(object);
    }

    pub fn state(&self) -> &RayTracerState {
        &self.state
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn screen(&self) -> ScreenWindow {
        self.screen
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Trace every pixel into the frame buffer, returning the elapsed time.
    pub fn render(&mut self) -> Duration {
        let start = Instant::now();
        let (width, height) = (self.fb.width(), self.fb.height());
        info!(
            "Rendering {}x{} with {} objects, max depth {}",
            width,
            height,
            self.state.len(),
            self.config.max_depth
        );

        let state = &self.state;
        let screen = &self.screen;
        let max_depth = self.config.max_depth;
        let shade_row = |(j, row): (usize, &mut [Color])| {
            for (i, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(state, screen, width, height, max_depth, i as u32, j as u32);
            }
        };

        let rows = self.fb.pixels_mut();
        if self.config.parallel {
            rows.par_chunks_mut(width as usize).enumerate().for_each(shade_row);
        } else {
            rows.chunks_mut(width as usize).enumerate().for_each(shade_row);
        }

        let elapsed = start.elapsed();
        info!("Computed in {:.3} seconds", elapsed.as_secs_f64());
        elapsed
    }

    /// Save the frame buffer as `<dir>/<basename><NNNN>.<extension>` using
    /// the first unused counter.
    pub fn save(&self, dir: impl AsRef<Path>, basename: &str, extension: &str) -> RenderResult<PathBuf> {
        let path = find_free_filename(dir.as_ref(), basename, extension)?;
        debug!("Writing frame to {}", path.display());
        save_frame_buffer(&self.fb, &path)?;
        Ok(path)
    }
}

/// Average of the 2x2 sub-pixel samples of pixel (i, j).
///
/// Row j = 0 is the bottom of the screen.
pub fn render_pixel(
    state: &RayTracerState,
    screen: &ScreenWindow,
    width: u32,
    height: u32,
    max_depth: i32,
    i: u32,
    j: u32,
) -> Color {
    let origin = state.camera_position();

    let sum: Color = SAMPLE_OFFSETS
        .iter()
        .map(|&(dx, dy)| {
            let direction = screen.direction(i as f32 + dx, j as f32 + dy, width, height);
            state.trace(Ray::new(origin, direction, max_depth))
        })
        .sum();

    sum * (1.0 / SAMPLE_OFFSETS.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorEffect, Effect, PhongEffect, Sphere};
    use std::sync::Arc;

    fn luminance(c: Color) -> f32 {
        0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z
    }

    fn phong_sphere_tracer(parallel: bool) -> RayTracer {
        let config = RenderConfig::default()
            .with_resolution(64, 48)
            .with_parallel(parallel);
        let mut rt = RayTracer::new(config).unwrap();

        let phong = Arc::new(Effect::from(PhongEffect::new(
            Color::splat(0.3),
            Vec3::new(0.0, 0.0, 10.0),
        )));
        rt.add_scene_object(Sphere::new(Vec3::new(0.0, 0.0, 6.0), 2.0, phong));
        rt
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.camera_position, [0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_config_from_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{ "width": 320, "max_depth": 3 }"#).unwrap();

        let config = RenderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.max_depth, 3);
        assert!(config.parallel);
    }

    #[test]
    fn test_config_from_bad_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, "{ width: ").unwrap();

        assert!(matches!(
            RenderConfig::from_json_file(&path),
            Err(RenderError::Config { .. })
        ));
        assert!(RenderConfig::from_json_file(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let config = RenderConfig::default().with_resolution(0, 10);
        assert!(matches!(
            RayTracer::new(config),
            Err(RenderError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_screen_window() {
        let screen = ScreenWindow::from_resolution(800, 600);
        assert!((screen.right - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(screen.left, -screen.right);
        assert_eq!((screen.bottom, screen.top), (-1.0, 1.0));

        let d = screen.direction(400.0, 300.0, 800, 600);
        assert!(d.x.abs() < 1e-6 && d.y.abs() < 1e-6);
        assert_eq!(d.z, -1.0);

        let corner = screen.direction(0.0, 0.0, 800, 600);
        assert_eq!(corner, Vec3::new(screen.left, screen.bottom, -1.0));
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        let mut state = RayTracerState::new(Vec3::ZERO);
        state.add(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            100.0,
            Arc::new(Effect::from(ColorEffect::new(Color::new(0.2, 0.4, 0.6)))),
        ));
        let screen = ScreenWindow::from_resolution(4, 4);

        // Camera inside a huge sphere: every sample sees the same color
        let c = render_pixel(&state, &screen, 4, 4, 3, 1, 2);
        assert!((c - Color::new(0.2, 0.4, 0.6)).length() < 1e-6);
    }

    #[test]
    fn test_phong_sphere_end_to_end() {
        let mut rt = phong_sphere_tracer(true);
        rt.render();
        let fb = rt.frame_buffer();

        let center = fb.get(32, 24);
        let background = Color::ZERO;

        for (x, y) in [(0, 0), (63, 0), (0, 47), (63, 47), (2, 24), (61, 24)] {
            let outside = fb.get(x, y);
            assert_eq!(outside, background, "pixel ({}, {})", x, y);
            assert!(luminance(center) > luminance(outside));
        }
        assert!(luminance(center) > 0.5);
    }

    #[test]
    fn test_serial_matches_parallel() {
        let mut parallel = phong_sphere_tracer(true);
        let mut serial = phong_sphere_tracer(false);
        parallel.render();
        serial.render();

        assert_eq!(parallel.frame_buffer().data(), serial.frame_buffer().data());
    }

    #[test]
    fn test_save_uses_next_counter() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut rt = RayTracer::new(RenderConfig::default().with_resolution(8, 6)).unwrap();
        rt.render();

        let first = rt.save(dir.path(), "test", "bmp").unwrap();
        let second = rt.save(dir.path(), "test", "bmp").unwrap();

        assert_eq!(first, dir.path().join("test0000.bmp"));
        assert_eq!(second, dir.path().join("test0001.bmp"));
        assert!(second.exists());
    }
}
