//! Scene ownership and the re-entrant trace entry point.

use crate::{hittable::Hittable, Color, SceneObject};
use refrakt_math::{Ray, Vec3};

/// The scene plus camera, shared read-only by every pixel during a render.
pub struct RayTracerState {
    scene: Vec<SceneObject>,
    camera_position: Vec3,
    /// Flat background used when the scene has no environment object
    background: Color,
}

impl RayTracerState {
    /// Create an empty scene viewed from `camera_position`.
    pub fn new(camera_position: Vec3) -> Self {
        Self {
            scene: Vec::new(),
            camera_position,
            background: Color::ZERO,
        }
    }

    /// Set the flat background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: impl Into<SceneObject>) {
        self.scene.push(object.into());
    }

    pub fn scene(&self) -> &[SceneObject] {
        &self.scene
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.scene.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    /// Compute the color seen by a ray.
    ///
    /// Primary rays from the pixel loop and secondary rays fired by effects
    /// both come through here. A ray that is out of depth budget, or has been
    /// consumed, sees only the background.
    pub fn trace(&self, mut ray: Ray) -> Color {
        if !ray.can_recurse() {
            return self.background(&ray);
        }

        match self.nearest_hit(&ray) {
            Some((object, t)) => object.shade(&mut ray, t, self),
            None => self.background(&ray),
        }
    }

    /// Closest object with a positive hit distance.
    ///
    /// Ties go to the object added first. Environment objects report the
    /// largest finite distance and so only win when nothing else is hit.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(&SceneObject, f32)> {
        let mut nearest: Option<(&SceneObject, f32)> = None;

        for object in &self.scene {
            let t = object.intersect(ray);
            if t > 0.0 && nearest.map_or(true, |(_, best)| t < best) {
                nearest = Some((object, t));
            }
        }

        nearest
    }

    /// Background seen along a ray: the first environment object, else the
    /// flat background color.
    pub fn background(&self, ray: &Ray) -> Color {
        self.scene
            .iter()
            .find_map(|object| match object {
                SceneObject::CubeMap(cube_map) => Some(cube_map.sample(ray.direction())),
                _ => None,
            })
            .unwrap_or(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorEffect, CubeFace, CubeMap, Effect, MirrorEffect, Sphere, Triangle};
    use refrakt_core::Texture;
    use std::sync::Arc;

    fn color(c: Color) -> Arc<Effect> {
        Arc::new(Effect::from(ColorEffect::new(c)))
    }

    fn sky() -> CubeMap {
        CubeMap::new(CubeFace::ALL.map(|_| Texture::solid_color(Color::new(0.2, 0.4, 0.8))))
    }

    #[test]
    fn test_empty_scene_returns_background() {
        let state = RayTracerState::new(Vec3::ZERO).with_background(Color::new(0.1, 0.2, 0.3));
        let c = state.trace(Ray::new(Vec3::ZERO, -Vec3::Z, 5));
        assert_eq!(c, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let mut state = RayTracerState::new(Vec3::ZERO);
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, color(Color::X)));
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, color(Color::Y)));
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -7.0), 1.0, color(Color::Z)));

        let c = state.trace(Ray::new(Vec3::ZERO, -Vec3::Z, 5));
        assert_eq!(c, Color::Y);
    }

    #[test]
    fn test_ties_go_to_first_added() {
        let mut state = RayTracerState::new(Vec3::ZERO);
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, color(Color::X)));
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, color(Color::Y)));

        let c = state.trace(Ray::new(Vec3::ZERO, -Vec3::Z, 5));
        assert_eq!(c, Color::X);
    }

    #[test]
    fn test_environment_never_beats_finite_hit() {
        let mut state = RayTracerState::new(Vec3::ZERO);
        // Environment first so scan order cannot help
        state.add(sky());
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -1000.0), 1.0, color(Color::X)));

        assert_eq!(state.trace(Ray::new(Vec3::ZERO, -Vec3::Z, 5)), Color::X);
        assert_eq!(state.trace(Ray::new(Vec3::ZERO, Vec3::Z, 5)), Color::new(0.2, 0.4, 0.8));
    }

    #[test]
    fn test_exhausted_ray_sees_environment() {
        let mut state = RayTracerState::new(Vec3::ZERO).with_background(Color::ONE);
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, color(Color::X)));
        state.add(sky());

        let c = state.trace(Ray::new(Vec3::ZERO, -Vec3::Z, 0));
        assert_eq!(c, Color::new(0.2, 0.4, 0.8));
    }

    #[test]
    fn test_invalid_ray_is_not_traced() {
        let mut state = RayTracerState::new(Vec3::ZERO);
        state.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, color(Color::X)));

        let mut ray = Ray::new(Vec3::ZERO, -Vec3::Z, 5);
        ray.invalidate();
        assert_eq!(state.trace(ray), Color::ZERO);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let mirror = Arc::new(Effect::from(MirrorEffect::new().with_bounce_budget(1000)));
        let mut state = RayTracerState::new(Vec3::ZERO).with_background(Color::new(0.0, 0.5, 0.0));

        // Two large triangles facing each other across z = 0
        state.add(Triangle::new(
            Vec3::new(-100.0, -100.0, -1.0),
            Vec3::new(100.0, -100.0, -1.0),
            Vec3::new(0.0, 100.0, -1.0),
            mirror.clone(),
        ));
        state.add(Triangle::new(
            Vec3::new(-100.0, -100.0, 1.0),
            Vec3::new(0.0, 100.0, 1.0),
            Vec3::new(100.0, -100.0, 1.0),
            mirror,
        ));

        for depth in [1, 2, 16, 200] {
            let c = state.trace(Ray::new(Vec3::ZERO, -Vec3::Z, depth));
            assert!(c.is_finite());
            assert_eq!(c, Color::new(0.0, 0.5, 0.0));
        }
    }
}
