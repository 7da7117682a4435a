//! Hittable capability set and the closed set of scene objects.

use crate::{Color, CubeMap, RayTracerState, Sphere, Triangle};
use refrakt_math::{Ray, Vec3};

/// Sentinel distance returned when a ray misses an object.
pub const NO_HIT: f32 = -1.0;

/// Trait for objects that can be hit and shaded by rays.
pub trait Hittable: Send + Sync {
    /// Parametric distance to the intersection, or a negative value on a miss.
    fn intersect(&self, ray: &Ray) -> f32;

    /// Surface normal at parameter `t` along `ray`.
    fn compute_normal(&self, ray: &Ray, t: f32) -> Vec3;

    /// Shade the hit at parameter `t`, possibly tracing further rays through `state`.
    fn shade(&self, ray: &mut Ray, t: f32, state: &RayTracerState) -> Color;
}

/// Any object that can be placed in a scene.
pub enum SceneObject {
    Sphere(Sphere),
    Triangle(Triangle),
    /// Environment backdrop, hit at infinity by every ray.
    CubeMap(CubeMap),
}

impl SceneObject {
    /// True for backdrops that only win when nothing finite is hit.
    pub fn is_environment(&self) -> bool {
        matches!(self, SceneObject::CubeMap(_))
    }
}

impl Hittable for SceneObject {
    fn intersect(&self, ray: &Ray) -> f32 {
        match self {
            SceneObject::Sphere(s) => s.intersect(ray),
            SceneObject::Triangle(t) => t.intersect(ray),
            SceneObject::CubeMap(c) => c.intersect(ray),
        }
    }

    fn compute_normal(&self, ray: &Ray, t: f32) -> Vec3 {
        match self {
            SceneObject::Sphere(s) => s.compute_normal(ray, t),
            SceneObject::Triangle(tri) => tri.compute_normal(ray, t),
            SceneObject::CubeMap(c) => c.compute_normal(ray, t),
        }
    }

    fn shade(&self, ray: &mut Ray, t: f32, state: &RayTracerState) -> Color {
        match self {
            SceneObject::Sphere(s) => s.shade(ray, t, state),
            SceneObject::Triangle(tri) => tri.shade(ray, t, state),
            SceneObject::CubeMap(c) => c.shade(ray, t, state),
        }
    }
}

impl From<Sphere> for SceneObject {
    fn from(sphere: Sphere) -> Self {
        SceneObject::Sphere(sphere)
    }
}

impl From<Triangle> for SceneObject {
    fn from(triangle: Triangle) -> Self {
        SceneObject::Triangle(triangle)
    }
}

impl From<CubeMap> for SceneObject {
    fn from(cube_map: CubeMap) -> Self {
        SceneObject::CubeMap(cube_map)
    }
}
