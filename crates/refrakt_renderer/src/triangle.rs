//! Triangle primitive for ray tracing.
//!
//! Intersects the triangle's plane, then checks the hit point against each
//! edge using the winding of the precomputed face normal.

use std::sync::Arc;

use crate::{hittable::{Hittable, NO_HIT}, Color, Effect, RayTracerState, Shade};
use refrakt_math::{Ray, Vec3};

/// A flat-shaded triangle primitive.
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    effect: Arc<Effect>,
}

impl Triangle {
    /// Create a new triangle from three vertices. The normal follows the
    /// counter-clockwise winding a -> b -> c.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, effect: Arc<Effect>) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        if normal == Vec3::ZERO {
            log::warn!("Degenerate triangle {:?} {:?} {:?} will never be hit", a, b, c);
        }

        Self {
            a,
            b,
            c,
            normal,
            effect,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Centroid of the three vertices.
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> f32 {
        let n = self.normal;
        let denom = ray.direction().dot(n);

        // Ray is parallel to the plane
        if denom == 0.0 {
            return NO_HIT;
        }

        let t = (self.a - ray.origin()).dot(n) / denom;
        if !t.is_finite() {
            return NO_HIT;
        }

        let q = ray.at(t);
        let (a, b, c) = (self.a, self.b, self.c);

        let inside = (q - a).cross(c - a).dot(n) > 0.0
            && (q - b).cross(a - b).dot(n) > 0.0
            && (q - c).cross(b - c).dot(n) > 0.0;

        if inside {
            t
        } else {
            NO_HIT
        }
    }

    /// Flat shading: the face normal everywhere.
    fn compute_normal(&self, _ray: &Ray, _t: f32) -> Vec3 {
        self.normal
    }

    fn shade(&self, ray: &mut Ray, t: f32, state: &RayTracerState) -> Color {
        self.effect.shade(ray, t, self.normal, state)
    }
}
