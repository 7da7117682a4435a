//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{hittable::{Hittable, NO_HIT}, Color, Effect, RayTracerState, Shade};
use refrakt_math::{Ray, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    effect: Arc<Effect>,
}

impl Sphere {
    /// Create a new sphere shaded by a (possibly shared) effect.
    pub fn new(center: Vec3, radius: f32, effect: Arc<Effect>) -> Self {
        Self {
            center,
            radius,
            effect,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Nearest positive root of |o + t·d - c|² = r².
    ///
    /// From inside the sphere the roots straddle zero and the positive one is
    /// returned. A sphere entirely behind the ray is a miss.
    fn intersect(&self, ray: &Ray) -> f32 {
        let d = ray.direction();
        let oc = ray.origin() - self.center;

        let a = d.dot(d);
        let b = 2.0 * d.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        if a == 0.0 {
            return NO_HIT;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return NO_HIT;
        }

        let sqrtd = discriminant.sqrt();
        let t0 = (-b - sqrtd) / (2.0 * a);
        let t1 = (-b + sqrtd) / (2.0 * a);

        if t0 * t1 < 0.0 {
            return t0.max(t1);
        }
        if t0 > 0.0 && t1 > 0.0 {
            return t0.min(t1);
        }
        NO_HIT
    }

    fn compute_normal(&self, ray: &Ray, t: f32) -> Vec3 {
        (ray.at(t) - self.center) / self.radius
    }

    fn shade(&self, ray: &mut Ray, t: f32, state: &RayTracerState) -> Color {
        let normal = self.compute_normal(ray, t);
        self.effect.shade(ray, t, normal, state)
    }
}
