//! Shading effects attached to scene objects.
//!
//! An effect turns a hit into a color. Recursive effects fire secondary rays
//! back into the scene through [`RayTracerState::trace`].

use refrakt_math::{ior, reflect, refract, schlick, schlick_r0, Ray, Vec3};

use crate::RayTracerState;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Exponent of the Blinn-Phong specular lobe.
pub const SPECULAR_EXPONENT: f32 = 128.0;

/// Default cap on the depth given to rays spawned by recursive effects.
pub const DEFAULT_BOUNCE_BUDGET: i32 = 10;

/// Trait for anything that can shade a ray/surface intersection.
pub trait Shade: Send + Sync {
    /// Shade the hit at parameter `t` along `ray` with surface normal `normal`.
    fn shade(&self, ray: &mut Ray, t: f32, normal: Vec3, state: &RayTracerState) -> Color;
}

/// The closed set of effects a scene object can carry.
///
/// Objects hold effects behind an `Arc`, so one effect may be shared by
/// many objects.
#[derive(Debug, Clone)]
pub enum Effect {
    Color(ColorEffect),
    Phong(PhongEffect),
    Fresnel(FresnelEffect),
    Mirror(MirrorEffect),
}

impl Shade for Effect {
    fn shade(&self, ray: &mut Ray, t: f32, normal: Vec3, state: &RayTracerState) -> Color {
        match self {
            Effect::Color(e) => e.shade(ray, t, normal, state),
            Effect::Phong(e) => e.shade(ray, t, normal, state),
            Effect::Fresnel(e) => e.shade(ray, t, normal, state),
            Effect::Mirror(e) => e.shade(ray, t, normal, state),
        }
    }
}

impl From<ColorEffect> for Effect {
    fn from(effect: ColorEffect) -> Self {
        Effect::Color(effect)
    }
}

impl From<PhongEffect> for Effect {
    fn from(effect: PhongEffect) -> Self {
        Effect::Phong(effect)
    }
}

impl From<FresnelEffect> for Effect {
    fn from(effect: FresnelEffect) -> Self {
        Effect::Fresnel(effect)
    }
}

impl From<MirrorEffect> for Effect {
    fn from(effect: MirrorEffect) -> Self {
        Effect::Mirror(effect)
    }
}

/// Constant color, no lighting.
#[derive(Debug, Clone)]
pub struct ColorEffect {
    color: Color,
}

impl ColorEffect {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Shade for ColorEffect {
    fn shade(&self, _ray: &mut Ray, _t: f32, _normal: Vec3, _state: &RayTracerState) -> Color {
        self.color
    }
}

/// Local Blinn-Phong lighting from a single point light.
#[derive(Debug, Clone)]
pub struct PhongEffect {
    color: Color,
    light_pos: Vec3,
    light_diffuse: Color,
    light_specular: Color,
}

impl PhongEffect {
    /// Create a Phong effect with a white diffuse light and a 0.7 specular term.
    pub fn new(color: Color, light_pos: Vec3) -> Self {
        Self {
            color,
            light_pos,
            light_diffuse: Color::ONE,
            light_specular: Color::splat(0.7),
        }
    }

    pub fn with_light_diffuse(mut self, light_diffuse: Color) -> Self {
        self.light_diffuse = light_diffuse;
        self
    }

    pub fn with_light_specular(mut self, light_specular: Color) -> Self {
        self.light_specular = light_specular;
        self
    }
}

impl Shade for PhongEffect {
    fn shade(&self, ray: &mut Ray, t: f32, normal: Vec3, _state: &RayTracerState) -> Color {
        // Terminal pass: nothing is traced from here
        ray.invalidate();

        let light_dir = (self.light_pos - ray.at(t)).normalize_or_zero();
        let view_dir = (-ray.direction()).normalize_or_zero();
        let half = (view_dir + light_dir).normalize_or_zero();

        let diffuse = normal.dot(light_dir).max(0.0);
        let specular = normal.dot(half).max(0.0).powf(SPECULAR_EXPONENT);

        diffuse * self.light_diffuse * self.color + self.light_specular * specular
    }
}

/// Dielectric surface blending reflection and refraction by Schlick's
/// approximation.
#[derive(Debug, Clone)]
pub struct FresnelEffect {
    /// Index of refraction on the side the normal points to
    eta_outside: f32,
    /// Index of refraction behind the surface
    eta_inside: f32,
    bounce_budget: i32,
}

impl FresnelEffect {
    /// Create a dielectric between two media.
    ///
    /// - `eta_outside`: Medium the normal points into (1.0 = vacuum)
    /// - `eta_inside`: Medium enclosed by the surface (1.333 = water, 1.47 = pyrex)
    pub fn new(eta_outside: f32, eta_inside: f32) -> Self {
        Self {
            eta_outside,
            eta_inside,
            bounce_budget: DEFAULT_BOUNCE_BUDGET,
        }
    }

    /// Cap the depth of the reflected and refracted rays.
    pub fn with_bounce_budget(mut self, bounce_budget: i32) -> Self {
        self.bounce_budget = bounce_budget;
        self
    }

    /// Reflectance at normal incidence.
    pub fn r0(&self) -> f32 {
        schlick_r0(self.eta_outside, self.eta_inside)
    }

    /// Fraction of light reflected at an angle with cosine `cos_theta`.
    pub fn weight(&self, cos_theta: f32) -> f32 {
        schlick(self.r0(), cos_theta)
    }
}

impl Default for FresnelEffect {
    fn default() -> Self {
        Self::new(ior::AIR, ior::WATER)
    }
}

impl Shade for FresnelEffect {
    fn shade(&self, ray: &mut Ray, t: f32, normal: Vec3, state: &RayTracerState) -> Color {
        let v = ray.direction().normalize_or_zero();
        let n = normal.normalize_or_zero();

        // Leaving the medium: flip the normal and the index ratio
        let exiting = v.dot(n) >= 0.0;
        let (n, eta) = if exiting {
            (-n, self.eta_inside / self.eta_outside)
        } else {
            (n, self.eta_outside / self.eta_inside)
        };

        let reflect_ray = spawn_secondary(ray, t, reflect(v, n), n, self.bounce_budget);
        let reflect_color = state.trace(reflect_ray);

        match refract(v, n, eta) {
            Some(refract_dir) => {
                // Schlick takes the angle on the outer side
                let cos_theta = if exiting {
                    refract_dir.dot(-n)
                } else {
                    (-v).dot(n)
                };
                let fresnel = self.weight(cos_theta.clamp(0.0, 1.0));

                let refract_ray = spawn_secondary(ray, t, refract_dir, n, self.bounce_budget);
                let refract_color = state.trace(refract_ray);

                refract_color.lerp(reflect_color, fresnel)
            }
            // Total internal reflection
            None => reflect_color,
        }
    }
}

/// Perfect mirror, no attenuation.
#[derive(Debug, Clone)]
pub struct MirrorEffect {
    bounce_budget: i32,
}

impl MirrorEffect {
    pub fn new() -> Self {
        Self {
            bounce_budget: DEFAULT_BOUNCE_BUDGET,
        }
    }

    /// Cap the depth of the reflected ray.
    pub fn with_bounce_budget(mut self, bounce_budget: i32) -> Self {
        self.bounce_budget = bounce_budget;
        self
    }
}

impl Default for MirrorEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Shade for MirrorEffect {
    fn shade(&self, ray: &mut Ray, t: f32, normal: Vec3, state: &RayTracerState) -> Color {
        let n = normal.normalize_or_zero();
        let v = ray.direction().normalize_or_zero();

        let reflect_ray = spawn_secondary(ray, t, reflect(v, n), n, self.bounce_budget);
        state.trace(reflect_ray)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Spawn a bounce off the surface hit at `t`.
///
/// The child's depth never exceeds the parent's remaining depth minus one,
/// however large the effect's own budget is.
#[inline]
fn spawn_secondary(ray: &Ray, t: f32, direction: Vec3, normal: Vec3, budget: i32) -> Ray {
    ray.spawn_with_depth(t, direction, budget.min(ray.remaining_depth - 1))
        .offset_from_surface(normal)
}
