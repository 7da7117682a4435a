//! Reflection, refraction and Fresnel helpers.

use crate::Vec3;

/// Refractive indices of common media.
pub mod ior {
    pub const AIR: f32 = 1.000293;
    pub const CARBON_DIOXIDE: f32 = 1.00045;
    pub const WATER: f32 = 1.3330;
    pub const ETHANOL: f32 = 1.361;
    pub const PYREX: f32 = 1.470;
    pub const DIAMOND: f32 = 2.419;
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `incident` through a surface with unit normal `n`
/// facing against it, where `eta` is the ratio of indices (from / to).
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(incident: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = n.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident - (eta * cos_i + k.sqrt()) * n)
}

/// Reflectance at normal incidence between two media.
#[inline]
pub fn schlick_r0(eta0: f32, eta1: f32) -> f32 {
    ((eta0 - eta1) / (eta0 + eta1)).powi(2)
}

/// Schlick's approximation of the Fresnel reflectance.
#[inline]
pub fn schlick(r0: f32, cos_theta: f32) -> f32 {
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}
