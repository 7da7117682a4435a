use crate::Vec3;

/// Distance secondary rays are pushed off the surface they start on.
pub const SURFACE_EPSILON: f32 = 1e-4;

/// A ray in 3D space with a recursion-depth budget.
///
/// Rays are used for raytracing - they represent a line starting at `origin`
/// and traveling in `direction`. The direction is not normalized on
/// construction. `remaining_depth` bounds how many further bounces may be
/// spawned from this ray, and `valid` is cleared once an effect has consumed
/// the ray as a terminal shading pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub remaining_depth: i32,
    valid: bool,
}

impl Ray {
    /// Create a new primary ray with the given depth budget.
    pub fn new(origin: Vec3, direction: Vec3, remaining_depth: i32) -> Self {
        Self {
            origin,
            direction,
            remaining_depth,
            valid: true,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Spawn a child ray at parameter `t` along this ray.
    ///
    /// The child gets one less bounce than its parent.
    pub fn spawn(&self, t: f32, direction: Vec3) -> Ray {
        self.spawn_with_depth(t, direction, self.remaining_depth - 1)
    }

    /// Spawn a child ray with an explicit depth budget.
    pub fn spawn_with_depth(&self, t: f32, direction: Vec3, remaining_depth: i32) -> Ray {
        Ray::new(self.at(t), direction, remaining_depth)
    }

    /// Push the origin off a surface with normal `normal`, towards the side
    /// the ray is heading into.
    pub fn offset_from_surface(mut self, normal: Vec3) -> Ray {
        let side = if self.direction.dot(normal) >= 0.0 {
            normal
        } else {
            -normal
        };
        self.origin += side * SURFACE_EPSILON;
        self
    }

    /// Mark the ray as consumed. Invalid rays are never traced further.
    #[inline]
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True while the ray still has budget to be traced.
    #[inline]
    pub fn can_recurse(&self) -> bool {
        self.valid && self.remaining_depth > 0
    }
}
