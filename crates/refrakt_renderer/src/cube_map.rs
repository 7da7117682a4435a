//! Cube-map environment.
//!
//! The cube map is the backdrop of the scene: every ray hits it, but as far
//! away as possible, so any finite object in front of it wins.

use std::path::Path;

use crate::{hittable::Hittable, Color, RayTracerState, RenderResult};
use refrakt_core::Texture;
use refrakt_math::{Ray, Vec3};

/// One of the six faces of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl CubeFace {
    /// All faces in storage order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Conventional file stem of the face image (`posx`, `negx`, ...).
    pub fn file_stem(self) -> &'static str {
        match self {
            CubeFace::PosX => "posx",
            CubeFace::NegX => "negx",
            CubeFace::PosY => "posy",
            CubeFace::NegY => "negy",
            CubeFace::PosZ => "posz",
            CubeFace::NegZ => "negz",
        }
    }

    /// Face a direction points at, with face-local (s, t) in [0, 1].
    ///
    /// The dominant axis picks the face; the other two components are
    /// divided by it to project onto the face.
    pub fn locate(dir: Vec3) -> (CubeFace, f32, f32) {
        let (ax, ay, az) = (dir.x.abs(), dir.y.abs(), dir.z.abs());

        if ax >= ay && ax >= az {
            let s = 1.0 - (dir.z / dir.x + 1.0) * 0.5;
            if dir.x >= 0.0 {
                (CubeFace::PosX, s, 1.0 - (dir.y / dir.x + 1.0) * 0.5)
            } else {
                (CubeFace::NegX, s, (dir.y / dir.x + 1.0) * 0.5)
            }
        } else if ay >= ax && ay >= az {
            let t = (dir.z / dir.y + 1.0) * 0.5;
            if dir.y >= 0.0 {
                (CubeFace::PosY, (dir.x / dir.y + 1.0) * 0.5, t)
            } else {
                (CubeFace::NegY, 1.0 - (dir.x / dir.y + 1.0) * 0.5, t)
            }
        } else {
            let s = (dir.x / dir.z + 1.0) * 0.5;
            if dir.z >= 0.0 {
                (CubeFace::PosZ, s, 1.0 - (dir.y / dir.z + 1.0) * 0.5)
            } else {
                (CubeFace::NegZ, s, (dir.y / dir.z + 1.0) * 0.5)
            }
        }
    }
}

/// Six-face environment map.
pub struct CubeMap {
    faces: [Texture; 6],
}

impl CubeMap {
    /// Build from textures given in `CubeFace::ALL` order.
    pub fn new(faces: [Texture; 6]) -> Self {
        Self { faces }
    }

    /// Load the six face images, given in `CubeFace::ALL` order.
    pub fn load<P: AsRef<Path>>(paths: [P; 6]) -> RenderResult<Self> {
        let [px, nx, py, ny, pz, nz] = paths;
        Ok(Self::new([
            Texture::load(px)?,
            Texture::load(nx)?,
            Texture::load(py)?,
            Texture::load(ny)?,
            Texture::load(pz)?,
            Texture::load(nz)?,
        ]))
    }

    /// Load `posx.<ext>` ... `negz.<ext>` from a directory.
    pub fn from_dir(dir: impl AsRef<Path>, extension: &str) -> RenderResult<Self> {
        let dir = dir.as_ref();
        log::debug!("Loading cube map from {}", dir.display());
        Self::load(CubeFace::ALL.map(|face| dir.join(format!("{}.{}", face.file_stem(), extension))))
    }

    pub fn face(&self, face: CubeFace) -> &Texture {
        &self.faces[face as usize]
    }

    /// Environment color seen along `dir` (nearest texel, no blending).
    pub fn sample(&self, dir: Vec3) -> Color {
        let (face, s, t) = CubeFace::locate(dir);
        self.face(face).sample(s, t)
    }
}

impl Hittable for CubeMap {
    fn intersect(&self, _ray: &Ray) -> f32 {
        f32::MAX
    }

    fn compute_normal(&self, ray: &Ray, _t: f32) -> Vec3 {
        -ray.direction().normalize_or_zero()
    }

    fn shade(&self, ray: &mut Ray, _t: f32, _state: &RayTracerState) -> Color {
        self.sample(ray.direction())
    }
}
