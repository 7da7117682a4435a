//! Demo scene: a glass sphere, a Phong sphere, a steel sphere and a mirror
//! triangle in front of an optional cube-map environment.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use refrakt_math::Vec3;
use refrakt_renderer::{
    Color, CubeMap, Effect, FresnelEffect, MirrorEffect, PhongEffect, RayTracer,
    Sphere, Triangle,
};

/// Populate `rt` with the demo scene.
pub fn build_demo_scene(rt: &mut RayTracer, cubemap: Option<(&Path, &str)>) -> Result<()> {
    let phong = Arc::new(Effect::from(PhongEffect::new(
        Color::splat(0.3),
        Vec3::new(0.0, 0.0, 10.0),
    )));
    let fresnel = Arc::new(Effect::from(FresnelEffect::default()));
    let steel = Arc::new(Effect::from(MirrorEffect::new()));

    rt.add_scene_object(Sphere::new(Vec3::new(-3.0, 0.0, 6.0), 2.0, fresnel));
    rt.add_scene_object(Sphere::new(Vec3::new(3.0, 0.0, 3.0), 2.0, phong));
    rt.add_scene_object(Sphere::new(Vec3::new(0.0, 3.0, 9.0), 2.0, steel.clone()));
    rt.add_scene_object(Triangle::new(
        Vec3::new(-2.0, 0.0, 0.0),
        Vec3::new(0.0, 1.5, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        steel,
    ));

    if let Some((dir, extension)) = cubemap {
        let cube_map = CubeMap::from_dir(dir, extension)
            .with_context(|| format!("loading cube map from {}", dir.display()))?;
        rt.add_scene_object(cube_map);
    }

    log::debug!("Demo scene has {} objects", rt.state().len());
    Ok(())
}
