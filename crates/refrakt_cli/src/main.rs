use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod scene;

use cli::Args;
use refrakt_renderer::{RayTracer, RenderConfig};
use scene::build_demo_scene;

/// Resolve the render config from an optional JSON file plus flag overrides.
fn render_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if args.serial {
        config.parallel = false;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    info!("Starting refrakt");

    let config = render_config(&args)?;
    let mut rt = RayTracer::new(config).context("creating ray tracer")?;

    let cubemap = args.cubemap.as_deref().map(|dir| (dir, args.cubemap_ext.as_str()));
    build_demo_scene(&mut rt, cubemap)?;

    // Elapsed time and the saved filename are logged by the renderer
    rt.render();
    rt.save(&args.output_dir, &args.basename, &args.extension)
        .context("saving rendered image")?;

    Ok(())
}
