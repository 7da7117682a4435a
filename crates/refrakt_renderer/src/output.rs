//! Writing rendered frames to disk under sequential filenames.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::info;

use crate::{FrameBuffer, RenderError, RenderResult};

/// Counters 0000..=9999 are tried before giving up.
pub const MAX_FILE_COUNTER: u32 = 10_000;

/// First `<dir>/<basename><NNNN>.<extension>` that does not exist yet.
pub fn find_free_filename(dir: &Path, basename: &str, extension: &str) -> RenderResult<PathBuf> {
    (0..MAX_FILE_COUNTER)
        .map(|i| dir.join(format!("{}{:04}.{}", basename, i, extension)))
        .find(|path| !path.exists())
        .ok_or_else(|| RenderError::NoFreeFilename {
            basename: basename.to_string(),
            extension: extension.to_string(),
        })
}

/// Encode the frame buffer to `path`, choosing the codec from the extension.
///
/// OpenEXR receives the linear float data; every other format gets 8-bit RGB
/// clamped to [0, 1].
pub fn save_frame_buffer(fb: &FrameBuffer, path: &Path) -> RenderResult<()> {
    let is_float = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("exr"));

    let result = if is_float {
        DynamicImage::ImageRgb32F(fb.to_rgb32f()).save(path)
    } else {
        fb.to_rgb8().save(path)
    };

    result.map_err(|source| RenderError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Saved {}", path.display());
    Ok(())
}
