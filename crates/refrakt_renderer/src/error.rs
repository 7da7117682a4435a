//! Errors surfaced by a render run.

use std::path::PathBuf;

use refrakt_core::TextureError;
use thiserror::Error;

/// Failures that abort a render. Geometric misses are never errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Unable to find unique filename for {basename}%d.{extension}")]
    NoFreeFilename { basename: String, extension: String },

    #[error("Unable to save {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid render config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
