use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "refrakt")]
#[command(about = "Recursive ray tracer with reflection and refraction")]
pub struct Args {
    /// JSON render config; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Depth budget of primary rays
    #[arg(long)]
    pub max_depth: Option<i32>,

    /// Directory holding posx/negx/posy/negy/posz/negz face images
    #[arg(long)]
    pub cubemap: Option<PathBuf>,

    /// Extension of the cube map face images
    #[arg(long, default_value = "jpg")]
    pub cubemap_ext: String,

    /// Output file name prefix; a 4-digit counter is appended
    #[arg(long, default_value = "test")]
    pub basename: String,

    /// Output file extension, which also selects the image format
    #[arg(long, default_value = "bmp")]
    pub extension: String,

    /// Directory the image is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Trace on the calling thread only
    #[arg(long)]
    pub serial: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
