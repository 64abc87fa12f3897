use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, importing or exporting a tile map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to open map image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode map image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write map image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("map image must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },
    #[error("map image has no pixels")]
    EmptyImage,
    #[error("tile size {width}x{height} must be a power of two on both axes and at least 2")]
    InvalidTileMetrics { width: i32, height: i32 },
}
