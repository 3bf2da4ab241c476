use std::io;

use thiserror::Error;

use crate::consts::MAX_PIXELS;

/// Failures of canvas allocation and whole-canvas filters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CanvasError {
    /// The requested size holds more than `MAX_PIXELS` samples.
    #[error("a {width}x{height} canvas exceeds the {}-pixel limit", MAX_PIXELS)]
    TooLarge { width: usize, height: usize },
}

/// Failures while reading or writing bitmap files.
#[derive(Debug, Error)]
pub enum BitmapError {
    #[error("bitmap I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The data doesn't start with `BM`.
    #[error("not a bitmap file")]
    Signature,

    /// Only uncompressed 24-bit images are understood.
    #[error("unsupported bitmap format: {bits} bits per pixel, compression {compression}")]
    Unsupported { bits: u16, compression: u32 },

    /// Width or height is zero or negative.
    #[error("bad bitmap dimensions {width}x{height}")]
    Dimensions { width: i32, height: i32 },

    /// Header or pixel data ends early.
    #[error("bitmap data is truncated")]
    Truncated,

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Failures while loading or rendering a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not read scene: {0}")]
    Io(#[from] io::Error),

    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown color name {0:?}")]
    UnknownColor(String),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Bitmap(#[from] BitmapError),
}
