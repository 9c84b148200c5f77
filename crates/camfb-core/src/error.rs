use thiserror::Error;

use crate::format::PixelFormat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{width}x{height} frames cannot be 4:2:0 subsampled, both dimensions must be even")]
    OddDimensions { width: usize, height: usize },

    #[error("Frame dimensions must be non-zero (got {width}x{height})")]
    ZeroDimensions { width: usize, height: usize },

    #[error("Pixel format {0} has no decode path")]
    UnsupportedPixelFormat(PixelFormat),

    #[error("Unknown pixel format '{0}'")]
    UnknownPixelFormat(String),

    #[error("Invalid frame size '{0}', expected W*H")]
    InvalidResolution(String),

    #[error("{frame_width}x{frame_height} frames do not fit a {surface_width}x{surface_height} surface")]
    FrameExceedsSurface {
        frame_width: usize,
        frame_height: usize,
        surface_width: usize,
        surface_height: usize,
    },
}
