use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Unable to open {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("{request} failed: {source}")]
    Ioctl {
        request: &'static str,
        source: io::Error,
    },

    #[error("Unable to map {len} bytes of framebuffer memory: {source}")]
    Mmap { len: usize, source: io::Error },

    #[error("Unsupported surface depth: {0} bits per pixel")]
    UnsupportedDepth(u32),

    #[error("Row stride of {row_stride_bytes} bytes is shorter than a {min_row_stride} bytes row")]
    InvalidStride {
        row_stride_bytes: usize,
        min_row_stride: usize,
    },

    #[error("Surface memory holds {actual} bytes, {expected} required")]
    RegionTooSmall { expected: usize, actual: usize },
}
