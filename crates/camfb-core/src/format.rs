use std::{fmt::Display, str::FromStr};

use crate::error::ConfigError;

/// Layout of the frames delivered on the input stream.
///
/// Only [`PixelFormat::Yuv420p`] has a decode path; the other layouts are known
/// so that selecting them fails validation instead of being misread as YUV420P.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    #[default]
    Yuv420p,
    Rgb565,
    Rgb32,
    Yuv422,
    Raw12,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 5] = [
        PixelFormat::Yuv420p,
        PixelFormat::Rgb565,
        PixelFormat::Rgb32,
        PixelFormat::Yuv422,
        PixelFormat::Raw12,
    ];

    /// Bytes per pixel, in quarters.
    pub fn chroma_subsample_factor(&self) -> usize {
        match self {
            PixelFormat::Yuv420p => 6,
            PixelFormat::Rgb565 => 8,
            PixelFormat::Rgb32 => 16,
            PixelFormat::Yuv422 => 8,
            PixelFormat::Raw12 => 6,
        }
    }

    pub fn frame_size(&self, width: usize, height: usize) -> usize {
        width * height * self.chroma_subsample_factor() / 4
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, PixelFormat::Yuv420p)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Yuv420p => "yuv420p",
            PixelFormat::Rgb565 => "rgb565",
            PixelFormat::Rgb32 => "rgb32",
            PixelFormat::Yuv422 => "yuv422",
            PixelFormat::Raw12 => "raw12",
        }
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| ConfigError::UnknownPixelFormat(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}
