use std::str::FromStr;

use crate::{
    error::ConfigError,
    format::{ColorMode, PixelFormat},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const VGA: Resolution = Resolution::new(640, 480);
    pub const QVGA: Resolution = Resolution::new(320, 240);

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::VGA
    }
}

/// Parses `W*H` tokens such as `640*480`. `WxH` is accepted as well.
impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidResolution(s.to_string());

        let (width_str, height_str) = s
            .trim()
            .split_once(|c: char| c == '*' || c == 'x' || c == 'X')
            .ok_or_else(invalid)?;

        let width = usize::from_str(width_str.trim()).map_err(|_| invalid())?;
        let height = usize::from_str(height_str.trim()).map_err(|_| invalid())?;

        Ok(Self { width, height })
    }
}

/// Options a run is started with. Validated once, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub output_width: usize,
    pub output_height: usize,
    pub pixel_format: PixelFormat,
    pub color_mode: ColorMode,
    pub tee_to_secondary_sink: bool,
}

impl RunConfig {
    pub fn new(resolution: Resolution, pixel_format: PixelFormat) -> Self {
        Self {
            output_width: resolution.width,
            output_height: resolution.height,
            pixel_format,
            ..Default::default()
        }
    }

    pub fn color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn tee(mut self, tee_to_secondary_sink: bool) -> Self {
        self.tee_to_secondary_sink = tee_to_secondary_sink;
        self
    }

    pub fn chroma_subsample_factor(&self) -> usize {
        self.pixel_format.chroma_subsample_factor()
    }

    pub fn frame_size(&self) -> usize {
        self.pixel_format
            .frame_size(self.output_width, self.output_height)
    }

    /// Rejects configurations the decode path cannot honour. Must pass before
    /// the first byte is read from the input.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.output_width == 0 || self.output_height == 0 {
            return Err(ConfigError::ZeroDimensions {
                width: self.output_width,
                height: self.output_height,
            });
        }

        if !self.pixel_format.is_supported() {
            return Err(ConfigError::UnsupportedPixelFormat(self.pixel_format));
        }

        if self.output_width % 2 != 0 || self.output_height % 2 != 0 {
            return Err(ConfigError::OddDimensions {
                width: self.output_width,
                height: self.output_height,
            });
        }

        Ok(self)
    }

    pub fn check_fits(&self, surface_width: usize, surface_height: usize) -> Result<(), ConfigError> {
        if self.output_width > surface_width || self.output_height > surface_height {
            return Err(ConfigError::FrameExceedsSurface {
                frame_width: self.output_width,
                frame_height: self.output_height,
                surface_width,
                surface_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_presets_and_arbitrary_tokens() {
        assert_eq!("640*480".parse::<Resolution>(), Ok(Resolution::VGA));
        assert_eq!("320*240".parse::<Resolution>(), Ok(Resolution::QVGA));
        assert_eq!("1280x720".parse::<Resolution>(), Ok(Resolution::new(1280, 720)));
        assert_eq!(Resolution::default(), Resolution::VGA);
    }

    #[test]
    fn malformed_resolution_is_rejected() {
        for token in ["640", "640*", "*480", "a*b", "640*480*2", ""] {
            assert_eq!(
                token.parse::<Resolution>(),
                Err(ConfigError::InvalidResolution(token.to_string())),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn odd_dimensions_are_rejected() {
        for resolution in [Resolution::new(641, 480), Resolution::new(640, 479)] {
            let result = RunConfig::new(resolution, PixelFormat::Yuv420p).validate();
            assert_eq!(
                result,
                Err(ConfigError::OddDimensions {
                    width: resolution.width,
                    height: resolution.height
                })
            );
        }
    }

    #[test]
    fn declared_formats_without_decoder_are_rejected() {
        for format in [
            PixelFormat::Rgb565,
            PixelFormat::Rgb32,
            PixelFormat::Yuv422,
            PixelFormat::Raw12,
        ] {
            let result = RunConfig::new(Resolution::VGA, format).validate();
            assert_eq!(result, Err(ConfigError::UnsupportedPixelFormat(format)));
        }
    }

    #[test]
    fn valid_config_reports_frame_size() {
        let config = RunConfig::new(Resolution::QVGA, PixelFormat::Yuv420p)
            .tee(true)
            .validate()
            .unwrap();

        assert!(config.tee_to_secondary_sink);
        assert_eq!(config.chroma_subsample_factor(), 6);
        assert_eq!(config.frame_size(), 320 * 240 * 3 / 2);
    }

    #[test]
    fn frames_larger_than_the_surface_do_not_fit() {
        let config = RunConfig::new(Resolution::VGA, PixelFormat::Yuv420p);

        assert!(config.check_fits(640, 480).is_ok());
        assert!(config.check_fits(1024, 768).is_ok());
        assert!(matches!(
            config.check_fits(320, 480),
            Err(ConfigError::FrameExceedsSurface { .. })
        ));
    }
}
