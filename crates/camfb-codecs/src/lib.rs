use camfb_core::{
    config::RunConfig,
    error::ConfigError,
    format::{ColorMode, PixelFormat},
    surface::PixelSink,
};
use log::info;

use yuv420p::{monochrome::YUV420PMonochromeDecoder, YUV420PDecoder};

pub mod yuv;
pub mod yuv420p;

/// Converts one complete raw frame and commits every pixel to `sink`.
pub trait FrameDecoder<S: PixelSink> {
    fn decode(&self, frame: &[u8], sink: &mut S);
}

/// Picks the decoder for a validated configuration. Declared formats without
/// a decode path are rejected here as well.
pub fn setup_decoder<S: PixelSink>(
    config: &RunConfig,
) -> Result<Box<dyn FrameDecoder<S>>, ConfigError> {
    let (width, height) = (config.output_width, config.output_height);

    let decoder: Box<dyn FrameDecoder<S>> = match (config.pixel_format, config.color_mode) {
        (PixelFormat::Yuv420p, ColorMode::Color) => Box::new(YUV420PDecoder::new(width, height)?),
        (PixelFormat::Yuv420p, ColorMode::Monochrome) => {
            Box::new(YUV420PMonochromeDecoder::new(width, height)?)
        }
        (format, _) => return Err(ConfigError::UnsupportedPixelFormat(format)),
    };

    info!(
        "Decoding {} {}x{} frames ({:?})",
        config.pixel_format, width, height, config.color_mode
    );

    Ok(decoder)
}
