use camfb_core::{error::ConfigError, surface::PixelSink};

use crate::{yuv::luma_to_rgb, FrameDecoder};

use super::PlaneLayout;

/// Renders the luma plane of a YUV420P frame as gray levels. Chroma planes are
/// still part of the frame but never read.
pub struct YUV420PMonochromeDecoder {
    layout: PlaneLayout,
}

impl YUV420PMonochromeDecoder {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: PlaneLayout::new(width, height)?,
        })
    }
}

impl<S: PixelSink> FrameDecoder<S> for YUV420PMonochromeDecoder {
    fn decode(&self, frame: &[u8], sink: &mut S) {
        let channel_layout = sink.descriptor().channel_layout;

        frame[..self.layout.luma_size()]
            .chunks_exact(self.layout.width)
            .enumerate()
            .for_each(|(j, row)| {
                for (i, luma) in row.iter().enumerate() {
                    let (r, g, b) = luma_to_rgb(*luma);
                    sink.put_pixel(i, j, channel_layout.pack(r, g, b));
                }
            });
    }
}
