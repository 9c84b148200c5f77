use camfb_core::{error::ConfigError, format::PixelFormat, surface::PixelSink};

use crate::{yuv::yuv_to_rgb, FrameDecoder};

pub mod monochrome;

/// Plane geometry of a planar 4:2:0 frame: a full resolution luma plane
/// followed by quarter size U and V planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    pub width: usize,
    pub height: usize,
}

impl PlaneLayout {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimensions { width, height });
        }

        if width % 2 != 0 || height % 2 != 0 {
            return Err(ConfigError::OddDimensions { width, height });
        }

        Ok(Self { width, height })
    }

    pub fn luma_size(&self) -> usize {
        self.width * self.height
    }

    pub fn chroma_size(&self) -> usize {
        self.luma_size() / 4
    }

    pub fn u_offset(&self) -> usize {
        self.luma_size()
    }

    pub fn v_offset(&self) -> usize {
        self.luma_size() + self.chroma_size()
    }

    pub fn frame_size(&self) -> usize {
        PixelFormat::Yuv420p.frame_size(self.width, self.height)
    }

    #[inline]
    pub fn chroma_index(&self, x: usize, y: usize) -> usize {
        (y / 2) * (self.width / 2) + x / 2
    }
}

pub struct YUV420PDecoder {
    layout: PlaneLayout,
}

impl YUV420PDecoder {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: PlaneLayout::new(width, height)?,
        })
    }
}

impl<S: PixelSink> FrameDecoder<S> for YUV420PDecoder {
    fn decode(&self, frame: &[u8], sink: &mut S) {
        let layout = &self.layout;
        debug_assert!(frame.len() >= layout.frame_size());

        let channel_layout = sink.descriptor().channel_layout;

        let y_plane = &frame[..layout.luma_size()];
        let u_plane = &frame[layout.u_offset()..layout.v_offset()];
        let v_plane = &frame[layout.v_offset()..layout.frame_size()];

        for j in 0..layout.height {
            let y_row = &y_plane[j * layout.width..(j + 1) * layout.width];

            for (i, luma) in y_row.iter().enumerate() {
                let chroma_index = layout.chroma_index(i, j);
                // The converter's red term takes Cr and its blue term Cb.
                let (r, g, b) = yuv_to_rgb(*luma, v_plane[chroma_index], u_plane[chroma_index]);

                sink.put_pixel(i, j, channel_layout.pack(r, g, b));
            }
        }
    }
}
