use std::ops::{Deref, DerefMut};

use camfb_codecs::FrameDecoder;
use camfb_core::traits::{BorrowFrameBuffer, FrameProcessor};
use log::debug;

use crate::surface::Surface;

/// Decodes each frame straight into the display surface.
pub struct SurfaceRenderer<M> {
    surface: Surface<M>,
    decoder: Box<dyn FrameDecoder<Surface<M>>>,

    rendered_frames: u64,
}

impl<M> SurfaceRenderer<M>
where
    M: Deref<Target = [u8]> + DerefMut,
{
    pub fn new(surface: Surface<M>, decoder: Box<dyn FrameDecoder<Surface<M>>>) -> Self {
        Self {
            surface,
            decoder,
            rendered_frames: 0,
        }
    }

    pub fn surface(&self) -> &Surface<M> {
        &self.surface
    }

    pub fn rendered_frames(&self) -> u64 {
        self.rendered_frames
    }
}

impl<F, M> FrameProcessor<F> for SurfaceRenderer<M>
where
    F: BorrowFrameBuffer,
    M: Deref<Target = [u8]> + DerefMut,
{
    fn process(&mut self, frame_data: F) -> Option<F> {
        self.decoder.decode(frame_data.frame_buffer(), &mut self.surface);
        self.rendered_frames += 1;

        debug!("Rendered frame {}", self.rendered_frames);

        Some(frame_data)
    }
}
