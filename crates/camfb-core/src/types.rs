use std::fmt::Display;

use bytes::BytesMut;

use crate::traits::BorrowFrameBuffer;

/// One raw input frame travelling through the pipeline. The buffer is kept
/// across iterations and overwritten in full by the capturer.
#[derive(Default, Debug)]
pub struct FrameData {
    raw_frame_buffer: BytesMut,
}

impl FrameData {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw_frame_buffer: BytesMut::with_capacity(capacity),
        }
    }
}

impl BorrowFrameBuffer for FrameData {
    fn frame_buffer(&self) -> &[u8] {
        &self.raw_frame_buffer
    }

    fn frame_buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.raw_frame_buffer
    }
}

impl Display for FrameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ Raw frame buffer: {} bytes }}", self.raw_frame_buffer.len())
    }
}
