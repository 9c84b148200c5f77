use bytes::BytesMut;

/// A step of a frame pipeline. Returning `None` stops the frame from reaching
/// the following processors.
pub trait FrameProcessor<F> {
    fn process(&mut self, frame_data: F) -> Option<F>;
}

pub trait BorrowFrameBuffer {
    fn frame_buffer(&self) -> &[u8];
    fn frame_buffer_mut(&mut self) -> &mut BytesMut;
}
