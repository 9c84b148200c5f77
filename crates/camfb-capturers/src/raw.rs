use std::io::{ErrorKind, Read};

use camfb_core::traits::{BorrowFrameBuffer, FrameProcessor};
use log::{debug, info, warn};

/// Reads headerless, fixed-size frames from a byte stream.
///
/// A frame is handed on only once all of its bytes have arrived; short reads
/// are accumulated. A read returning zero bytes or failing before the frame
/// is complete ends the stream, and the incomplete tail is discarded.
pub struct RawFrameCapturer<R> {
    stream: R,
    frame_size: usize,

    captured_frames: u64,
}

impl<R: Read> RawFrameCapturer<R> {
    pub fn new(stream: R, frame_size: usize) -> Self {
        Self {
            stream,
            frame_size,
            captured_frames: 0,
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn captured_frames(&self) -> u64 {
        self.captured_frames
    }

    /// Fills `buffer` completely. Returns the number of bytes read when the
    /// stream ended first.
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), usize> {
        let mut total_read_bytes = 0;

        while total_read_bytes < buffer.len() {
            match self.stream.read(&mut buffer[total_read_bytes..]) {
                Ok(0) => {
                    info!("No more data to be read");
                    return Err(total_read_bytes);
                }
                Ok(read_bytes) => {
                    debug!("Received {} bytes", read_bytes);
                    total_read_bytes += read_bytes;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    info!("Input stream closed: {}", err);
                    return Err(total_read_bytes);
                }
            }
        }

        Ok(())
    }
}

impl<F, R> FrameProcessor<F> for RawFrameCapturer<R>
where
    F: BorrowFrameBuffer,
    R: Read,
{
    fn process(&mut self, mut frame_data: F) -> Option<F> {
        let buffer = frame_data.frame_buffer_mut();
        buffer.resize(self.frame_size, 0);

        if let Err(read_bytes) = self.fill(buffer) {
            if read_bytes > 0 {
                warn!(
                    "Discarding incomplete trailing frame ({} of {} bytes)",
                    read_bytes, self.frame_size
                );
            }
            return None;
        }

        self.captured_frames += 1;
        debug!("Captured frame {}", self.captured_frames);

        Some(frame_data)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use camfb_core::{
        traits::{BorrowFrameBuffer, FrameProcessor},
        types::FrameData,
    };
    use rand::Rng;

    use super::RawFrameCapturer;

    /// Hands out at most `chunk` bytes per read, interrupting every other call.
    struct TricklingReader {
        data: Vec<u8>,
        position: usize,
        chunk: usize,
        interrupt: bool,
    }

    impl TricklingReader {
        fn new(data: Vec<u8>, chunk: usize) -> Self {
            Self {
                data,
                position: 0,
                chunk,
                interrupt: false,
            }
        }
    }

    impl Read for TricklingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }

            let len = buf.len().min(self.chunk).min(self.data.len() - self.position);
            buf[..len].copy_from_slice(&self.data[self.position..self.position + len]);
            self.position += len;
            Ok(len)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn random_bytes(len: usize) -> Vec<u8> {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| rng.gen()).collect()
    }

    #[test]
    fn short_reads_are_accumulated_into_whole_frames() {
        let input = random_bytes(24 * 3);
        let mut capturer = RawFrameCapturer::new(TricklingReader::new(input.clone(), 5), 24);

        let mut frame_data = FrameData::default();
        for expected in input.chunks(24) {
            frame_data = capturer.process(frame_data).unwrap();
            assert_eq!(frame_data.frame_buffer(), expected);
        }

        assert!(capturer.process(frame_data).is_none());
        assert_eq!(capturer.captured_frames(), 3);
    }

    #[test]
    fn trailing_partial_frame_is_discarded() {
        let input = random_bytes(24 * 2 + 10);
        let mut capturer = RawFrameCapturer::new(&input[..], 24);

        let mut frame_data = FrameData::default();
        frame_data = capturer.process(frame_data).unwrap();
        frame_data = capturer.process(frame_data).unwrap();

        assert!(capturer.process(frame_data).is_none());
        assert_eq!(capturer.captured_frames(), 2);
    }

    #[test]
    fn read_error_ends_the_stream() {
        let mut capturer = RawFrameCapturer::new(FailingReader, 24);

        assert!(capturer.process(FrameData::default()).is_none());
        assert_eq!(capturer.captured_frames(), 0);
    }

    #[test]
    fn reused_buffer_is_fully_overwritten() {
        let mut input = vec![0xAA; 24];
        input.extend(vec![0x55; 24]);
        let mut capturer = RawFrameCapturer::new(&input[..], 24);

        let frame_data = capturer.process(FrameData::with_capacity(24)).unwrap();
        let frame_data = capturer.process(frame_data).unwrap();

        assert_eq!(frame_data.frame_buffer(), &[0x55; 24][..]);
    }
}
