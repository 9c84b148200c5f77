use std::io::{ErrorKind, Write};

use camfb_core::traits::{BorrowFrameBuffer, FrameProcessor};
use log::{debug, info, warn};

use crate::error::TeeError;

const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Forwards every raw frame verbatim to a secondary sink, ahead of decoding.
///
/// Teeing is abandoned for the rest of the run once the sink is closed or
/// keeps refusing bytes; frames keep flowing down the pipeline either way.
pub struct TeeSender<W: Write> {
    sink: W,
    active: bool,

    max_attempts: u32,

    forwarded_bytes: u64,
}

impl<W: Write> TeeSender<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            active: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            forwarded_bytes: 0,
        }
    }

    /// Consecutive `WouldBlock` writes tolerated before giving up.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn forwarded_bytes(&self) -> u64 {
        self.forwarded_bytes
    }

    fn forward(&mut self, buffer: &[u8]) -> Result<(), TeeError> {
        let mut written_bytes = 0;
        let mut blocked_attempts = 0;

        while written_bytes < buffer.len() {
            match self.sink.write(&buffer[written_bytes..]) {
                Ok(0) => return Err(TeeError::Closed),
                Ok(count) => {
                    written_bytes += count;
                    self.forwarded_bytes += count as u64;
                    blocked_attempts = 0;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    blocked_attempts += 1;
                    if blocked_attempts >= self.max_attempts {
                        return Err(TeeError::Stalled {
                            attempts: blocked_attempts,
                            source: err,
                        });
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(self.sink.flush()?)
    }
}

impl<F, W> FrameProcessor<F> for TeeSender<W>
where
    F: BorrowFrameBuffer,
    W: Write,
{
    fn process(&mut self, frame_data: F) -> Option<F> {
        if !self.active {
            return Some(frame_data);
        }

        match self.forward(frame_data.frame_buffer()) {
            Ok(()) => debug!("Forwarded {} bytes", frame_data.frame_buffer().len()),
            Err(reason) => {
                warn!("Secondary sink unusable, teeing disabled: {}", reason);
                info!("Forwarded {} bytes before the sink failed", self.forwarded_bytes);
                self.active = false;
            }
        }

        Some(frame_data)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use camfb_core::{
        traits::{BorrowFrameBuffer, FrameProcessor},
        types::FrameData,
    };

    use super::TeeSender;

    fn frame(bytes: &[u8]) -> FrameData {
        let mut frame_data = FrameData::default();
        frame_data.frame_buffer_mut().extend_from_slice(bytes);
        frame_data
    }

    /// Accepts `chunk` bytes per write, failing with `WouldBlock` in between.
    struct StutteringSink {
        written: Vec<u8>,
        chunk: usize,
        block_next: bool,
    }

    impl Write for StutteringSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.block_next = !self.block_next;
            if !self.block_next {
                return Err(io::Error::from(io::ErrorKind::WouldBlock));
            }

            let len = buf.len().min(self.chunk);
            self.written.extend_from_slice(&buf[..len]);
            Ok(len)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Interrupted by a signal `remaining` times before accepting anything.
    struct SignalledSink {
        written: Vec<u8>,
        remaining: u32,
    }

    impl Write for SignalledSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining > 0 {
                self.remaining -= 1;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }

            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BlockedSink;

    impl Write for BlockedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::WouldBlock))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn frames_are_forwarded_verbatim() {
        let mut tee = TeeSender::new(Vec::new());

        let first = tee.process(frame(&[1, 2, 3, 4])).unwrap();
        let second = tee.process(frame(&[5, 6])).unwrap();

        assert_eq!(first.frame_buffer(), &[1, 2, 3, 4]);
        assert_eq!(second.frame_buffer(), &[5, 6]);
        assert_eq!(tee.sink, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(tee.forwarded_bytes(), 6);
    }

    #[test]
    fn short_writes_are_resumed() {
        let sink = StutteringSink {
            written: Vec::new(),
            chunk: 3,
            block_next: false,
        };
        let mut tee = TeeSender::new(sink);
        let payload: Vec<u8> = (0..=255).collect();

        tee.process(frame(&payload)).unwrap();

        assert!(tee.is_active());
        assert_eq!(tee.sink.written, payload);
    }

    #[test]
    fn closed_sink_disables_teeing_but_keeps_frames_flowing() {
        let mut tee = TeeSender::new(ClosedSink);

        for _ in 0..3 {
            let frame_data = tee.process(frame(&[9; 16]));
            assert_eq!(frame_data.unwrap().frame_buffer(), &[9; 16]);
        }

        assert!(!tee.is_active());
        assert_eq!(tee.forwarded_bytes(), 0);
    }

    #[test]
    fn retries_are_bounded() {
        let mut tee = TeeSender::new(BlockedSink).max_attempts(4);

        assert!(tee.process(frame(&[0; 8])).is_some());
        assert!(!tee.is_active());
    }

    #[test]
    fn interrupted_writes_never_disable_teeing() {
        let sink = SignalledSink {
            written: Vec::new(),
            remaining: 20,
        };
        let mut tee = TeeSender::new(sink).max_attempts(4);

        tee.process(frame(&[7; 32])).unwrap();

        assert!(tee.is_active());
        assert_eq!(tee.forwarded_bytes(), 32);
        assert_eq!(tee.sink.written, vec![7; 32]);
    }
}
