use std::fmt::Debug;

use log::{debug, info};

use crate::{processors::sequential::Sequential, traits::FrameProcessor};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Frames the source delivered in full.
    pub frames: u64,
    /// Frames a processor of the chain refused to forward.
    pub dropped_frames: u64,
}

/// Drives one frame at a time from `source` through the linked processors.
///
/// The source fills the frame and returns `None` once the input is over, which
/// ends the loop. Each frame is processed by the whole chain before the source
/// is asked for the next one, so the frame's buffers are never refilled while
/// still in use. Reads are blocking: a stalled input stalls the loop.
pub struct StreamingLoop<F> {
    source: Box<dyn FrameProcessor<F>>,
    chain: Sequential<F>,

    seed: Option<F>,

    tag: String,
}

impl<F: Debug + Default + 'static> StreamingLoop<F> {
    pub fn new<T: 'static + FrameProcessor<F>>(source: T) -> Self {
        Self {
            source: Box::new(source),
            chain: Sequential::new(),
            seed: None,
            tag: "".to_string(),
        }
    }

    pub fn link<T: 'static + FrameProcessor<F>>(mut self, processor: T) -> Self {
        self.chain = self.chain.append(processor);
        self
    }

    /// Frame handed to the source on the first iteration, e.g. one with a
    /// preallocated buffer.
    pub fn seed(mut self, frame_data: F) -> Self {
        self.seed = Some(frame_data);
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn run(mut self) -> RunStats {
        info!("[{}] Streaming through {} processors...", self.tag, self.chain.len());

        let mut stats = RunStats::default();
        let mut frame_data = self.seed.take().unwrap_or_default();

        loop {
            frame_data = match self.source.process(frame_data) {
                Some(frame_data) => frame_data,
                None => {
                    info!("[{}] Input exhausted after {} frames", self.tag, stats.frames);
                    break;
                }
            };

            stats.frames += 1;

            frame_data = match self.chain.process(frame_data) {
                Some(frame_data) => frame_data,
                None => {
                    debug!("[{}] Frame {} dropped", self.tag, stats.frames);
                    stats.dropped_frames += 1;
                    F::default()
                }
            };
        }

        stats
    }
}
