use crate::traits::FrameProcessor;

pub struct Sequential<F> {
    processors: Vec<Box<dyn FrameProcessor<F>>>,
}

impl<F> Sequential<F> {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    pub fn append<T: 'static + FrameProcessor<F>>(mut self, processor: T) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl<F> Default for Sequential<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FrameProcessor<F> for Sequential<F> {
    fn process(&mut self, frame_data: F) -> Option<F> {
        let mut result: Option<F> = Some(frame_data);

        for processor in &mut self.processors {
            result = processor.process(result?);
        }

        result
    }
}
