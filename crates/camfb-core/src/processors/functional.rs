use crate::traits::FrameProcessor;

pub struct Function<F> {
    function: Box<dyn FnMut(F) -> Option<F>>,
}

impl<F> Function<F> {
    pub fn new(function: impl FnMut(F) -> Option<F> + 'static) -> Self {
        Self {
            function: Box::new(function),
        }
    }
}

impl<F> FrameProcessor<F> for Function<F> {
    fn process(&mut self, frame_data: F) -> Option<F> {
        (self.function)(frame_data)
    }
}
