//! camfb renders a raw YUV420P byte stream straight into a Linux framebuffer,
//! optionally forwarding the untouched stream to a downstream consumer.

pub use camfb_core::*;

#[cfg(feature = "codecs")]
pub mod codecs {
    pub use camfb_codecs::*;
}

#[cfg(feature = "capture")]
pub mod capture {
    pub use camfb_capturers::*;
}

#[cfg(feature = "transmission")]
pub mod transmission {
    pub use camfb_transmission::*;
}

#[cfg(feature = "render")]
pub mod render {
    pub use camfb_renderers::*;
}
