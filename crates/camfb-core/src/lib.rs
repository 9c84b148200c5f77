//! camfb core: the configuration model, the pixel sink abstraction shared by decoders and surfaces,
//! and the synchronous frame processing loop every camfb pipeline is built on.

pub mod config;
pub mod error;
pub mod format;
pub mod surface;

pub mod pipeline;
pub mod processors;

pub mod traits;
pub mod types;

pub use bytes::BytesMut;
