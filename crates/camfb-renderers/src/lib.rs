pub mod error;
pub mod fbdev;
pub mod renderer;
pub mod surface;

pub use renderer::SurfaceRenderer;
pub use surface::Surface;
