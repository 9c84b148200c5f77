pub mod error;
pub mod tee;

pub use tee::TeeSender;
