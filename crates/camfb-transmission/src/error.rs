use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeeError {
    #[error("sink closed")]
    Closed,

    #[error("sink stalled after {attempts} attempts: {source}")]
    Stalled { attempts: u32, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}
