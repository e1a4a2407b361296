use std::io;
use thiserror::Error;

/// Failures that may happen while reading a message entity.
///
/// None of these ever escapes the snapshot api: the buffering layer reports them
/// through `tracing` and treats the message as bodiless.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("entity has already been consumed")]
    Consumed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl CaptureError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
