use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the audio engine.
///
/// Nothing retries these; they surface from whichever transport operation
/// triggered them.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no usable audio output device: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
