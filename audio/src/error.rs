//! Error types for audio decoding and playback.

use thiserror::Error;

/// Result type alias for audio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for audio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The transport encoding of a payload is malformed.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The host audio output failed.
    #[error("playback error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Error raised by an [`AudioOutput`](crate::AudioOutput).
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The host has no default output device.
    #[error("no output device available")]
    NoDevice,

    /// The device only offers a sample format we cannot write.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The output stream could not be built, started, or failed while running.
    #[error("stream error: {0}")]
    Stream(String),

    /// Sample rate conversion failed.
    #[error("resample error: {0}")]
    Resample(String),

    /// The blocking playback worker panicked or was cancelled.
    #[error("playback worker failed: {0}")]
    Worker(String),
}
