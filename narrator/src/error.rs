//! Error types for synthesis orchestration.

use lector_audio::PlaybackError;
use thiserror::Error;

/// Result type alias for narrator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for a synthesis call.
///
/// Any of these fails the whole call; nothing is retried and a decoded but
/// unplayed buffer is discarded.
#[derive(Error, Debug)]
pub enum Error {
    /// A required setting (the API key) is missing. No call was attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider call failed.
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    /// The provider answered without an audio payload.
    #[error("synthesis failed: no audio data received from provider")]
    MissingAudioData,

    /// The audio payload is not valid base64.
    #[error("invalid audio encoding: {0}")]
    InvalidEncoding(String),

    /// The host audio output failed.
    #[error("playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl Error {
    /// Returns true if the provider call failed or returned no audio.
    pub fn is_synthesis_failure(&self) -> bool {
        matches!(self, Error::SynthesisFailed(_) | Error::MissingAudioData)
    }
}

impl From<lector_audio::Error> for Error {
    fn from(err: lector_audio::Error) -> Self {
        match err {
            lector_audio::Error::InvalidEncoding(e) => Error::InvalidEncoding(e.to_string()),
            lector_audio::Error::Playback(e) => Error::Playback(e),
        }
    }
}

impl From<lector_gemini::Error> for Error {
    fn from(err: lector_gemini::Error) -> Self {
        match err {
            lector_gemini::Error::Config(msg) => Error::Configuration(msg),
            other => Error::SynthesisFailed(other.to_string()),
        }
    }
}
