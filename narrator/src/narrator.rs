//! The synthesis orchestrator.

use std::sync::Arc;
use std::time::Duration;

use lector_audio::{AudioOutput, Format, decode_base64, decode_pcm};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::progress::{ProgressConfig, ProgressTicker};
use crate::provider::SpeechProvider;
use crate::voice::Voice;

/// Whether a synthesis is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Ready to accept a synthesis.
    #[default]
    Idle,
    /// A synthesis is between its provider call and the end of playback.
    InFlight,
}

/// Why a call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The text was empty after trimming.
    EmptyText,
    /// Another synthesis was in flight.
    Busy,
}

/// Result of a successful [`Narrator::synthesize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The audio was decoded and played to the end.
    Played {
        /// Frames per channel that were played.
        frames: usize,
        /// Playback duration.
        duration: Duration,
    },
    /// The call was ignored; no request was made.
    Skipped(SkipReason),
}

/// Runs one text-to-speech synthesis at a time: provider call, decode,
/// playback.
///
/// A call made while another is in flight is ignored and returns
/// [`Outcome::Skipped`] with [`SkipReason::Busy`]; it is neither queued nor
/// an error.
pub struct Narrator {
    provider: Arc<dyn SpeechProvider>,
    output: Arc<dyn AudioOutput>,
    format: Format,
    progress_config: ProgressConfig,
    state: Mutex<State>,
    progress: Arc<watch::Sender<u8>>,
}

impl Narrator {
    /// Creates a narrator expecting 24kHz mono PCM from the provider.
    pub fn new(provider: Arc<dyn SpeechProvider>, output: Arc<dyn AudioOutput>) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            provider,
            output,
            format: Format::new(lector_gemini::SPEECH_SAMPLE_RATE, lector_gemini::SPEECH_CHANNELS),
            progress_config: ProgressConfig::default(),
            state: Mutex::new(State::Idle),
            progress: Arc::new(progress),
        }
    }

    /// Sets the PCM format the provider's payload is decoded as.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets the progress indicator timing.
    pub fn with_progress_config(mut self, config: ProgressConfig) -> Self {
        self.progress_config = config;
        self
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        *self.state.lock()
    }

    /// Subscribes to the progress percentage (0..=100).
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Speaks `text` with `voice` and resolves when playback has finished.
    ///
    /// The voice is resolved through the alias table, a single provider
    /// request is made, the first audio payload is decoded, and the decoded
    /// buffer is played to the end. Progress steps while the request is
    /// pending, is set to 100 just before playback, and returns to 0 when the
    /// call ends. Dropping the returned future releases the in-flight slot
    /// and stops the progress timer.
    pub async fn synthesize(&self, text: &str, voice: Voice) -> Result<Outcome> {
        if text.trim().is_empty() {
            debug!("narrator: empty text, nothing to synthesize");
            return Ok(Outcome::Skipped(SkipReason::EmptyText));
        }
        let Some(_flight) = self.begin() else {
            debug!("narrator: synthesis already in flight, ignoring");
            return Ok(Outcome::Skipped(SkipReason::Busy));
        };

        let ticker = ProgressTicker::start(self.progress.clone(), self.progress_config);
        let voice_id = voice.provider_id();
        info!(
            voice = %voice,
            voice_id,
            chars = text.chars().count(),
            "narrator: requesting speech"
        );

        let payload = self
            .provider
            .generate(text, voice_id)
            .await?
            .ok_or(Error::MissingAudioData)?;
        let bytes = decode_base64(&payload)?;
        let buffers = decode_pcm(&bytes, self.format.sample_rate, self.format.channels);
        let frames = buffers.frames();
        let duration = buffers.duration();
        debug!(bytes = bytes.len(), frames, ?duration, "narrator: decoded audio");
        if buffers.is_empty() {
            warn!(bytes = bytes.len(), "narrator: audio payload decoded to no frames");
        }

        ticker.finish();
        self.output.play(buffers).await?;

        info!(?duration, "narrator: playback finished");
        Ok(Outcome::Played { frames, duration })
    }

    /// Moves `Idle` to `InFlight`, or returns `None` if already in flight.
    fn begin(&self) -> Option<Flight<'_>> {
        let mut state = self.state.lock();
        match *state {
            State::InFlight => None,
            State::Idle => {
                *state = State::InFlight;
                Some(Flight { narrator: self })
            }
        }
    }
}

/// Holds the in-flight slot; returns the narrator to `Idle` on every exit.
struct Flight<'a> {
    narrator: &'a Narrator,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        *self.narrator.state.lock() = State::Idle;
        self.narrator.progress.send_replace(0);
    }
}
