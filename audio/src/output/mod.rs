//! Audio output seam.
//!
//! An [`AudioOutput`] takes a decoded buffer, plays it, and resolves once the
//! end of the buffer has been reached. There is no stop or skip: a playback
//! always runs to completion or fails.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PlaybackError;
use crate::pcm::ChannelBuffers;

#[cfg(feature = "device")]
mod device;

#[cfg(feature = "device")]
pub use device::DevicePlayer;

/// A sink that plays decoded audio.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Plays `buffers` and resolves exactly once, when playback completes.
    async fn play(&self, buffers: ChannelBuffers) -> Result<(), PlaybackError>;
}

/// Output that discards audio and completes immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

#[async_trait]
impl AudioOutput for NullOutput {
    async fn play(&self, _buffers: ChannelBuffers) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Output that spends the buffer's duration on the tokio clock without
/// producing sound.
///
/// Under a paused tokio runtime this acts as a fake audio clock: a 2 second
/// buffer resolves exactly when virtual time has advanced 2 seconds.
#[derive(Debug, Default)]
pub struct ClockOutput {
    played: Mutex<Vec<ChannelBuffers>>,
}

impl ClockOutput {
    /// Creates a new clock output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every buffer that finished playing, in order.
    pub fn played(&self) -> Vec<ChannelBuffers> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AudioOutput for ClockOutput {
    async fn play(&self, buffers: ChannelBuffers) -> Result<(), PlaybackError> {
        tokio::time::sleep(buffers.duration()).await;
        if let Ok(mut played) = self.played.lock() {
            played.push(buffers);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_null_output_completes() {
        let buffers = ChannelBuffers::new(24000, vec![vec![0.0; 24000]]);
        NullOutput.play(buffers).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_output_waits_for_duration() {
        let output = ClockOutput::new();
        let buffers = ChannelBuffers::new(24000, vec![vec![0.0; 12000]]);

        let start = Instant::now();
        output.play(buffers).await.unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(510), "{elapsed:?}");
        assert_eq!(output.played().len(), 1);
        assert_eq!(output.played()[0].frames(), 12000);
    }
}
