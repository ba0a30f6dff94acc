//! PCM audio format definitions.

use std::time::Duration;

/// Describes a signed 16-bit little-endian PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 24000, 48000).
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
}

impl Format {
    /// Bit depth of every supported format.
    pub const DEPTH: u32 = 16;

    /// Creates a format with the given sample rate and channel count.
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self { sample_rate, channels }
    }

    /// Creates a mono format with the given sample rate.
    pub const fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1)
    }

    /// Creates a stereo format with the given sample rate.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2)
    }

    /// Returns the number of bytes in one frame (one sample per channel).
    pub fn frame_bytes(&self) -> usize {
        2 * self.channels as usize
    }

    /// Returns the number of bytes per second.
    pub fn bytes_rate(&self) -> usize {
        self.frame_bytes() * self.sample_rate as usize
    }

    /// Returns the number of bytes needed for the given duration.
    pub fn bytes_in_duration(&self, duration: Duration) -> usize {
        let frames = duration.as_nanos() * self.sample_rate as u128 / 1_000_000_000;
        frames as usize * self.frame_bytes()
    }

    /// Returns the number of whole frames in `bytes`.
    ///
    /// A trailing partial frame is not counted.
    pub fn frames(&self, bytes: usize) -> usize {
        match self.frame_bytes() {
            0 => 0,
            n => bytes / n,
        }
    }

    /// Returns the playback duration of `bytes` of audio.
    pub fn duration(&self, bytes: usize) -> Duration {
        frames_duration(self.frames(bytes), self.sample_rate)
    }
}

// Common format presets
impl Format {
    /// 16kHz mono
    pub const MONO_16K: Format = Format::mono(16000);
    /// 24kHz mono, the provider's speech output format
    pub const MONO_24K: Format = Format::mono(24000);
    /// 48kHz mono
    pub const MONO_48K: Format = Format::mono(48000);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}

pub(crate) fn frames_duration(frames: usize, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    let nanos = frames as u128 * 1_000_000_000 / sample_rate as u128;
    Duration::from_nanos(nanos as u64)
}
