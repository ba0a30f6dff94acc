//! Normalized per-channel sample buffers.

use std::time::Duration;

use tracing::debug;

use super::format::{Format, frames_duration};

/// Scale between a 16-bit sample and its normalized float value.
const I16_SCALE: f32 = 32768.0;

/// Decoded audio: one normalized `f32` sequence per channel.
///
/// Samples lie in `[-1.0, 1.0)`. All channels hold the same number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBuffers {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl ChannelBuffers {
    /// Creates buffers from per-channel sample vectors.
    ///
    /// Channels longer than the shortest one are truncated so that every
    /// channel has the same frame count.
    pub fn new(sample_rate: u32, mut channels: Vec<Vec<f32>>) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        for ch in &mut channels {
            ch.truncate(frames);
        }
        Self { sample_rate, channels }
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of channels.
    pub fn channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns the total number of samples across all channels.
    pub fn samples(&self) -> usize {
        self.frames() * self.channels()
    }

    /// Returns true if there is nothing to play.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Returns the samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.channels()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Returns all channels.
    pub fn as_channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Consumes the buffers and returns the channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Returns the PCM format these buffers were decoded from.
    pub fn format(&self) -> Format {
        Format::new(self.sample_rate, self.channels.len() as u16)
    }

    /// Returns the playback duration.
    pub fn duration(&self) -> Duration {
        frames_duration(self.frames(), self.sample_rate)
    }
}

/// Decodes interleaved signed 16-bit little-endian PCM into per-channel
/// normalized buffers.
///
/// Sample `i` of channel `c` is `data[i * channels + c] / 32768`. A trailing
/// partial frame is dropped. `channels == 0` yields empty buffers.
pub fn decode_pcm(data: &[u8], sample_rate: u32, channels: u16) -> ChannelBuffers {
    let format = Format::new(sample_rate, channels);
    let num_channels = channels as usize;
    if num_channels == 0 {
        return ChannelBuffers::new(sample_rate, Vec::new());
    }

    let frames = format.frames(data.len());
    let used = frames * format.frame_bytes();
    if used < data.len() {
        debug!(
            dropped = data.len() - used,
            channels, "pcm: dropping trailing partial frame"
        );
    }

    let mut out: Vec<Vec<f32>> = (0..num_channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in data[..used].chunks_exact(format.frame_bytes()) {
        for (ch, sample) in frame.chunks_exact(2).enumerate() {
            let value = i16::from_le_bytes([sample[0], sample[1]]);
            out[ch].push(value as f32 / I16_SCALE);
        }
    }

    ChannelBuffers { sample_rate, channels: out }
}

/// Encodes buffers back to interleaved signed 16-bit little-endian PCM.
///
/// Samples are scaled by 32768, rounded, and clamped to the `i16` range.
pub fn encode_pcm(buffers: &ChannelBuffers) -> Vec<u8> {
    let mut data = Vec::with_capacity(buffers.samples() * 2);
    for i in 0..buffers.frames() {
        for ch in buffers.as_channels() {
            let value = (ch[i] * I16_SCALE).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            data.extend_from_slice(&value.to_le_bytes());
        }
    }
    data
}
