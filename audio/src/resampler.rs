//! Rubato-based sample rate conversion.
//!
//! Output devices often refuse to open at the provider's 24kHz rate. This
//! module converts a whole decoded buffer to the rate the device settled on.

use rubato::{FftFixedIn, Resampler};

use crate::error::PlaybackError;
use crate::pcm::ChannelBuffers;

/// Frames fed to the resampler per processing block.
const CHUNK_SIZE: usize = 1024;

/// Resamples `buffers` to `target_rate`.
///
/// Returns the input unchanged when the rates already match. The output frame
/// count is `frames * target_rate / source_rate`, rounded to nearest.
pub fn resample(buffers: &ChannelBuffers, target_rate: u32) -> Result<ChannelBuffers, PlaybackError> {
    let source_rate = buffers.sample_rate();
    if source_rate == target_rate || buffers.is_empty() {
        return Ok(ChannelBuffers::new(target_rate, buffers.as_channels().to_vec()));
    }
    if source_rate == 0 || target_rate == 0 {
        return Err(PlaybackError::Resample(format!(
            "cannot resample {} Hz to {} Hz",
            source_rate, target_rate
        )));
    }

    let num_channels = buffers.channels();
    let frames = buffers.frames();
    let expected = ((frames as u64 * target_rate as u64 + source_rate as u64 / 2) / source_rate as u64) as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        CHUNK_SIZE,
        2,
        num_channels,
    )
    .map_err(|e| PlaybackError::Resample(e.to_string()))?;

    let mut output: Vec<Vec<f32>> = (0..num_channels).map(|_| Vec::with_capacity(expected)).collect();
    let mut input: Vec<Vec<f32>> = vec![Vec::new(); num_channels];
    let mut pos = 0;

    // Keep feeding (zero padding past the end) until the resampler's delay
    // has been flushed and the expected frame count is produced.
    while output[0].len() < expected {
        let needed = resampler.input_frames_next();
        let end = (pos + needed).min(frames);
        for (ch, buf) in input.iter_mut().enumerate() {
            buf.clear();
            if pos < end {
                buf.extend_from_slice(&buffers.channel(ch)[pos..end]);
            }
            buf.resize(needed, 0.0);
        }

        let chunk = resampler
            .process(&input, None)
            .map_err(|e| PlaybackError::Resample(e.to_string()))?;
        for (out, data) in output.iter_mut().zip(chunk) {
            out.extend(data);
        }
        pos = end;
    }

    for out in &mut output {
        out.truncate(expected);
    }
    Ok(ChannelBuffers::new(target_rate, output))
}
