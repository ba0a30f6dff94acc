//! Host audio playback via cpal.
//!
//! Each call to [`DevicePlayer::play`] opens its own output stream on the
//! default device and closes it when the buffer has been consumed. cpal
//! streams are not `Send`, so the stream lives on a blocking worker thread
//! for its whole lifetime.

use std::sync::mpsc;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig, SupportedStreamConfig};
use tracing::{debug, error};

use super::AudioOutput;
use crate::error::PlaybackError;
use crate::pcm::ChannelBuffers;
use crate::resampler::resample;

/// Time left for the device to drain its last period before the stream is
/// dropped.
const DRAIN_GRACE: Duration = Duration::from_millis(80);

/// Plays audio on the host's default output device.
#[derive(Debug, Default, Clone, Copy)]
pub struct DevicePlayer;

impl DevicePlayer {
    /// Creates a new device player.
    ///
    /// No device is opened until [`AudioOutput::play`] is called.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioOutput for DevicePlayer {
    async fn play(&self, buffers: ChannelBuffers) -> Result<(), PlaybackError> {
        if buffers.is_empty() {
            return Ok(());
        }
        tokio::task::spawn_blocking(move || play_blocking(buffers))
            .await
            .map_err(|e| PlaybackError::Worker(e.to_string()))?
    }
}

/// Signal sent from the stream callbacks to the waiting worker.
enum StreamEvent {
    Finished,
    Failed(String),
}

fn play_blocking(buffers: ChannelBuffers) -> Result<(), PlaybackError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(PlaybackError::NoDevice)?;
    debug!(
        device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
        "playback: using output device"
    );

    let supported = pick_config(&device, buffers.sample_rate())?;
    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.into();

    let buffers = if config.sample_rate.0 != buffers.sample_rate() {
        debug!(
            from = buffers.sample_rate(),
            to = config.sample_rate.0,
            "playback: resampling for device"
        );
        resample(&buffers, config.sample_rate.0)?
    } else {
        buffers
    };
    let samples = interleave_for_device(&buffers, config.channels as usize);

    let (tx, rx) = mpsc::channel();
    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, samples, tx)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, samples, tx)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, samples, tx)?,
        other => return Err(PlaybackError::UnsupportedFormat(format!("{:?}", other))),
    };

    stream.play().map_err(|e| PlaybackError::Stream(e.to_string()))?;

    let result = match rx.recv() {
        Ok(StreamEvent::Finished) => {
            std::thread::sleep(DRAIN_GRACE);
            Ok(())
        }
        Ok(StreamEvent::Failed(msg)) => Err(PlaybackError::Stream(msg)),
        Err(_) => Err(PlaybackError::Stream("stream closed before playback finished".to_string())),
    };
    drop(stream);
    result
}

/// Prefers a device configuration running at `sample_rate`; otherwise falls
/// back to the device default.
fn pick_config(device: &Device, sample_rate: u32) -> Result<SupportedStreamConfig, PlaybackError> {
    let wanted = cpal::SampleRate(sample_rate);
    if let Ok(mut ranges) = device.supported_output_configs() {
        let native = ranges.find(|r| {
            r.min_sample_rate() <= wanted
                && wanted <= r.max_sample_rate()
                && matches!(r.sample_format(), SampleFormat::F32 | SampleFormat::I16)
        });
        if let Some(range) = native {
            return Ok(range.with_sample_rate(wanted));
        }
    }
    device
        .default_output_config()
        .map_err(|e| PlaybackError::Stream(e.to_string()))
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    samples: Vec<f32>,
    tx: mpsc::Sender<StreamEvent>,
) -> Result<Stream, PlaybackError>
where
    T: SizedSample + FromSample<f32> + Send + 'static,
{
    let err_tx = tx.clone();
    let mut data_tx = Some(tx);
    let mut pos = 0;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let n = data.len().min(samples.len() - pos);
                for (out, &sample) in data.iter_mut().zip(&samples[pos..pos + n]) {
                    *out = T::from_sample(sample);
                }
                for out in &mut data[n..] {
                    *out = T::EQUILIBRIUM;
                }
                pos += n;

                if pos == samples.len() {
                    if let Some(tx) = data_tx.take() {
                        let _ = tx.send(StreamEvent::Finished);
                    }
                }
            },
            move |err| {
                error!(error = %err, "playback: output stream error");
                let _ = err_tx.send(StreamEvent::Failed(err.to_string()));
            },
            None,
        )
        .map_err(|e| PlaybackError::Stream(e.to_string()))
}

/// Interleaves per-channel buffers into the device channel layout.
///
/// Mono is copied to every device channel; extra source channels beyond the
/// device's count are dropped.
fn interleave_for_device(buffers: &ChannelBuffers, device_channels: usize) -> Vec<f32> {
    let source_channels = buffers.channels();
    let mut out = Vec::with_capacity(buffers.frames() * device_channels);
    for i in 0..buffers.frames() {
        for ch in 0..device_channels {
            let src = ch.min(source_channels - 1);
            out.push(buffers.channel(src)[i]);
        }
    }
    out
}
