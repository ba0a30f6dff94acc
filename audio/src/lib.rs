//! Audio decoding and playback for lector.
//!
//! This crate provides:
//!
//! - `pcm`: PCM format description and 16-bit PCM decoding into
//!   normalized per-channel float buffers
//! - `payload`: base64 transport decoding for provider payloads
//! - `output`: the [`AudioOutput`] seam and its implementations
//! - `resampler`: sample rate conversion for devices that cannot run at the
//!   payload rate
//!
//! # Example
//!
//! ```rust
//! use lector_audio::{decode_base64, decode_pcm, Format};
//!
//! let bytes = decode_base64("AAD/fw==").unwrap();
//! let format = Format::MONO_24K;
//! let buffers = decode_pcm(&bytes, format.sample_rate, format.channels);
//!
//! assert_eq!(buffers.frames(), 2);
//! assert_eq!(buffers.channel(0)[0], 0.0);
//! ```

mod error;
pub mod output;
pub mod payload;
pub mod pcm;
pub mod resampler;

pub use error::{Error, PlaybackError, Result};
pub use output::{AudioOutput, ClockOutput, NullOutput};
#[cfg(feature = "device")]
pub use output::DevicePlayer;
pub use payload::{decode_base64, encode_base64};
pub use pcm::{ChannelBuffers, Format, decode_pcm, encode_pcm};
