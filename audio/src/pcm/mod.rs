//! PCM (Pulse Code Modulation) audio handling.
//!
//! Provider audio arrives as signed 16-bit little-endian samples, interleaved
//! by channel. This module describes that format and converts it to and from
//! normalized per-channel float buffers.
//!
//! # Key Types
//!
//! - [`Format`]: sample rate and channel count of a 16-bit PCM stream
//! - [`ChannelBuffers`]: one normalized `f32` sequence per channel
//!
//! # Example
//!
//! ```rust
//! use lector_audio::pcm::{decode_pcm, Format};
//! use std::time::Duration;
//!
//! let format = Format::MONO_24K;
//! let bytes = vec![0u8; format.bytes_in_duration(Duration::from_millis(100))];
//! let buffers = decode_pcm(&bytes, format.sample_rate, format.channels);
//! assert_eq!(buffers.frames(), 2400);
//! ```

mod buffer;
mod format;

pub use buffer::{ChannelBuffers, decode_pcm, encode_pcm};
pub use format::Format;
