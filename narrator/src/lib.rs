//! Text-to-speech request orchestration.
//!
//! This crate provides:
//! - [`Voice`]: user-facing voice labels and their provider aliases
//! - [`SpeechProvider`] and [`GeminiProvider`]: the remote generation seam
//! - [`ProgressTicker`]: the cosmetic progress indicator
//! - [`Narrator`]: one synthesis at a time, from text to finished playback
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lector_audio::DevicePlayer;
//! use lector_narrator::{Credentials, GeminiProvider, Narrator, Voice};
//!
//! let provider = GeminiProvider::new(Credentials::from_env());
//! let narrator = Narrator::new(Arc::new(provider), Arc::new(DevicePlayer::new()));
//!
//! let outcome = narrator.synthesize("Hello world", Voice::Mystery).await?;
//! ```

mod error;
mod narrator;
mod progress;
mod provider;
mod voice;

pub use error::{Error, Result};
pub use narrator::{Narrator, Outcome, SkipReason, State};
pub use progress::{ProgressConfig, ProgressTicker};
pub use provider::{Credentials, DEFAULT_KEY_VARS, GeminiProvider, SpeechProvider};
pub use voice::{ParseVoiceError, Voice};
