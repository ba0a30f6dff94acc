//! Gemini speech generation API SDK for Rust.
//!
//! This crate provides a client for the `generateContent` endpoint of the
//! Gemini API, restricted to what text-to-speech needs: a text prompt in, an
//! inline base64 audio part out.

mod client;
mod content;
mod error;
pub mod http;
mod models;
mod speech;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use content::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Modality, Part, PrebuiltVoiceConfig, SpeechConfig, UsageMetadata, VoiceConfig,
};
pub use error::{Error, Result};
pub use models::*;
pub use speech::{SpeechAudio, SpeechRequest, SpeechResponse, SpeechService};
