//! Remote speech generation seam.

use std::time::Duration;

use async_trait::async_trait;
use lector_gemini::{Client, SpeechRequest};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variables consulted for the API key, in order.
pub const DEFAULT_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// A remote text-to-speech generator.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Requests speech for `text` spoken by provider voice `voice_id`.
    ///
    /// Returns the base64 audio payload, or `None` when the provider answered
    /// without one.
    async fn generate(&self, text: &str, voice_id: &str) -> Result<Option<String>>;
}

/// Where the API key comes from.
///
/// The key is resolved each time a request is made, so a missing key is
/// reported by the call that needs it rather than at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    key: Option<String>,
    env_vars: Vec<String>,
}

impl Credentials {
    /// Reads the key from [`DEFAULT_KEY_VARS`].
    pub fn from_env() -> Self {
        Self {
            key: None,
            env_vars: DEFAULT_KEY_VARS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Uses `key`, falling back to [`DEFAULT_KEY_VARS`] when it is empty.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::from_env()
        }
    }

    /// Replaces the environment variables consulted after the explicit key.
    pub fn env_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env_vars = vars.into_iter().map(Into::into).collect();
        self
    }

    /// Resolves the key from the process environment.
    pub fn resolve(&self) -> Result<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves the key using `lookup` for environment variables.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        for name in &self.env_vars {
            if let Some(key) = lookup(name).map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
                debug!(var = %name, "narrator: api key from environment");
                return Ok(key);
            }
        }
        Err(Error::Configuration(format!(
            "API key is not configured; set one of {}",
            self.env_vars.join(", ")
        )))
    }
}

/// [`SpeechProvider`] backed by the Gemini API.
///
/// A fresh client is built for every request from the credentials as they
/// are at that moment.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    credentials: Credentials,
    model: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiProvider {
    /// Creates a provider for the default model and endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            model: lector_gemini::MODEL_FLASH_TTS.to_string(),
            base_url: None,
            timeout: None,
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets a custom API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the model.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> Result<Client> {
        let mut builder = Client::builder(self.credentials.resolve()?);
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl SpeechProvider for GeminiProvider {
    async fn generate(&self, text: &str, voice_id: &str) -> Result<Option<String>> {
        let client = self.client()?;
        let request = SpeechRequest::new(text, voice_id).with_model(self.model.clone());
        let response = client.speech().synthesize(&request).await?;
        if response.audio.is_none() {
            debug!(finish_reason = ?response.finish_reason, "narrator: response carried no audio");
        }
        Ok(response.audio.map(|a| a.data))
    }
}
