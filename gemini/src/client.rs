//! Gemini API client.

use std::sync::Arc;
use std::time::Duration;

use super::{
    error::{Error, Result},
    http::HttpClient,
    speech::SpeechService,
};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default transport timeout for a single request.
///
/// A request that outlives it fails like any other transport error, which
/// the narrator reports as a synthesis failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Gemini API client.
///
/// # Example
///
/// ```rust,no_run
/// use lector_gemini::{Client, SpeechRequest};
///
/// # async fn run() -> lector_gemini::Result<()> {
/// let client = Client::new("your-api-key")?;
/// let request = SpeechRequest::new("Hello world", "Kore");
/// let response = client.speech().synthesize(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    config: ClientConfig,
}

#[derive(Clone)]
struct ClientConfig {
    api_key: String,
    base_url: String,
}

impl Client {
    /// Creates a new client with the default base URL.
    ///
    /// Fails with [`Error::Config`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the configured API key.
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the speech synthesis service.
    pub fn speech(&self) -> SpeechService {
        SpeechService::new(self.http.clone())
    }

    /// Returns a reference to the internal HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

/// Builder for creating a Gemini API client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom base URL for the API.
    ///
    /// A trailing slash is ignored.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the transport timeout for a single request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("base_url must be non-empty".to_string()));
        }

        let http = HttpClient::new(base_url.clone(), self.api_key.clone(), self.timeout)?;

        Ok(Client {
            http: Arc::new(http),
            config: ClientConfig {
                api_key: self.api_key,
                base_url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let client = Client::new("test-key").unwrap();
        assert_eq!(client.api_key(), "test-key");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_build_custom_base_url() {
        let client = Client::builder("test-key")
            .base_url("http://127.0.0.1:8080/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(Client::new(""), Err(Error::Config(_))));
        assert!(matches!(Client::new("   "), Err(Error::Config(_))));
    }
}
