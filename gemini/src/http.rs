//! HTTP client implementation for the Gemini API.

use std::time::Duration;

use reqwest::{
    Client as ReqwestClient, Response,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use super::error::{Error, Result};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-goog-api-key");

/// HTTP client for the Gemini API.
///
/// Every request is attempted exactly once; failures are returned to the
/// caller as-is.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Sends a JSON POST request and decodes the JSON response.
    pub async fn post<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "gemini: POST");

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers()?)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| Error::Config(format!("invalid api key: {}", e)))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("lector-gemini-rust/1.0"));
        Ok(headers)
    }

    /// Handles the API response.
    async fn handle_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "gemini: response");

        if !status.is_success() {
            return Err(parse_error(&body, status.as_u16()));
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }
}

/// Error envelope returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Parses an error response body.
///
/// Bodies that are not a Gemini error envelope become an API error whose
/// message is the raw body text.
pub(crate) fn parse_error(body: &[u8], http_status: u16) -> Error {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        let code = if envelope.error.code == 0 {
            http_status as i32
        } else {
            envelope.error.code
        };
        return Error::api(code, envelope.error.status, envelope.error.message, http_status);
    }

    Error::api(
        http_status as i32,
        String::new(),
        String::from_utf8_lossy(body).to_string(),
        http_status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_envelope() {
        let body = br#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        match parse_error(body, 400) {
            Error::Api {
                code,
                status,
                message,
                http_status,
            } => {
                assert_eq!(code, 400);
                assert_eq!(status, "INVALID_ARGUMENT");
                assert_eq!(message, "API key not valid.");
                assert_eq!(http_status, 400);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_plain_body() {
        let err = parse_error(b"upstream connect error", 502);
        assert!(err.is_server_error());
        assert!(err.to_string().contains("upstream connect error"));
    }

    #[test]
    fn test_parse_error_missing_code() {
        let body = br#"{"error":{"message":"overloaded","status":"UNAVAILABLE"}}"#;
        assert!(matches!(parse_error(body, 503), Error::Api { code: 503, .. }));
    }
}
