//! Error types for the Gemini API client.

use thiserror::Error;

/// Result type alias for Gemini operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Gemini API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by Gemini.
    #[error("gemini: {message} (code={code}, status={status})")]
    Api {
        code: i32,
        status: String,
        message: String,
        http_status: u16,
    },

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(
        code: i32,
        status: impl Into<String>,
        message: impl Into<String>,
        http_status: u16,
    ) -> Self {
        Error::Api {
            code,
            status: status.into(),
            message: message.into(),
            http_status,
        }
    }

    /// Returns the HTTP status of an API error.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Api { http_status, .. } => Some(*http_status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this is a rate limit or quota error.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Error::Api {
                status,
                http_status,
                ..
            } => status == "RESOURCE_EXHAUSTED" || *http_status == 429,
            _ => false,
        }
    }

    /// Returns true if the API key was rejected.
    pub fn is_invalid_api_key(&self) -> bool {
        match self {
            Error::Api {
                status,
                http_status,
                message,
                ..
            } => {
                status == "UNAUTHENTICATED"
                    || *http_status == 401
                    || (*http_status == 400 && message.contains("API key"))
            }
            _ => false,
        }
    }

    /// Returns true if the request itself was invalid.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::Api { status, .. } if status == "INVALID_ARGUMENT")
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { http_status, .. } if *http_status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = Error::api(400, "INVALID_ARGUMENT", "bad voice", 400);
        assert_eq!(err.to_string(), "gemini: bad voice (code=400, status=INVALID_ARGUMENT)");
        assert!(err.is_invalid_request());
        assert!(!err.is_server_error());
        assert_eq!(err.http_status(), Some(400));
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::api(429, "RESOURCE_EXHAUSTED", "quota", 429).is_rate_limit());
        assert!(Error::api(401, "UNAUTHENTICATED", "no", 401).is_invalid_api_key());
        assert!(Error::api(400, "INVALID_ARGUMENT", "API key not valid", 400).is_invalid_api_key());
        assert!(Error::api(503, "UNAVAILABLE", "overloaded", 503).is_server_error());
        assert!(!Error::Config("x".into()).is_rate_limit());
        assert_eq!(Error::Other("x".into()).http_status(), None);
    }
}
