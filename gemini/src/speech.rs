//! Speech synthesis service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    content::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Modality,
        SpeechConfig, UsageMetadata,
    },
    error::{Error, Result},
    http::HttpClient,
    models::MODEL_FLASH_TTS,
};

/// Speech synthesis service.
pub struct SpeechService {
    http: Arc<HttpClient>,
}

impl SpeechService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Performs speech synthesis.
    ///
    /// Issues a single `generateContent` call requesting an audio response
    /// for the prebuilt voice. The audio is returned still base64-encoded;
    /// [`SpeechResponse::audio`] is `None` when the response carried no
    /// audio part.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: lector_gemini::Client) -> lector_gemini::Result<()> {
    /// use lector_gemini::SpeechRequest;
    ///
    /// let request = SpeechRequest::new("Hello, world!", "Kore");
    /// let response = client.speech().synthesize(&request).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        if request.text.trim().is_empty() {
            return Err(Error::Other("text must be non-empty".to_string()));
        }
        let model = if request.model.is_empty() {
            MODEL_FLASH_TTS
        } else {
            request.model.as_str()
        };
        debug!(
            model,
            voice = %request.voice_name,
            chars = request.text.chars().count(),
            "gemini: synthesize"
        );

        let body = request.to_generate_request();
        let api_resp: GenerateContentResponse = self
            .http
            .post(&format!("/v1beta/models/{}:generateContent", model), &body)
            .await?;

        Ok(SpeechResponse::from(api_resp))
    }
}

// ==================== Request/Response Types ====================

/// Request for speech synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Model name; empty selects [`MODEL_FLASH_TTS`].
    #[serde(default)]
    pub model: String,

    /// Text to speak.
    pub text: String,

    /// Provider prebuilt voice name.
    pub voice_name: String,
}

impl SpeechRequest {
    /// Creates a request for the default model.
    pub fn new(text: impl Into<String>, voice_name: impl Into<String>) -> Self {
        Self {
            model: String::new(),
            text: text.into(),
            voice_name: voice_name.into(),
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builds the `generateContent` body for this request.
    pub fn to_generate_request(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(self.text.clone())],
            generation_config: Some(GenerationConfig {
                response_modalities: vec![Modality::Audio],
                speech_config: Some(SpeechConfig::prebuilt(self.voice_name.clone())),
            }),
        }
    }
}

/// Base64 audio returned by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeechAudio {
    /// MIME type reported by the provider.
    pub mime_type: String,

    /// Base64-encoded PCM bytes.
    pub data: String,
}

/// Response from speech synthesis.
#[derive(Debug, Clone, Default)]
pub struct SpeechResponse {
    /// First audio payload, if any.
    pub audio: Option<SpeechAudio>,

    /// Finish reason of the first candidate.
    pub finish_reason: Option<String>,

    /// Token usage.
    pub usage: Option<UsageMetadata>,

    /// Model version that served the request.
    pub model_version: Option<String>,
}

impl From<GenerateContentResponse> for SpeechResponse {
    fn from(resp: GenerateContentResponse) -> Self {
        let audio = resp.first_inline_data().map(|d| SpeechAudio {
            mime_type: d.mime_type.clone(),
            data: d.data.clone(),
        });
        let finish_reason = resp.candidates.first().and_then(|c| c.finish_reason.clone());

        Self {
            audio,
            finish_reason,
            usage: resp.usage_metadata,
            model_version: resp.model_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builds_audio_generation() {
        let request = SpeechRequest::new("Hello world", "Charon");
        let body = request.to_generate_request();

        let config = body.generation_config.unwrap();
        assert_eq!(config.response_modalities, vec![Modality::Audio]);
        assert_eq!(
            config.speech_config.unwrap().voice_config.prebuilt_voice_config.voice_name,
            "Charon"
        );
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].parts[0].text.as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_with_model() {
        let request = SpeechRequest::new("hi", "Kore").with_model("gemini-2.5-pro-preview-tts");
        assert_eq!(request.model, "gemini-2.5-pro-preview-tts");
    }

    #[test]
    fn test_response_conversion() {
        let api: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAA="}}]},
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.5-flash-preview-tts"
        }))
        .unwrap();

        let response = SpeechResponse::from(api);
        assert_eq!(response.audio.unwrap().data, "AAA=");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.model_version.as_deref(), Some("gemini-2.5-flash-preview-tts"));
    }

    #[test]
    fn test_response_conversion_without_audio() {
        let api: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "OTHER"}]
        }))
        .unwrap();

        let response = SpeechResponse::from(api);
        assert!(response.audio.is_none());
        assert_eq!(response.finish_reason.as_deref(), Some("OTHER"));
    }
}
