//! Speech service tests against a local stand-in for the Gemini endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use lector_gemini::{Client, Error, SpeechRequest};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Call {
    path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Stub {
    calls: Arc<Mutex<Vec<Call>>>,
    status: StatusCode,
    reply: Value,
}

impl Stub {
    fn new(status: StatusCode, reply: Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            status,
            reply,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

async fn generate(
    State(stub): State<Stub>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.calls.lock().unwrap().push(Call {
        path: call,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (stub.status, Json(stub.reply.clone()))
}

async fn serve(stub: Stub) -> String {
    let router = Router::new()
        .route("/v1beta/models/{call}", post(generate))
        .with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_synthesize_returns_audio() {
    let stub = Stub::new(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAD/fw=="}}]},
                "finishReason": "STOP"
            }]
        }),
    );
    let base_url = serve(stub.clone()).await;
    let client = Client::builder("secret-key").base_url(base_url).build().unwrap();

    let response = client
        .speech()
        .synthesize(&SpeechRequest::new("Hello world", "Charon"))
        .await
        .unwrap();

    assert_eq!(response.audio.unwrap().data, "AAD/fw==");

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "gemini-2.5-flash-preview-tts:generateContent");
    assert_eq!(calls[0].api_key.as_deref(), Some("secret-key"));
    assert_eq!(calls[0].body["contents"][0]["parts"][0]["text"], "Hello world");
    assert_eq!(calls[0].body["generationConfig"]["responseModalities"], json!(["AUDIO"]));
    assert_eq!(
        calls[0].body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Charon"
    );
}

#[tokio::test]
async fn test_synthesize_without_audio_part() {
    let stub = Stub::new(StatusCode::OK, json!({"candidates": [{"finishReason": "OTHER"}]}));
    let base_url = serve(stub.clone()).await;
    let client = Client::builder("k").base_url(base_url).build().unwrap();

    let response = client
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "Kore"))
        .await
        .unwrap();

    assert!(response.audio.is_none());
    assert_eq!(stub.calls().len(), 1);
}

#[tokio::test]
async fn test_synthesize_api_error_is_not_retried() {
    let stub = Stub::new(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}),
    );
    let base_url = serve(stub.clone()).await;
    let client = Client::builder("k").base_url(base_url).build().unwrap();

    let err = client
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "Kore").with_model("gemini-2.5-pro-preview-tts"))
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert!(err.to_string().contains("The model is overloaded."));
    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "gemini-2.5-pro-preview-tts:generateContent");
}

#[tokio::test]
async fn test_synthesize_rejects_blank_text_without_call() {
    let stub = Stub::new(StatusCode::OK, json!({}));
    let base_url = serve(stub.clone()).await;
    let client = Client::builder("k").base_url(base_url).build().unwrap();

    let err = client
        .speech()
        .synthesize(&SpeechRequest::new("  \n", "Kore"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(_)));
    assert!(stub.calls().is_empty());
}
