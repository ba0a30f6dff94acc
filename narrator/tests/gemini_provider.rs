//! Narrator wired to the Gemini provider, against a local endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use lector_audio::{ChannelBuffers, ClockOutput, encode_base64, encode_pcm};
use lector_narrator::{Credentials, Error, GeminiProvider, Narrator, Outcome, Voice};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Endpoint {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    status: StatusCode,
    reply: Value,
}

async fn generate(
    State(endpoint): State<Endpoint>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    endpoint.requests.lock().unwrap().push((key, body));
    (endpoint.status, Json(endpoint.reply.clone()))
}

async fn start(status: StatusCode, reply: Value) -> (Endpoint, String) {
    let endpoint = Endpoint {
        requests: Arc::new(Mutex::new(Vec::new())),
        status,
        reply,
    };
    let router = Router::new()
        .route("/v1beta/models/{call}", post(generate))
        .with_state(endpoint.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (endpoint, format!("http://{}", addr))
}

fn provider(base_url: &str) -> GeminiProvider {
    let credentials = Credentials::with_key("test-key").env_vars(Vec::<String>::new());
    GeminiProvider::new(credentials).with_base_url(base_url)
}

fn audio_reply(frames: usize) -> Value {
    let buffers = ChannelBuffers::new(24000, vec![vec![0.25; frames]]);
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{
                "inlineData": {
                    "mimeType": "audio/L16;codec=pcm;rate=24000",
                    "data": encode_base64(&encode_pcm(&buffers)),
                }
            }]},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_speaks_through_gemini() {
    let (endpoint, base_url) = start(StatusCode::OK, audio_reply(2400)).await;
    let output = Arc::new(ClockOutput::new());
    let narrator = Narrator::new(Arc::new(provider(&base_url)), output.clone());

    let outcome = narrator.synthesize("Hello world", Voice::Mystery).await.unwrap();
    assert!(matches!(outcome, Outcome::Played { frames: 2400, .. }));

    let requests = endpoint.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (key, body) = &requests[0];
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(
        body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Charon"
    );

    let played = output.played();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].channel(0)[0], 0.25);
}

#[tokio::test]
async fn test_provider_error_becomes_synthesis_failure() {
    let (endpoint, base_url) = start(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"code": 429, "message": "Quota exceeded.", "status": "RESOURCE_EXHAUSTED"}}),
    )
    .await;
    let output = Arc::new(ClockOutput::new());
    let narrator = Narrator::new(Arc::new(provider(&base_url)), output.clone());

    let err = narrator.synthesize("Hello", Voice::Kore).await.unwrap_err();
    match err {
        Error::SynthesisFailed(msg) => assert!(msg.contains("Quota exceeded."), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(endpoint.requests.lock().unwrap().len(), 1);
    assert!(output.played().is_empty());
}

#[tokio::test]
async fn test_response_without_audio_is_missing_audio() {
    let (_endpoint, base_url) = start(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "no audio"}]}, "finishReason": "STOP"}]}),
    )
    .await;
    let narrator = Narrator::new(Arc::new(provider(&base_url)), Arc::new(ClockOutput::new()));

    let err = narrator.synthesize("Hello", Voice::Puck).await.unwrap_err();
    assert!(matches!(err, Error::MissingAudioData));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let (endpoint, base_url) = start(StatusCode::OK, audio_reply(10)).await;
    let credentials = Credentials::default();
    let provider = GeminiProvider::new(credentials).with_base_url(base_url);
    let narrator = Narrator::new(Arc::new(provider), Arc::new(ClockOutput::new()));

    let err = narrator.synthesize("Hello", Voice::Kore).await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(endpoint.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_timeout_is_synthesis_failure() {
    async fn stall() -> StatusCode {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        StatusCode::OK
    }
    let router = Router::new().route("/v1beta/models/{call}", post(stall));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let provider = provider(&format!("http://{}", addr))
        .with_timeout(std::time::Duration::from_millis(100));
    let narrator = Narrator::new(Arc::new(provider), Arc::new(ClockOutput::new()));

    let err = narrator.synthesize("Hello", Voice::Kore).await.unwrap_err();
    assert!(matches!(err, Error::SynthesisFailed(_)), "{err:?}");
    assert!(err.is_synthesis_failure());
}
