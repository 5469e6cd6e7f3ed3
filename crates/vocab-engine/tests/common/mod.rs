//! Common test utilities for engine tests.
//!
//! One mock server plays both AnkiConnect (POST `/`, matched on the action
//! in the body) and the OpenAI API (matched on path).

use serde::Serialize;
use serde_json::{Value, json};
use vocab_engine::{AnkiClient, Engine, OpenAiClient};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create an engine whose clients both point at the mock server.
pub fn engine_for(server: &MockServer) -> Engine {
    let anki = AnkiClient::builder().url(server.uri()).build();
    let openai = OpenAiClient::builder()
        .base_url(server.uri())
        .api_key("test-key")
        .build();
    Engine::from_client(anki).with_openai(openai)
}

/// Create a successful AnkiConnect response.
pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": result,
        "error": null
    }))
}

/// Mount a mock for an AnkiConnect action (expect exactly 1 call).
#[allow(dead_code)]
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    mock_action_times(server, action, response, 1).await;
}

/// Mount a mock for an AnkiConnect action with expected call count.
#[allow(dead_code)]
pub async fn mock_action_times(
    server: &MockServer,
    action: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": action,
            "version": 6
        })))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// Create a chat completion response whose message content is `payload`.
pub fn chat_response(payload: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": payload.to_string()},
            "finish_reason": "stop"
        }]
    }))
}

/// Mount a chat completion mock returning `payload` as JSON content.
#[allow(dead_code)]
pub async fn mock_chat(server: &MockServer, payload: Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(&payload))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a speech mock answering every request with `audio`.
#[allow(dead_code)]
pub async fn mock_speech(server: &MockServer, audio: &[u8], times: u64) {
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.to_vec()))
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// An OpenAI-style error response.
#[allow(dead_code)]
pub fn openai_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {"message": message, "type": "invalid_request_error"}
    }))
}

/// A typical lookup payload for "run".
#[allow(dead_code)]
pub fn run_payload() -> Value {
    json!({
        "japanese_meaning": ["走る", "運営する"],
        "english_meaning": ["[verb] to move swiftly on foot", "to manage or operate"],
        "ipa": "/rʌn/",
        "idiom": [{"english": "in the long run", "japanese": "長い目で見れば"}],
        "example_sentence": ["I run every morning.", "She runs a small shop."],
        "similar_words": [
            {"word": "sprint", "difference": "run at full speed for a short distance", "difference_japanese": "短距離を全力で走る"}
        ]
    })
}
