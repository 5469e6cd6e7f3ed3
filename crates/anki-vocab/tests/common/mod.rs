//! Common test utilities for session tests.

use anki_vocab::{Session, SessionOptions};
use serde::Serialize;
use serde_json::{Value, json};
use vocab_engine::{AnkiClient, Engine, OpenAiClient};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

#[allow(dead_code)]
pub const DECK: &str = "English Vocabulary";
pub const MODEL: &str = "Basic";

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Session options pointing at the test deck and note type.
pub fn options(audio: bool) -> SessionOptions {
    SessionOptions {
        deck: DECK.to_string(),
        model: MODEL.to_string(),
        audio,
        voice: "alloy".to_string(),
    }
}

/// A session whose AnkiConnect and OpenAI clients point at the mock server.
#[allow(dead_code)]
pub fn session_for(server: &MockServer, audio: bool) -> Session {
    let anki = AnkiClient::builder().url(server.uri()).build();
    let openai = OpenAiClient::builder()
        .base_url(server.uri())
        .api_key("test-key")
        .build();
    Session::new(Engine::from_client(anki).with_openai(openai), options(audio))
}

/// A session without an OpenAI client.
#[allow(dead_code)]
pub fn anki_only_session(server: &MockServer) -> Session {
    let anki = AnkiClient::builder().url(server.uri()).build();
    Session::new(Engine::from_client(anki), options(true))
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

/// Mount the note type lookups for `MODEL` with fields Front and Back.
#[allow(dead_code)]
pub async fn mock_note_type(server: &MockServer) {
    mock_action(server, "modelNames", mock_anki_response(vec!["Basic", "Cloze"])).await;
    mock_action(server, "modelFieldNames", mock_anki_response(vec!["Front", "Back"])).await;
}

/// Mount a chat completion mock returning `payload` as JSON content.
#[allow(dead_code)]
pub async fn mock_chat(server: &MockServer, payload: Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": payload.to_string()}}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a speech mock with a fixed response.
#[allow(dead_code)]
pub async fn mock_speech(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// Lookup payload for "run" with one example sentence.
#[allow(dead_code)]
pub fn run_payload() -> Value {
    json!({
        "japanese_meaning": ["走る"],
        "english_meaning": ["[verb] to move swiftly"],
        "ipa": "/rʌn/",
        "idiom": "N/A",
        "example_sentence": ["I run every morning."]
    })
}

/// Body of the `addNote` request the server received.
#[allow(dead_code)]
pub async fn add_note_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap_or_default();
    requests
        .iter()
        .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
        .find(|body| body["action"] == "addNote")
        .expect("addNote was not sent")
}

/// Captured output as a string.
#[allow(dead_code)]
pub fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}
