//! Minimal client for OpenAI-compatible completion and speech endpoints.
//!
//! Only two calls are needed: a JSON-mode chat completion and a text to
//! speech request. The base URL is configurable so the client also works
//! against compatible gateways and local mock servers.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for vocabulary lookups.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";

/// Default model for speech synthesis.
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Speed range accepted by the speech endpoint.
const SPEED_RANGE: (f32, f32) = (0.25, 4.0);

/// Sampling temperature for lookups; low so repeated lookups stay similar.
const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for the completion and speech endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    speech_model: String,
}

impl OpenAiClient {
    /// Create a builder for custom client configuration.
    pub fn builder() -> OpenAiClientBuilder {
        OpenAiClientBuilder::new()
    }

    /// The chat model used for lookups.
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// Run a JSON-mode chat completion and parse the reply as JSON.
    pub async fn complete_json(&self, system: &str, prompt: &str) -> Result<Value> {
        let request = ChatRequest {
            model: &self.chat_model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(model = %self.chat_model, prompt_len = prompt.len(), "Sending completion request");

        let response = self.post("chat/completions", &request).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("unreadable completion response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Upstream("completion response has no content".to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Upstream(format!("completion did not return valid JSON: {}", e)))
    }

    /// Synthesize speech and return the MP3 bytes.
    ///
    /// `speed` is a rate multiplier; it is clamped into the range the
    /// endpoint accepts.
    pub async fn speech(&self, text: &str, voice: &str, speed: f32) -> Result<Vec<u8>> {
        let request = SpeechRequest {
            model: &self.speech_model,
            input: text,
            voice,
            speed: speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1),
            response_format: "mp3",
        };

        debug!(model = %self.speech_model, voice, speed = request.speed, text_len = text.len(), "Sending speech request");

        let response = self.post("audio/speech", &request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Upstream(format!("error generating audio: {}", e)))?;

        Ok(bytes.to_vec())
    }

    /// POST a JSON body and turn non-success statuses into upstream errors.
    async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or_else(|_| format!("HTTP {}: {}", status, text));

        Err(Error::Upstream(format!("OpenAI API error: {}", message)))
    }
}

/// Builder for creating a customized [`OpenAiClient`].
///
/// # Example
///
/// ```no_run
/// use vocab_engine::OpenAiClient;
///
/// let client = OpenAiClient::builder()
///     .api_key("sk-...")
///     .chat_model("gpt-4o-mini")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct OpenAiClientBuilder {
    base_url: String,
    api_key: String,
    chat_model: String,
    speech_model: String,
    timeout: Duration,
}

impl OpenAiClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://api.openai.com/v1`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the chat model.
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the speech model.
    pub fn speech_model(mut self, model: impl Into<String>) -> Self {
        self.speech_model = model.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    pub fn build(self) -> OpenAiClient {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .expect("Failed to build HTTP client");

        OpenAiClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
            chat_model: self.chat_model,
            speech_model: self.speech_model,
        }
    }
}

impl Default for OpenAiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
