//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::actions::{DeckActions, ModelActions, NoteActions};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse};

/// Default URL for AnkiConnect.
const DEFAULT_URL: &str = "http://127.0.0.1:8765";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The main client for interacting with AnkiConnect.
///
/// # Example
///
/// ```no_run
/// use vocab_connect::AnkiClient;
///
/// # async fn example() -> vocab_connect::Result<()> {
/// let client = AnkiClient::builder().host_port("localhost", 8765).build();
///
/// let models = client.models().names().await?;
/// println!("Note types: {:?}", models);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AnkiClient {
    /// Create a new client with default settings.
    ///
    /// Connects to `http://127.0.0.1:8765` with a 30 second timeout.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access note operations.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Access model (note type) operations.
    pub fn models(&self) -> ModelActions<'_> {
        ModelActions { client: self }
    }

    /// Execute an action without parameters.
    pub(crate) async fn invoke_without_params<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = AnkiRequest::<()>::without_params(action, self.api_key.as_deref());
        let result = self.send_request(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Execute an action with parameters.
    pub(crate) async fn invoke<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, params, self.api_key.as_deref());
        let result = self.send_request(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Execute an action that returns null on success.
    pub(crate) async fn invoke_void<P>(&self, action: &str, params: P) -> Result<()>
    where
        P: Serialize,
    {
        let request = AnkiRequest::new(action, params, self.api_key.as_deref());
        self.send_request(&request).await?;
        Ok(())
    }

    /// Send a request to AnkiConnect and validate the response envelope.
    async fn send_request<T>(&self, request: &AnkiRequest<'_, T>) -> Result<serde_json::Value>
    where
        T: Serialize,
    {
        debug!(action = request.action, url = %self.base_url, "Sending AnkiConnect request");

        let response = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::ConnectionRefused
                } else {
                    Error::Http(e)
                }
            })?;

        let body = response.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| Error::Protocol(format!("response is not valid JSON: {}", e)))?;

        AnkiResponse::from_value(body)?.into_result()
    }
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an [`AnkiClient`].
///
/// anki-vocab reads the host, port and optional key from its settings
/// (`ANKI_HOST`, `ANKI_PORT`, `ANKI_API_KEY`) and feeds them in here.
///
/// ```
/// use std::time::Duration;
/// use vocab_connect::AnkiClient;
///
/// let client = AnkiClient::builder()
///     .host_port("localhost", 8765)
///     .api_key("anki-key")
///     .timeout(Duration::from_secs(10))
///     .build();
///
/// assert_eq!(client.url(), "http://localhost:8765");
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the AnkiConnect URL.
    ///
    /// Defaults to `http://127.0.0.1:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the AnkiConnect URL from a host and port.
    pub fn host_port(self, host: &str, port: u16) -> Self {
        self.url(format!("http://{}:{}", host, port))
    }

    /// Send `key` with every request.
    ///
    /// AnkiConnect ignores it unless its `apiKey` setting is set, in which
    /// case a wrong or missing key is reported as
    /// [`Error::PermissionDenied`].
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request timeout, 30 seconds by default.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    ///
    /// # Panics
    ///
    /// If the TLS backend cannot be initialized.
    pub fn build(self) -> AnkiClient {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .expect("Failed to build HTTP client");

        AnkiClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
