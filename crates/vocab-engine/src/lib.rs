//! Vocabulary lookup and note assembly for Anki.
//!
//! This crate sits between the AnkiConnect client ([`vocab_connect`]) and
//! the command-line tool. It asks an OpenAI-compatible API about a word,
//! synthesizes pronunciation audio, and renders the result into the fields
//! of an existing note type.
//!
//! # Modules
//!
//! - [`word_info`] - The looked-up data and its tagged values
//! - [`pos`] - Part-of-speech tags for English definitions
//! - [`fetch`] - Completion and speech requests
//! - [`audio`] - Clips and their filenames
//! - [`assemble`] - Field roles, HTML rendering, note construction
//!
//! # Example
//!
//! ```no_run
//! use vocab_engine::{Engine, OpenAiClient};
//! use vocab_engine::assemble::{build_note, create_anki_fields};
//!
//! # async fn example() -> vocab_engine::Result<()> {
//! let engine = Engine::new().with_openai(OpenAiClient::builder().api_key("sk-...").build());
//!
//! let fields = engine.note_type_fields("Basic").await?;
//! let info = engine.fetcher()?.word_info("run").await?;
//! let note_fields = create_anki_fields("run", &info, &fields, &[])?;
//!
//! let note = build_note("English Vocabulary", "Basic", note_fields, Vec::new());
//! let note_id = engine.add_note(&note).await?;
//! println!("Created note {}", note_id);
//! # Ok(())
//! # }
//! ```

mod error;

pub mod assemble;
pub mod audio;
pub mod fetch;
pub mod openai;
pub mod pos;
pub mod word_info;

pub use error::{Error, Result};
pub use openai::{OpenAiClient, OpenAiClientBuilder};

// Re-export client types for convenience
pub use vocab_connect::{
    AnkiClient, ClientBuilder, DuplicateScope, MediaAttachment, Note, NoteBuilder, NoteInfo,
    QueryBuilder,
};

use fetch::VocabularyFetcher;

/// Owns the AnkiConnect and OpenAI clients.
///
/// The OpenAI client is optional so that operations which only touch Anki,
/// such as deleting notes, work without an API key.
#[derive(Debug, Clone)]
pub struct Engine {
    client: AnkiClient,
    openai: Option<OpenAiClient>,
}

impl Engine {
    /// Create a new engine with default client settings.
    ///
    /// Connects to AnkiConnect at `http://127.0.0.1:8765`.
    pub fn new() -> Self {
        Self::from_client(AnkiClient::new())
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: AnkiClient) -> Self {
        Self {
            client,
            openai: None,
        }
    }

    /// Attach an OpenAI client for lookups and speech.
    pub fn with_openai(mut self, openai: OpenAiClient) -> Self {
        self.openai = Some(openai);
        self
    }

    /// Get a reference to the underlying AnkiConnect client.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    /// Access lookup and speech operations.
    ///
    /// Fails with [`Error::MissingApiKey`] when no OpenAI client is attached.
    pub fn fetcher(&self) -> Result<VocabularyFetcher<'_>> {
        self.openai
            .as_ref()
            .map(VocabularyFetcher::new)
            .ok_or(Error::MissingApiKey)
    }

    /// Field names of a note type, checking that it exists first.
    ///
    /// Returns [`Error::ModelNotFound`] with the available note types when it
    /// does not.
    pub async fn note_type_fields(&self, model: &str) -> Result<Vec<String>> {
        let available = self.client.models().names().await?;
        if !available.iter().any(|name| name == model) {
            return Err(Error::ModelNotFound {
                model: model.to_string(),
                available,
            });
        }

        Ok(self.client.models().field_names(model).await?)
    }

    /// Add a note, creating its deck first if needed.
    pub async fn add_note(&self, note: &Note) -> Result<i64> {
        Ok(self.client.notes().add_to_deck(note).await?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
