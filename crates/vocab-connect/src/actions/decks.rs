//! Deck-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use vocab_connect::AnkiClient;
//!
//! # async fn example() -> vocab_connect::Result<()> {
//! let client = AnkiClient::new();
//!
//! let decks = client.decks().names().await?;
//! if !decks.iter().any(|d| d == "English Vocabulary") {
//!     client.decks().create("English Vocabulary").await?;
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct CreateDeckParams<'a> {
    deck: &'a str,
}

impl<'a> DeckActions<'a> {
    /// Get all deck names.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.invoke_without_params("deckNames").await
    }

    /// Check whether a deck with this exact name exists.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.names().await?.iter().any(|deck| deck == name))
    }

    /// Create a new deck.
    ///
    /// Returns the deck ID. Callers should check [`exists()`](Self::exists)
    /// first rather than relying on AnkiConnect to ignore duplicates.
    pub async fn create(&self, name: &str) -> Result<i64> {
        self.client
            .invoke("createDeck", CreateDeckParams { deck: name })
            .await
    }
}
