//! Error types for the vocab-connect crate.
//!
//! The most common errors you'll encounter are:
//!
//! - [`Error::ConnectionRefused`]: Anki is not running or AnkiConnect is not installed
//! - [`Error::AnkiConnect`]: The operation failed (e.g., duplicate note, deck not found)
//! - [`Error::Protocol`]: The endpoint answered with something that is not an AnkiConnect envelope
//!
//! # Example
//!
//! ```no_run
//! use vocab_connect::{AnkiClient, Error};
//!
//! # async fn example() {
//! let client = AnkiClient::new();
//!
//! match client.decks().names().await {
//!     Ok(decks) => println!("Found {} decks", decks.len()),
//!     Err(Error::ConnectionRefused) => {
//!         eprintln!("Please start Anki with AnkiConnect installed");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// For connection issues, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection refused - Anki is likely not running.
    ///
    /// This error occurs when:
    /// - Anki is not running
    /// - The AnkiConnect add-on is not installed
    /// - AnkiConnect is configured on a different host or port
    #[error("Cannot connect to Anki. Make sure Anki is running with AnkiConnect installed.")]
    ConnectionRefused,

    /// The response was not a well-formed AnkiConnect envelope.
    ///
    /// Raised when the body is not a JSON object, lacks the `error` or
    /// `result` key, or carries extra keys.
    #[error("Malformed AnkiConnect response: {0}")]
    Protocol(String),

    /// AnkiConnect returned an error message.
    ///
    /// Common messages include:
    /// - "cannot create note because it is a duplicate"
    /// - "deck was not found"
    /// - "model was not found"
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// Permission denied by AnkiConnect.
    ///
    /// An API key is required but missing or wrong, or the request needs
    /// approval in the Anki UI.
    #[error("Permission denied. Request permission first or check API key.")]
    PermissionDenied,

    /// The action's result did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
