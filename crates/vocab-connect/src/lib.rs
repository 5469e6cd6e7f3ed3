//! Async Rust client for the subset of the AnkiConnect API that anki-vocab uses.
//!
//! # Quick Start
//!
//! ```no_run
//! use vocab_connect::AnkiClient;
//!
//! # async fn example() -> vocab_connect::Result<()> {
//! // Create a client with default settings (localhost:8765)
//! let client = AnkiClient::new();
//!
//! let decks = client.decks().names().await?;
//! println!("Decks: {:?}", decks);
//! # Ok(())
//! # }
//! ```
//!
//! # Client Configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use vocab_connect::AnkiClient;
//!
//! let client = AnkiClient::builder()
//!     .url("http://localhost:8765")
//!     .api_key("your-api-key")
//!     .timeout(Duration::from_secs(60))
//!     .build();
//! ```
//!
//! # Action Groups
//!
//! - [`AnkiClient::decks()`] - List and create decks
//! - [`AnkiClient::models()`] - List note types and their fields
//! - [`AnkiClient::notes()`] - Add, find, inspect, and delete notes
//!
//! # Requirements
//!
//! Anki must be running with the [AnkiConnect](https://ankiweb.net/shared/info/2055492159)
//! add-on installed.

pub mod actions;
pub mod client;
pub mod error;
pub mod query;
mod request;
pub mod types;

pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Result};
pub use query::QueryBuilder;
pub use types::{DuplicateScope, MediaAttachment, Note, NoteBuilder, NoteField, NoteInfo, NoteOptions};
