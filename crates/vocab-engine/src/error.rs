//! Error types for vocab-engine.
//!
//! Errors fall into three groups:
//!
//! 1. **Client errors**: wrapped from [`vocab_connect::Error`] (Anki unreachable,
//!    malformed envelope, AnkiConnect reported a failure)
//! 2. **Upstream errors**: the completion or speech API failed or answered
//!    with something unusable
//! 3. **Configuration errors**: missing API key, unknown note type, unusable
//!    field list
//!
//! # Example
//!
//! ```no_run
//! use vocab_engine::{Engine, Error};
//!
//! # async fn example(engine: Engine) {
//! match engine.note_type_fields("Basic").await {
//!     Ok(fields) => println!("Fields: {:?}", fields),
//!     Err(Error::ModelNotFound { model, available }) => {
//!         eprintln!("'{}' not found, try one of {:?}", model, available);
//!     }
//!     Err(Error::Client(vocab_connect::Error::ConnectionRefused)) => {
//!         eprintln!("Is Anki running?");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;

/// Result type for vocab-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during engine operations.
#[derive(Debug)]
pub enum Error {
    /// An error from the AnkiConnect client.
    Client(vocab_connect::Error),

    /// The completion or speech API failed.
    Upstream(String),

    /// The requested note type does not exist.
    ModelNotFound {
        /// The requested model name.
        model: String,
        /// Model names that do exist.
        available: Vec<String>,
    },

    /// No OpenAI API key was configured.
    MissingApiKey,

    /// A validation error occurred.
    Validation(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::Upstream(msg) => write!(f, "{}", msg),
            Error::ModelNotFound { model, .. } => {
                write!(f, "note type '{}' not found in Anki", model)
            }
            Error::MissingApiKey => write!(
                f,
                "OpenAI API key not found. Please set OPENAI_API_KEY environment variable or add it to config."
            ),
            Error::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl From<vocab_connect::Error> for Error {
    fn from(err: vocab_connect::Error) -> Self {
        Error::Client(err)
    }
}
