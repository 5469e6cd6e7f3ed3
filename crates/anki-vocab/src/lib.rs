//! Command-line tool for adding English vocabulary to Anki.
//!
//! A word is looked up with an OpenAI-compatible API, optionally voiced with
//! text-to-speech, and added as a note through AnkiConnect. Existing notes
//! can be found and deleted by word, one at a time or from an interactive
//! session.
//!
//! # Modules
//!
//! - [`cli`] - Command-line arguments
//! - [`settings`] - Settings file and environment overrides
//! - [`session`] - The add and delete flows
//! - [`repl`] - Interactive command loop

pub mod cli;
pub mod repl;
pub mod session;
pub mod settings;

pub use cli::{Args, Voice};
pub use session::{DeleteOutcome, Session, SessionOptions};
pub use settings::Settings;
