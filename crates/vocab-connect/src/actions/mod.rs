//! Action modules for AnkiConnect operations.
//!
//! Each module provides a set of related operations grouped by domain.

mod decks;
mod models;
mod notes;

pub use decks::DeckActions;
pub use models::ModelActions;
pub use notes::NoteActions;
