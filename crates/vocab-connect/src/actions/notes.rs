//! Note-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use vocab_connect::{AnkiClient, NoteBuilder, QueryBuilder};
//!
//! # async fn example() -> vocab_connect::Result<()> {
//! let client = AnkiClient::new();
//!
//! let note = NoteBuilder::new("English Vocabulary", "Basic")
//!     .fields([("Front", "run"), ("Back", "[verb] to move swiftly")])
//!     .tags(["vocabulary"])
//!     .build();
//!
//! let note_id = client.notes().add_to_deck(&note).await?;
//! println!("Created note: {}", note_id);
//!
//! let query = QueryBuilder::new().contains("run").deck("English Vocabulary").build();
//! let note_ids = client.notes().find(&query).await?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::info;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::{Note, NoteInfo};

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

// Parameter structs for actions
#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a Note,
}

#[derive(Serialize)]
struct FindNotesParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct NotesInfoParams<'a> {
    notes: &'a [i64],
}

#[derive(Serialize)]
struct DeleteNotesParams<'a> {
    notes: &'a [i64],
}

impl<'a> NoteActions<'a> {
    /// Add a new note.
    ///
    /// Returns the ID of the created note. The deck must already exist; see
    /// [`add_to_deck()`](Self::add_to_deck) for the variant that creates it.
    ///
    /// Duplicate handling is carried by the note's options and enforced by
    /// AnkiConnect, which answers with an error for rejected duplicates.
    pub async fn add(&self, note: &Note) -> Result<i64> {
        self.client.invoke("addNote", AddNoteParams { note }).await
    }

    /// Add a new note, creating its deck first if it does not exist yet.
    pub async fn add_to_deck(&self, note: &Note) -> Result<i64> {
        let decks = self.client.decks();
        if !decks.exists(&note.deck_name).await? {
            info!(deck = %note.deck_name, "Creating new deck");
            decks.create(&note.deck_name).await?;
        }

        let note_id = self.add(note).await?;
        info!(
            note_id,
            deck = %note.deck_name,
            audio = note.audio.as_ref().map_or(0, Vec::len),
            "Added note"
        );
        Ok(note_id)
    }

    /// Find notes matching a query.
    ///
    /// Returns note IDs in the order AnkiConnect reports them. Use
    /// [`info()`](Self::info) to get full note details.
    ///
    /// # Query Syntax
    ///
    /// Uses Anki's search syntax; [`QueryBuilder`](crate::QueryBuilder)
    /// builds it without manual quoting:
    /// - `deck:DeckName` - notes in a specific deck
    /// - `"exact phrase"` - exact phrase match in any field
    /// - `tag:TagName` - notes with a specific tag
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .invoke("findNotes", FindNotesParams { query })
            .await
    }

    /// Get detailed information about notes.
    pub async fn info(&self, note_ids: &[i64]) -> Result<Vec<NoteInfo>> {
        self.client
            .invoke("notesInfo", NotesInfoParams { notes: note_ids })
            .await
    }

    /// Delete notes.
    ///
    /// This also deletes all cards generated from the notes. AnkiConnect
    /// accepts an empty list and does nothing.
    pub async fn delete(&self, note_ids: &[i64]) -> Result<()> {
        self.client
            .invoke_void("deleteNotes", DeleteNotesParams { notes: note_ids })
            .await
    }
}
