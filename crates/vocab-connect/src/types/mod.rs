//! Domain types for AnkiConnect.

mod note;

pub use note::{
    DuplicateScope, MediaAttachment, Note, NoteBuilder, NoteField, NoteInfo, NoteOptions,
};
