//! The add and delete flows.
//!
//! Progress goes to any [`Write`] and the delete confirmation is read from
//! any [`AsyncBufRead`], so the flows run the same against a terminal or a
//! test buffer.

use std::io::Write;

use anyhow::{Result, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};
use vocab_engine::assemble::{build_note, create_anki_fields, preview_text, sound_refs};
use vocab_engine::audio::{AudioClip, build_audio_clips};
use vocab_engine::word_info::{Entry, WordInfo};
use vocab_engine::{Engine, Error as EngineError, QueryBuilder};

/// Characters of a note shown when confirming deletion.
const PREVIEW_CHARS: usize = 50;

/// Per-invocation choices.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Deck to add to and delete from.
    pub deck: String,
    /// Note type for new notes.
    pub model: String,
    /// Whether to synthesize audio.
    pub audio: bool,
    /// Speech voice.
    pub voice: String,
}

/// What a delete request ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No note matched.
    NotFound,
    /// The user declined.
    Cancelled,
    /// This many notes were deleted.
    Deleted(usize),
}

/// Runs add and delete requests against one engine.
#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    options: SessionOptions,
}

impl Session {
    /// Create a session.
    pub fn new(engine: Engine, options: SessionOptions) -> Self {
        Self { engine, options }
    }

    /// The session's options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Look a word up and add it as a new note. Returns the note id.
    ///
    /// Audio failures are reported and the note is added without audio.
    pub async fn add<W: Write>(&self, word: &str, out: &mut W) -> Result<i64> {
        let fetcher = self.engine.fetcher()?;
        let SessionOptions {
            deck, model, voice, ..
        } = &self.options;

        writeln!(out, "Fetching information for '{}'...", word)?;

        let field_names = match self.engine.note_type_fields(model).await {
            Err(EngineError::ModelNotFound { model, available }) => {
                bail!(model_not_found(&model, &available))
            }
            other => other?,
        };
        writeln!(
            out,
            "\nUsing note type '{}' with fields: {}",
            model,
            field_names.join(", ")
        )?;

        let info = fetcher.word_info(word).await?;
        write_summary(out, &info)?;

        let mut clips: Vec<AudioClip> = Vec::new();
        if self.options.audio {
            writeln!(out, "\nGenerating audio with voice '{}'...", voice)?;
            match fetcher
                .generate_audio_files(word, &info.example_sentence, voice)
                .await
            {
                Ok(generated) => {
                    let examples = generated.examples.len();
                    clips = build_audio_clips(word, generated, &field_names);
                    writeln!(
                        out,
                        "✓ Audio files generated successfully ({} files: 1 word + {} examples)",
                        clips.len(),
                        examples
                    )?;
                }
                Err(e) => {
                    warn!(word, error = %e, "Audio generation failed");
                    writeln!(out, "Warning: Failed to generate audio: {}", e)?;
                    writeln!(out, "Continuing without audio...")?;
                }
            }
        }

        writeln!(out, "\nAdding to Anki...")?;

        let fields = create_anki_fields(word, &info, &field_names, &clips)?;
        let mut names: Vec<&String> = fields.keys().collect();
        names.sort();
        for name in names {
            if !sound_refs(&fields[name]).is_empty() {
                writeln!(out, "  Field '{}' contains audio tags", name)?;
            }
        }

        let with_audio = !clips.is_empty();
        let note = build_note(deck, model, fields, clips);
        let note_id = self.engine.add_note(&note).await?;

        if with_audio {
            writeln!(
                out,
                "✓ Successfully added '{}' with audio to deck '{}' (Note ID: {})",
                word, deck, note_id
            )?;
        } else {
            writeln!(
                out,
                "✓ Successfully added '{}' to deck '{}' (Note ID: {})",
                word, deck, note_id
            )?;
        }

        Ok(note_id)
    }

    /// Find notes containing a word, confirm, and delete them.
    pub async fn delete<W: Write, R: AsyncBufRead + Unpin>(
        &self,
        word: &str,
        out: &mut W,
        input: &mut R,
    ) -> Result<DeleteOutcome> {
        let Some(note_ids) = self.preview_delete(word, out).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        let mut answer = String::new();
        input.read_line(&mut answer).await?;
        self.finish_delete(&note_ids, &answer, out).await
    }

    /// List the notes a delete would remove and print the prompt.
    ///
    /// Returns `None`, without prompting, when nothing matches.
    pub async fn preview_delete<W: Write>(
        &self,
        word: &str,
        out: &mut W,
    ) -> Result<Option<Vec<i64>>> {
        let deck = &self.options.deck;
        writeln!(out, "Searching for cards containing '{}'...", word)?;

        let query = QueryBuilder::new().contains(word).deck(deck).build();
        debug!(query = %query, "Searching notes");

        let client = self.engine.client();
        let note_ids = client.notes().find(&query).await?;
        if note_ids.is_empty() {
            writeln!(
                out,
                "No cards found containing '{}' in deck '{}'",
                word, deck
            )?;
            return Ok(None);
        }

        let notes = client.notes().info(&note_ids).await?;
        writeln!(out, "\nFound {} card(s) to delete:", note_ids.len())?;
        for note in &notes {
            let preview = note
                .ordered_fields()
                .into_iter()
                .map(|(_, field)| preview_text(&field.value, PREVIEW_CHARS))
                .find(|text| !text.is_empty())
                .unwrap_or_else(|| "Unknown content".to_string());
            writeln!(out, "  - Note ID {}: {}", note.note_id, preview)?;
        }

        write!(out, "\nDelete {} card(s)? (y/N): ", note_ids.len())?;
        out.flush()?;
        Ok(Some(note_ids))
    }

    /// Delete the notes if `answer` is a yes.
    ///
    /// Only `y` or `Y`, ignoring surrounding whitespace, counts as yes.
    pub async fn finish_delete<W: Write>(
        &self,
        note_ids: &[i64],
        answer: &str,
        out: &mut W,
    ) -> Result<DeleteOutcome> {
        if !is_confirmation(answer) {
            writeln!(out, "Deletion cancelled")?;
            return Ok(DeleteOutcome::Cancelled);
        }

        self.engine.client().notes().delete(note_ids).await?;
        writeln!(out, "✓ Successfully deleted {} card(s)", note_ids.len())?;
        Ok(DeleteOutcome::Deleted(note_ids.len()))
    }
}

fn is_confirmation(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

fn model_not_found(model: &str, available: &[String]) -> String {
    let mut message = format!("Note type '{}' not found in Anki.\n\nAvailable note types:\n", model);
    for name in available {
        message.push_str(&format!("  - {}\n", name));
    }
    message.push_str("\nYou can specify a different note type with --model \"Note Type Name\"\n");
    message.push_str("Or set MODEL_NAME in your environment or config file");
    message
}

fn write_summary<W: Write>(out: &mut W, info: &WordInfo) -> std::io::Result<()> {
    writeln!(out, "\nWord information retrieved:")?;
    write_entry(out, "Japanese", &info.japanese_meaning)?;
    write_entry(out, "English", &info.english_meaning)?;
    write_entry(out, "IPA", &info.ipa)?;
    write_entry(out, "Idiom", &info.idiom)?;
    write_entry(out, "Example", &info.example_sentence)?;

    if !info.similar_words.is_empty() {
        writeln!(out, "  Similar words:")?;
        for (i, similar) in info.similar_words.iter().enumerate() {
            writeln!(out, "    {}. {}: {}", i + 1, similar.word, similar.difference)?;
            if !similar.difference_japanese.is_empty() {
                writeln!(out, "       {}", similar.difference_japanese)?;
            }
        }
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, label: &str, entry: &Entry) -> std::io::Result<()> {
    match entry.display_items() {
        Some(items) => {
            writeln!(out, "  {}:", label)?;
            for (i, item) in items.iter().enumerate() {
                writeln!(out, "    {}. {}", i + 1, item)?;
            }
            Ok(())
        }
        None => writeln!(out, "  {}: {}", label, entry.display_inline()),
    }
}
