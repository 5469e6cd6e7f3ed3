//! Turning word information into note fields.
//!
//! Note types name their fields freely ("Front", "Expression", "Meaning",
//! "Text"...). [`FieldRoles`] guesses which field shows the word and which
//! shows the explanation, and [`create_anki_fields`] renders the HTML for
//! both sides.
//!
//! # Example
//!
//! ```
//! use vocab_engine::assemble::create_anki_fields;
//! use vocab_engine::word_info::{Entry, WordInfo};
//!
//! let info = WordInfo {
//!     english_meaning: Entry::Items(vec!["[verb] to move swiftly".to_string()]),
//!     ..Default::default()
//! };
//! let field_names = vec!["Front".to_string(), "Back".to_string()];
//!
//! let fields = create_anki_fields("run", &info, &field_names, &[]).unwrap();
//! assert!(fields["Front"].contains("run"));
//! assert!(fields["Back"].contains("<li>[verb] to move swiftly</li>"));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;
use vocab_connect::{DuplicateScope, MediaAttachment, Note, NoteBuilder};

use crate::audio::{AudioClip, ClipSource};
use crate::word_info::{Entry, NOT_AVAILABLE, SimilarWord, Translation, WordInfo};
use crate::{Error, Result};

/// Rendered HTML keyed by field name.
pub type NoteFields = HashMap<String, String>;

/// Tags put on every generated note.
pub const NOTE_TAGS: [&str; 3] = ["english", "vocabulary", "ai-generated"];

const FRONT_KEYWORDS: &[&str] = &["front", "question", "text1", "expression", "word"];
const BACK_KEYWORDS: &[&str] = &["back", "answer", "text2", "meaning", "definition"];

const LIST_STYLE: &str = "margin: 5px 0; padding-left: 20px;";

static SOUND_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[sound:([^\]]+)\]").expect("sound tag pattern is valid"));

/// Which field holds the word and which holds the explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRoles {
    /// Field that shows the word.
    pub front: String,
    /// Field that shows meanings and examples.
    pub back: String,
}

impl FieldRoles {
    /// Assign roles from a note type's field names.
    ///
    /// A field is a front candidate when its lowercased name contains one of
    /// the front keywords, otherwise a back candidate when it contains a back
    /// keyword. When several fields qualify the last one wins. Unmatched
    /// roles fall back to the first and second field.
    ///
    /// ```
    /// use vocab_engine::assemble::FieldRoles;
    ///
    /// let names = vec!["Meaning".to_string(), "Word".to_string()];
    /// let roles = FieldRoles::resolve(&names).unwrap();
    /// assert_eq!(roles.front, "Word");
    /// assert_eq!(roles.back, "Meaning");
    /// ```
    pub fn resolve(field_names: &[String]) -> Result<Self> {
        let Some(first) = field_names.first() else {
            return Err(Error::Validation("note type has no fields".to_string()));
        };

        let mut front = None;
        let mut back = None;
        for name in field_names {
            let lower = name.to_lowercase();
            if FRONT_KEYWORDS.iter().any(|k| lower.contains(k)) {
                front = Some(name);
            } else if BACK_KEYWORDS.iter().any(|k| lower.contains(k)) {
                back = Some(name);
            }
        }

        Ok(Self {
            front: front.unwrap_or(first).clone(),
            back: back.or(field_names.get(1)).unwrap_or(first).clone(),
        })
    }

    /// Whether both sides end up in the same field.
    pub fn is_shared(&self) -> bool {
        self.front == self.back
    }
}

/// Render the note fields for a word.
///
/// Example sentences get the `[sound:...]` tag of the clip generated for
/// them; the word gets the word clip's tag.
pub fn create_anki_fields(
    word: &str,
    info: &WordInfo,
    field_names: &[String],
    clips: &[AudioClip],
) -> Result<NoteFields> {
    let roles = FieldRoles::resolve(field_names)?;
    let front = render_front(word, info, clips);
    let back = render_back(info, clips);

    let mut fields = NoteFields::new();
    if field_names.len() == 1 || roles.is_shared() {
        fields.insert(roles.front, format!("{}\n{}", front, back));
    } else {
        fields.insert(roles.front, front);
        fields.insert(roles.back, back);
    }
    Ok(fields)
}

/// Build the note to send to Anki.
///
/// Duplicates are rejected within the deck. The audio list is left out
/// when there are no clips.
pub fn build_note(deck: &str, model: &str, fields: NoteFields, clips: Vec<AudioClip>) -> Note {
    clips
        .into_iter()
        .map(MediaAttachment::from)
        .fold(
            NoteBuilder::new(deck, model)
                .fields(fields)
                .tags(NOTE_TAGS)
                .allow_duplicate(false)
                .duplicate_scope(DuplicateScope::Deck),
            NoteBuilder::audio,
        )
        .build()
}

/// Filenames referenced by `[sound:...]` tags, in order of appearance.
pub fn sound_refs(html: &str) -> Vec<&str> {
    SOUND_TAG
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Plain-text preview of a field value.
///
/// Sound tags and HTML are removed and whitespace collapsed. Text longer
/// than `max_chars` is cut and ends in `...`.
pub fn preview_text(value: &str, max_chars: usize) -> String {
    let without_sound = SOUND_TAG.replace_all(value, "");

    let mut text = String::with_capacity(without_sound.len());
    let mut in_tag = false;
    for ch in without_sound.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

fn render_front(word: &str, info: &WordInfo, clips: &[AudioClip]) -> String {
    let word_tag = clips
        .iter()
        .find(|clip| clip.source == ClipSource::Word)
        .map(|clip| format!(" {}", clip.sound_tag()))
        .unwrap_or_default();

    let ipa = match &info.ipa {
        Entry::Absent => String::new(),
        other => other.texts().join(", "),
    };

    format!(
        r#"<div style="font-size: 24px; font-weight: bold;">{word}{word_tag}</div>
<div style="font-size: 18px; color: #666;">{ipa}</div>"#
    )
}

fn render_back(info: &WordInfo, clips: &[AudioClip]) -> String {
    let mut back = section("English", &render_entry(&info.english_meaning));

    back.push_str(&format!(
        r#"
<div style="margin-bottom: 15px; margin-top: 20px; padding: 10px; background-color: #f0f0f0; border-radius: 5px;">
<strong>Example:</strong> {}
</div>"#,
        render_examples(&info.example_sentence, clips)
    ));

    back.push_str("\n<hr style=\"margin: 20px 0; border: 1px solid #ccc;\">");
    back.push('\n');
    back.push_str(&section("Japanese", &render_entry(&info.japanese_meaning)));

    if !info.idiom.is_empty() {
        back.push('\n');
        back.push_str(&section("Idiom/Phrase", &render_entry(&info.idiom)));
    }

    if !info.similar_words.is_empty() {
        back.push('\n');
        back.push_str(&section(
            "Similar words",
            &render_similar_words(&info.similar_words),
        ));
    }

    back
}

fn section(label: &str, body: &str) -> String {
    format!("<div style=\"margin-bottom: 15px;\">\n<strong>{label}:</strong> {body}\n</div>")
}

fn bullet_list(items: impl IntoIterator<Item = String>) -> String {
    let items: String = items
        .into_iter()
        .map(|item| format!("<li>{}</li>", item))
        .collect();
    format!("<ul style=\"{LIST_STYLE}\">{items}</ul>")
}

fn render_translation(t: &Translation) -> String {
    if t.japanese.is_empty() {
        t.english.clone()
    } else {
        format!(
            "{}<br><span style=\"margin-left: 10px; color: #666;\">{}</span>",
            t.english, t.japanese
        )
    }
}

fn render_entry(entry: &Entry) -> String {
    match entry {
        Entry::Absent => NOT_AVAILABLE.to_string(),
        Entry::Scalar(s) => s.clone(),
        Entry::Items(items) => bullet_list(items.iter().cloned()),
        Entry::ObjectItems(items) => bullet_list(items.iter().map(render_translation)),
    }
}

/// Examples with the sound tag of their clip appended.
///
/// Clip indices count only sentences that were spoken, so blank and `N/A`
/// entries are rendered without a tag and do not advance the index.
fn render_examples(entry: &Entry, clips: &[AudioClip]) -> String {
    let mut next_index = 0;
    let mut with_tag = |text: &str, rendered: String| {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            return rendered;
        }
        let index = next_index;
        next_index += 1;
        match clips.iter().find(|clip| clip.is_example(index)) {
            Some(clip) => format!("{} {}", rendered, clip.sound_tag()),
            None => rendered,
        }
    };

    match entry {
        Entry::Absent => NOT_AVAILABLE.to_string(),
        Entry::Scalar(s) => with_tag(s, s.clone()),
        Entry::Items(items) => {
            let rendered: Vec<String> = items.iter().map(|s| with_tag(s, s.clone())).collect();
            bullet_list(rendered)
        }
        Entry::ObjectItems(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|t| with_tag(&t.english, render_translation(t)))
                .collect();
            bullet_list(rendered)
        }
    }
}

fn render_similar_words(words: &[SimilarWord]) -> String {
    bullet_list(words.iter().map(|w| {
        let mut item = format!("<b>{}</b>", w.word);
        if !w.difference.is_empty() {
            item.push_str(&format!(": {}", w.difference));
        }
        if !w.difference_japanese.is_empty() {
            item.push_str(&format!(
                "<br><span style=\"margin-left: 10px; color: #666;\">{}</span>",
                w.difference_japanese
            ));
        }
        item
    }))
}
