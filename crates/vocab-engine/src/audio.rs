//! Audio clips attached to a note.
//!
//! Each clip remembers what it was generated from, so markup can find the
//! clip for the third example sentence without parsing filenames. The
//! filenames themselves follow the `word_<w>.mp3` / `example_<w>_<k>.mp3`
//! convention that ends up in Anki's media folder.

use vocab_connect::MediaAttachment;

use crate::fetch::GeneratedAudio;

/// What a clip was synthesized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSource {
    /// The headword.
    Word,
    /// An example sentence.
    Example {
        /// Zero-based position among the spoken sentences.
        index: usize,
        /// The sentence text.
        sentence: String,
    },
}

/// One synthesized audio attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Filename in Anki's media folder.
    pub filename: String,
    /// Base64-encoded MP3.
    pub data: String,
    /// Fields AnkiConnect should associate the clip with.
    pub fields: Vec<String>,
    /// What was spoken.
    pub source: ClipSource,
}

impl AudioClip {
    /// The `[sound:...]` tag that plays this clip.
    pub fn sound_tag(&self) -> String {
        format!("[sound:{}]", self.filename)
    }

    /// Whether this is the clip for the example at `index`.
    pub fn is_example(&self, index: usize) -> bool {
        matches!(self.source, ClipSource::Example { index: i, .. } if i == index)
    }
}

impl From<AudioClip> for MediaAttachment {
    fn from(clip: AudioClip) -> Self {
        MediaAttachment {
            filename: clip.filename,
            data: clip.data,
            fields: clip.fields,
        }
    }
}

/// Make a word usable inside a filename.
///
/// ```
/// use vocab_engine::audio::safe_word;
///
/// assert_eq!(safe_word("take off"), "take_off");
/// assert_eq!(safe_word("and/or"), "and_or");
/// ```
pub fn safe_word(word: &str) -> String {
    word.replace([' ', '/', '\\'], "_")
}

/// Turn generated audio into clips bound to note fields.
///
/// The word clip goes to the first field. Example clips go to the second
/// field, or to every field when the note type has only one.
pub fn build_audio_clips(
    word: &str,
    generated: GeneratedAudio,
    field_names: &[String],
) -> Vec<AudioClip> {
    let safe = safe_word(word);

    let word_fields: Vec<String> = field_names.first().cloned().into_iter().collect();
    let example_fields: Vec<String> = match field_names.get(1) {
        Some(back) => vec![back.clone()],
        None => field_names.to_vec(),
    };

    let mut clips = Vec::with_capacity(generated.examples.len() + 1);
    clips.push(AudioClip {
        filename: format!("word_{}.mp3", safe),
        data: generated.word,
        fields: word_fields,
        source: ClipSource::Word,
    });

    clips.extend(generated.examples.into_iter().map(|example| AudioClip {
        filename: format!("example_{}_{}.mp3", safe, example.index + 1),
        data: example.audio,
        fields: example_fields.clone(),
        source: ClipSource::Example {
            index: example.index,
            sentence: example.sentence,
        },
    }));

    clips
}
