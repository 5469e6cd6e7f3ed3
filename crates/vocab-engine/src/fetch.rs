//! Vocabulary lookup and pronunciation audio.
//!
//! # Example
//!
//! ```no_run
//! use vocab_engine::{Engine, OpenAiClient};
//!
//! # async fn example() -> vocab_engine::Result<()> {
//! let openai = OpenAiClient::builder().api_key("sk-...").build();
//! let engine = Engine::new().with_openai(openai);
//!
//! let info = engine.fetcher()?.word_info("run").await?;
//! let audio = engine
//!     .fetcher()?
//!     .generate_audio_files("run", &info.example_sentence, "alloy")
//!     .await?;
//! println!("{} example clips", audio.examples.len());
//! # Ok(())
//! # }
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::openai::OpenAiClient;
use crate::pos::normalize_english_meaning;
use crate::word_info::{Entry, NOT_AVAILABLE, WordInfo};

const SYSTEM_MESSAGE: &str =
    "You are a helpful language teacher providing vocabulary information in JSON format.";

/// Playback speed for the headword; a little slower for clarity.
pub const WORD_SPEED: f32 = 0.9;

/// Playback speed for example sentences.
pub const EXAMPLE_SPEED: f32 = 1.0;

/// Synthesized audio for a word and its example sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedAudio {
    /// Base64-encoded MP3 of the headword.
    pub word: String,
    /// One entry per kept example sentence, in order.
    pub examples: Vec<ExampleAudio>,
}

/// Audio for one example sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleAudio {
    /// Zero-based position among the kept sentences.
    pub index: usize,
    /// The sentence that was spoken.
    pub sentence: String,
    /// Base64-encoded MP3.
    pub audio: String,
}

/// Looks words up and synthesizes their pronunciation.
#[derive(Debug)]
pub struct VocabularyFetcher<'a> {
    client: &'a OpenAiClient,
}

impl<'a> VocabularyFetcher<'a> {
    pub(crate) fn new(client: &'a OpenAiClient) -> Self {
        Self { client }
    }

    /// Ask the completion API about a word.
    ///
    /// Untagged English definitions are given a part-of-speech tag before
    /// the result is returned.
    pub async fn word_info(&self, word: &str) -> Result<WordInfo> {
        debug!(word, model = %self.client.chat_model(), "Fetching word information");

        let payload = self
            .client
            .complete_json(SYSTEM_MESSAGE, &lookup_prompt(word))
            .await?;

        let mut info = WordInfo::from_value(payload)?;
        info.english_meaning = normalize_english_meaning(info.english_meaning);
        Ok(info)
    }

    /// Synthesize a single piece of text.
    pub async fn generate_audio(&self, text: &str, voice: &str, speed: f32) -> Result<Vec<u8>> {
        self.client.speech(text, voice, speed).await
    }

    /// Synthesize the headword and every usable example sentence.
    ///
    /// Sentences are trimmed; blank ones and `"N/A"` are skipped and do not
    /// consume an index. Any synthesis failure aborts the whole batch.
    pub async fn generate_audio_files(
        &self,
        word: &str,
        examples: &Entry,
        voice: &str,
    ) -> Result<GeneratedAudio> {
        let word_audio = self.generate_audio(word, voice, WORD_SPEED).await?;

        let sentences = speakable_sentences(examples);
        let mut example_audio = Vec::with_capacity(sentences.len());
        for (index, sentence) in sentences.into_iter().enumerate() {
            let audio = self.generate_audio(sentence, voice, EXAMPLE_SPEED).await?;
            example_audio.push(ExampleAudio {
                index,
                sentence: sentence.to_string(),
                audio: STANDARD.encode(audio),
            });
        }

        debug!(word, examples = example_audio.len(), "Generated audio");

        Ok(GeneratedAudio {
            word: STANDARD.encode(word_audio),
            examples: example_audio,
        })
    }
}

/// Example sentences worth sending to the speech API.
pub fn speakable_sentences(examples: &Entry) -> Vec<&str> {
    examples
        .texts()
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
        .collect()
}

fn lookup_prompt(word: &str) -> String {
    format!(
        r#"Please provide the following information for the English word "{word}":
1. Japanese meaning (日本語の意味、複数可、頻出順に)
2. English definition (英語の定義、複数可、頻出順に)
   Each English definition MUST start with the part of speech in square brackets.
   Format: "[part of speech] definition"
   Examples:
   - "[verb] to organize and carry out"
   - "[noun] a piece of furniture"
   - "[adjective] having great size"
3. IPA pronunciation
4. Common idioms or phrases with Japanese translations (if any, otherwise write "N/A")
   Format as an array of objects with "english" and "japanese" keys
5. Example sentences (at least one, if possible 2-3, otherwise write "N/A")
6. Similar words and their differences (類似語とその違い)
   Provide 2-3 words that are similar in meaning but have nuanced differences.
   Format as an array of objects with "word", "difference" (in English), and "difference_japanese" keys.
   If no similar words exist, write "N/A"

Format the response as JSON with these exact keys:
- japanese_meaning (array of strings)
- english_meaning (array of strings, each starting with [part of speech])
- ipa (string)
- idiom (array of objects with "english" and "japanese" keys, or "N/A" if none)
- example_sentence (array of strings)
- similar_words (array of objects with "word", "difference", and "difference_japanese" keys, or "N/A" if none)"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speakable_sentences_drops_blank_and_sentinel() {
        let entry = Entry::Items(vec![
            " I run every day. ".to_string(),
            "".to_string(),
            "N/A".to_string(),
            "She ran home.".to_string(),
        ]);
        assert_eq!(
            speakable_sentences(&entry),
            vec!["I run every day.", "She ran home."]
        );
    }

    #[test]
    fn test_speakable_sentences_scalar() {
        let entry = Entry::Scalar("Run!".to_string());
        assert_eq!(speakable_sentences(&entry), vec!["Run!"]);
        assert!(speakable_sentences(&Entry::Absent).is_empty());
    }

    #[test]
    fn test_prompt_names_word_and_keys() {
        let prompt = lookup_prompt("take off");
        assert!(prompt.contains("\"take off\""));
        for key in [
            "japanese_meaning",
            "english_meaning",
            "ipa",
            "idiom",
            "example_sentence",
            "similar_words",
        ] {
            assert!(prompt.contains(key), "missing {}", key);
        }
    }
}
