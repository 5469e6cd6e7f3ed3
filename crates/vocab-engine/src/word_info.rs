//! Vocabulary data returned by the completion API.
//!
//! The model answers with free-form JSON whose values may be strings, lists
//! of strings, lists of objects, or the sentinel `"N/A"`. Every value is
//! folded into an [`Entry`] so rendering can match on the shape instead of
//! inspecting JSON types.
//!
//! # Example
//!
//! ```
//! use vocab_engine::word_info::{Entry, WordInfo};
//!
//! let info = WordInfo::from_value(serde_json::json!({
//!     "english_meaning": ["[verb] to move swiftly"],
//!     "ipa": "/rʌn/",
//!     "idiom": "N/A"
//! }))
//! .unwrap();
//!
//! assert_eq!(info.english_meaning, Entry::Items(vec!["[verb] to move swiftly".to_string()]));
//! assert_eq!(info.ipa, Entry::Scalar("/rʌn/".to_string()));
//! assert_eq!(info.idiom, Entry::Absent);
//! assert_eq!(info.japanese_meaning, Entry::Absent);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// The literal the completion API uses for "no data".
pub const NOT_AVAILABLE: &str = "N/A";

/// One value of a [`WordInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub enum Entry {
    /// Missing key, `null`, or `"N/A"`.
    #[default]
    Absent,
    /// A single string.
    Scalar(String),
    /// A list of strings.
    Items(Vec<String>),
    /// A list of English/Japanese pairs (idioms).
    ObjectItems(Vec<Translation>),
}

/// An English phrase with its Japanese translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// English side.
    pub english: String,
    /// Japanese side, empty when the model gave none.
    pub japanese: String,
}

/// A near-synonym and how it differs from the looked-up word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarWord {
    /// The similar word.
    pub word: String,
    /// The nuance, explained in English.
    #[serde(default)]
    pub difference: String,
    /// The nuance, explained in Japanese.
    #[serde(default)]
    pub difference_japanese: String,
}

/// Everything the completion API told us about a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInfo {
    /// Japanese meanings, most frequent first.
    #[serde(default)]
    pub japanese_meaning: Entry,
    /// English definitions, each prefixed with a `[part of speech]` tag.
    #[serde(default)]
    pub english_meaning: Entry,
    /// IPA pronunciation.
    #[serde(default)]
    pub ipa: Entry,
    /// Idioms or phrases using the word.
    #[serde(default)]
    pub idiom: Entry,
    /// Example sentences.
    #[serde(default)]
    pub example_sentence: Entry,
    /// Near-synonyms with explanations of the difference.
    #[serde(default, deserialize_with = "lenient_similar_words")]
    pub similar_words: Vec<SimilarWord>,
}

impl WordInfo {
    /// Build from the parsed JSON payload.
    ///
    /// Any JSON object is accepted; unknown keys are ignored and missing
    /// keys become [`Entry::Absent`].
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Upstream(format!(
                "expected a JSON object with word information, got: {}",
                value
            )));
        }
        serde_json::from_value(value)
            .map_err(|e| Error::Upstream(format!("unusable word information: {}", e)))
    }
}

impl Entry {
    /// Whether there is nothing worth rendering.
    pub fn is_empty(&self) -> bool {
        match self {
            Entry::Absent => true,
            Entry::Scalar(s) => s.trim().is_empty(),
            Entry::Items(items) => items.is_empty(),
            Entry::ObjectItems(items) => items.is_empty(),
        }
    }

    /// The plain-text values, English side only for translations.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Entry::Absent => Vec::new(),
            Entry::Scalar(s) => vec![s.as_str()],
            Entry::Items(items) => items.iter().map(String::as_str).collect(),
            Entry::ObjectItems(items) => items.iter().map(|t| t.english.as_str()).collect(),
        }
    }

    /// Lines for a terminal summary.
    ///
    /// Returns `None` for scalar and absent values, which print inline.
    pub fn display_items(&self) -> Option<Vec<String>> {
        match self {
            Entry::Absent | Entry::Scalar(_) => None,
            Entry::Items(items) => Some(items.clone()),
            Entry::ObjectItems(items) => Some(items.iter().map(ToString::to_string).collect()),
        }
    }

    /// The inline form of a scalar or absent value.
    pub fn display_inline(&self) -> &str {
        match self {
            Entry::Scalar(s) => s,
            _ => NOT_AVAILABLE,
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Entry::Absent,
            Value::String(s) if s.trim() == NOT_AVAILABLE => Entry::Absent,
            Value::String(s) => Entry::Scalar(s),
            Value::Bool(_) | Value::Number(_) => Entry::Scalar(value.to_string()),
            Value::Array(items) if items.iter().any(Value::is_object) => {
                Entry::ObjectItems(items.into_iter().filter_map(Translation::from_value).collect())
            }
            Value::Array(items) => Entry::Items(items.into_iter().filter_map(plain_text).collect()),
            Value::Object(map) => Entry::ObjectItems(vec![Translation::from_map(&map)]),
        }
    }
}

impl Translation {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(&map)),
            other => plain_text(other).map(|english| Self {
                english,
                japanese: String::new(),
            }),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).cloned().and_then(plain_text).unwrap_or_default();
        Self {
            english: text("english"),
            japanese: text("japanese"),
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.japanese.is_empty() {
            write!(f, "{}", self.english)
        } else {
            write!(f, "{} ({})", self.english, self.japanese)
        }
    }
}

/// Stringify a scalar JSON value; `null` and containers yield nothing.
fn plain_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        _ => None,
    }
}

/// `similar_words` is a list of objects, `"N/A"`, or garbage. Keep what parses.
fn lenient_similar_words<'de, D>(deserializer: D) -> std::result::Result<Vec<SimilarWord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<SimilarWord>(item).ok())
        .filter(|similar| !similar.word.trim().is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_and_null_are_absent() {
        assert_eq!(Entry::from(json!("N/A")), Entry::Absent);
        assert_eq!(Entry::from(json!(" N/A ")), Entry::Absent);
        assert_eq!(Entry::from(Value::Null), Entry::Absent);
    }

    #[test]
    fn test_list_of_strings() {
        assert_eq!(
            Entry::from(json!(["走る", "運営する"])),
            Entry::Items(vec!["走る".to_string(), "運営する".to_string()])
        );
    }

    #[test]
    fn test_list_with_objects_becomes_translations() {
        let entry = Entry::from(json!([
            {"english": "run out of", "japanese": "使い果たす"},
            "in the long run"
        ]));
        assert_eq!(
            entry,
            Entry::ObjectItems(vec![
                Translation {
                    english: "run out of".to_string(),
                    japanese: "使い果たす".to_string()
                },
                Translation {
                    english: "in the long run".to_string(),
                    japanese: String::new()
                },
            ])
        );
    }

    #[test]
    fn test_numbers_are_stringified() {
        assert_eq!(Entry::from(json!(3)), Entry::Scalar("3".to_string()));
    }

    #[test]
    fn test_is_empty() {
        assert!(Entry::Absent.is_empty());
        assert!(Entry::Scalar("  ".to_string()).is_empty());
        assert!(Entry::Items(Vec::new()).is_empty());
        assert!(!Entry::Scalar("x".to_string()).is_empty());
    }

    #[test]
    fn test_similar_words_lenient() {
        let info = WordInfo::from_value(json!({
            "similar_words": [
                {"word": "sprint", "difference": "faster, shorter", "difference_japanese": "短距離を全力で"},
                {"difference": "no word"},
                "jog"
            ]
        }))
        .unwrap();
        assert_eq!(info.similar_words.len(), 1);
        assert_eq!(info.similar_words[0].word, "sprint");

        let info = WordInfo::from_value(json!({"similar_words": "N/A"})).unwrap();
        assert!(info.similar_words.is_empty());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(matches!(
            WordInfo::from_value(json!(["run"])),
            Err(Error::Upstream(_))
        ));
    }

    #[test]
    fn test_translation_display() {
        let t = Translation {
            english: "run into".to_string(),
            japanese: "偶然会う".to_string(),
        };
        assert_eq!(t.to_string(), "run into (偶然会う)");
    }
}
