//! Part-of-speech tagging for English definitions.
//!
//! The completion prompt asks for every definition to start with a tag such
//! as `[verb]`, but the model does not always comply. Untagged definitions
//! get a best-effort tag from their surface form. Rules are checked in order
//! and the first match wins; `[definition]` is the catch-all.
//!
//! ```
//! use vocab_engine::pos::tag_definition;
//!
//! assert_eq!(tag_definition("to move swiftly"), "[verb] to move swiftly");
//! assert_eq!(tag_definition("[noun] a race"), "[noun] a race");
//! ```

use crate::word_info::Entry;

/// How a rule inspects the lowercased definition.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Starts with any of the prefixes.
    Prefix(&'static [&'static str]),
    /// Contains any of the markers.
    Contains(&'static [&'static str]),
    /// The last word, ignoring trailing punctuation, ends with the suffix.
    LastWordSuffix(&'static str),
    /// At most this many words and no punctuation.
    ShortPhrase(usize),
}

const RULES: &[(Matcher, &str)] = &[
    (Matcher::Prefix(&["to be ", "to "]), "verb"),
    (Matcher::Prefix(&["a ", "an ", "the "]), "noun"),
    (
        Matcher::Prefix(&["having ", "being ", "showing ", "causing ", "pleasing ", "making "]),
        "adjective",
    ),
    (
        Matcher::Contains(&[" act of ", " process of ", " state of ", " quality of "]),
        "noun",
    ),
    (Matcher::LastWordSuffix("ly"), "adverb"),
    (Matcher::ShortPhrase(5), "adjective"),
];

const FALLBACK_TAG: &str = "definition";

impl Matcher {
    fn matches(self, text: &str) -> bool {
        match self {
            Matcher::Prefix(prefixes) => prefixes.iter().any(|p| text.starts_with(p)),
            Matcher::Contains(markers) => markers.iter().any(|m| text.contains(m)),
            Matcher::LastWordSuffix(suffix) => text
                .split_whitespace()
                .last()
                .map(|word| word.trim_end_matches(|c: char| c.is_ascii_punctuation()))
                .is_some_and(|word| word.ends_with(suffix)),
            Matcher::ShortPhrase(max_words) => {
                text.split_whitespace().count() <= max_words && !text.chars().any(is_punctuation)
            }
        }
    }
}

/// Hyphens and apostrophes are part of words ("well-known", "one's").
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() && c != '-' && c != '\''
}

/// Pick the part-of-speech tag for an untagged definition.
pub fn classify(definition: &str) -> &'static str {
    let text = definition.trim().to_lowercase();
    RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(&text))
        .map_or(FALLBACK_TAG, |(_, tag)| *tag)
}

/// Prefix a definition with its part-of-speech tag.
///
/// Definitions already starting with `[` and blank definitions are returned
/// unchanged.
pub fn tag_definition(definition: &str) -> String {
    let trimmed = definition.trim();
    if trimmed.is_empty() || trimmed.starts_with('[') {
        return definition.to_string();
    }
    format!("[{}] {}", classify(trimmed), trimmed)
}

/// Make sure every English definition carries a tag.
///
/// Lists are tagged item by item; a lone string is tagged as a one-item list
/// would be. Other shapes are left alone.
pub fn normalize_english_meaning(entry: Entry) -> Entry {
    match entry {
        Entry::Items(items) => Entry::Items(items.iter().map(|d| tag_definition(d)).collect()),
        Entry::Scalar(s) => Entry::Scalar(tag_definition(&s)),
        other => other,
    }
}
