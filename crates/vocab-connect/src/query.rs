//! Query builder for Anki search syntax.
//!
//! # Example
//!
//! ```
//! use vocab_connect::QueryBuilder;
//!
//! // Notes mentioning "take off" in one deck
//! let query = QueryBuilder::new()
//!     .contains("take off")
//!     .deck("English Vocabulary")
//!     .build();
//!
//! assert_eq!(query, "\"take off\" deck:\"English Vocabulary\"");
//! ```

/// A builder for constructing Anki search queries.
///
/// Terms are joined with spaces, which Anki treats as AND.
#[derive(Debug, Clone, Default)]
#[must_use = "QueryBuilder does nothing until .build() is called"]
pub struct QueryBuilder {
    parts: Vec<String>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Filter by deck name.
    ///
    /// Names with spaces are quoted automatically.
    pub fn deck(mut self, name: &str) -> Self {
        self.parts.push(format!("deck:{}", quote_if_needed(name)));
        self
    }

    /// Search for text in any field.
    ///
    /// The text is always quoted and matched as an exact phrase.
    ///
    /// ```
    /// use vocab_connect::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().contains("run").build();
    /// assert_eq!(q, "\"run\"");
    /// ```
    pub fn contains(mut self, text: &str) -> Self {
        self.parts.push(format!("\"{}\"", escape_quotes(text)));
        self
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

/// Quote a value if it contains characters Anki would split on.
fn quote_if_needed(s: &str) -> String {
    if s.contains(' ') || s.contains('"') || s.contains('(') || s.contains(')') {
        format!("\"{}\"", escape_quotes(s))
    } else {
        s.to_string()
    }
}

/// Escape double quotes in a string.
fn escape_quotes(s: &str) -> String {
    s.replace('"', "\\\"")
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}
