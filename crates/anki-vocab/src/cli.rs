//! Command-line arguments.

use std::fmt;

use clap::{Parser, ValueEnum};

/// Add English vocabulary to an Anki deck with AI-generated definitions,
/// or delete existing cards.
#[derive(Parser, Debug)]
#[command(name = "anki-vocab")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The English word to add or delete
    #[arg(required_unless_present_any = ["interactive", "config"])]
    pub word: Option<String>,

    /// Anki deck name (overrides config)
    #[arg(long)]
    pub deck: Option<String>,

    /// Anki note type name (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Disable automatic audio generation
    #[arg(long, default_value_t = false)]
    pub no_audio: bool,

    /// Text-to-speech voice
    #[arg(long, value_enum, default_value_t = Voice::Alloy)]
    pub voice: Voice,

    /// Delete cards containing the word instead of adding
    #[arg(long, default_value_t = false)]
    pub delete: bool,

    /// Start an interactive session
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Show the configuration file location and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Voices offered by the speech API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    /// The name the API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
