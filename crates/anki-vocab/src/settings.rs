//! Settings file and environment overrides.
//!
//! Settings come from `~/.config/anki-vocab/config.json` when it exists.
//! Each key can be overridden by the upper-case environment variable of the
//! same name (`DECK_NAME`, `OPENAI_API_KEY`, ...); empty variables are
//! ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use vocab_engine::{AnkiClient, Engine, OpenAiClient};

/// Default deck for new notes.
pub const DEFAULT_DECK: &str = "English Vocabulary";

/// Default note type.
pub const DEFAULT_MODEL: &str = "Basic (and reversed card)";

/// Runtime settings, built once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Deck new notes go to.
    pub deck_name: String,
    /// Note type used for new notes.
    pub model_name: String,
    /// OpenAI API key; empty when not configured.
    pub openai_api_key: String,
    /// AnkiConnect host.
    pub anki_host: String,
    /// AnkiConnect port.
    pub anki_port: u16,
    /// AnkiConnect API key, when the add-on requires one.
    #[serde(default)]
    pub anki_api_key: Option<String>,
    /// Alternative OpenAI-compatible endpoint.
    #[serde(default)]
    pub openai_base_url: Option<String>,
    /// Override for the lookup model.
    #[serde(default)]
    pub chat_model: Option<String>,
    /// Override for the speech model.
    #[serde(default)]
    pub speech_model: Option<String>,
}

impl Settings {
    /// Location of the settings file.
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not determine the home directory")?;
        Ok(home.join(".config").join("anki-vocab").join("config.json"))
    }

    /// Load from the default file and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?, None)
    }

    /// Load from `path`, overriding with `env` or, when `None`, the process
    /// environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let settings = Config::builder()
            .set_default("deck_name", DEFAULT_DECK)?
            .set_default("model_name", DEFAULT_MODEL)?
            .set_default("openai_api_key", "")?
            .set_default("anki_host", "localhost")?
            .set_default("anki_port", 8765)?
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(
                Environment::default()
                    .ignore_empty(true)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Whether an OpenAI API key is set.
    pub fn has_openai_key(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }

    /// The AnkiConnect URL these settings point at.
    pub fn anki_url(&self) -> String {
        format!("http://{}:{}", self.anki_host, self.anki_port)
    }

    /// Build the engine, with an OpenAI client only when a key is set.
    pub fn engine(&self) -> Engine {
        let mut anki = AnkiClient::builder().host_port(&self.anki_host, self.anki_port);
        if let Some(key) = non_empty(&self.anki_api_key) {
            anki = anki.api_key(key);
        }

        let engine = Engine::from_client(anki.build());
        match self.openai_client() {
            Some(openai) => engine.with_openai(openai),
            None => engine,
        }
    }

    fn openai_client(&self) -> Option<OpenAiClient> {
        if !self.has_openai_key() {
            return None;
        }

        let mut builder = OpenAiClient::builder().api_key(self.openai_api_key.trim());
        if let Some(url) = non_empty(&self.openai_base_url) {
            builder = builder.base_url(url);
        }
        if let Some(model) = non_empty(&self.chat_model) {
            builder = builder.chat_model(model);
        }
        if let Some(model) = non_empty(&self.speech_model) {
            builder = builder.speech_model(model);
        }
        Some(builder.build())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
