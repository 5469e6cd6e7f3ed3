//! Add English vocabulary to Anki with AI-generated definitions and audio.

use std::io::{self, Write};
use std::process::ExitCode;

use anki_vocab::{Args, Session, SessionOptions, Settings, repl};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

async fn run(args: Args) -> Result<()> {
    if args.config {
        println!(
            "Configuration file location: {}",
            Settings::config_path()?.display()
        );
        return Ok(());
    }

    let settings = Settings::load()?;
    debug!(
        anki_url = %settings.anki_url(),
        deck = %settings.deck_name,
        model = %settings.model_name,
        openai_key = settings.has_openai_key(),
        "Loaded settings"
    );

    let options = SessionOptions {
        deck: args.deck.unwrap_or_else(|| settings.deck_name.clone()),
        model: args.model.unwrap_or_else(|| settings.model_name.clone()),
        audio: !args.no_audio,
        voice: args.voice.to_string(),
    };
    let session = Session::new(settings.engine(), options);
    let mut stdout = io::stdout();

    if args.interactive {
        info!("Starting interactive session");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        return repl::run(&session, stdin, &mut stdout).await;
    }

    let word = args.word.context("a word is required")?;
    if args.delete {
        let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session.delete(&word, &mut stdout, &mut stdin).await?;
    } else {
        session.add(&word, &mut stdout).await?;
    }
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "Loaded .env file");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
