//! Interactive command loop.
//!
//! ```text
//! anki-vocab> add run
//! anki-vocab> delete take off
//! anki-vocab> quit
//! ```

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

use crate::session::Session;

const PROMPT: &str = "anki-vocab> ";

const HELP: &str = "Commands:
  add <word>      Look up a word and add it to the deck
  delete <word>   Delete cards containing a word
  help            Show this help
  quit, exit      Leave the session";

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a word.
    Add(String),
    /// Delete notes containing a word.
    Delete(String),
    /// Show the command list.
    Help,
    /// Leave the loop.
    Quit,
}

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    ///
    /// Everything after the command is the word, so `add take off` adds
    /// "take off".
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let word = parts.collect::<Vec<_>>().join(" ");

        let command = match name.to_lowercase().as_str() {
            "add" | "delete" if word.is_empty() => {
                return Err(format!("Usage: {} <word>", name.to_lowercase()));
            }
            "add" => Command::Add(word),
            "delete" => Command::Delete(word),
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(format!(
                    "Unknown command '{}'. Type 'help' for available commands.",
                    other
                ));
            }
        };
        Ok(Some(command))
    }
}

/// Read commands from `input` until `quit` or end of input.
///
/// Failed commands are reported and the loop continues. Ctrl-C while
/// waiting for a command prints a hint instead of exiting. Ctrl-C while a
/// command runs, or while a delete waits for its confirmation, abandons the
/// command and returns to the prompt.
pub async fn run<R, W>(session: &Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(
        out,
        "Interactive mode (deck '{}', note type '{}'). Type 'help' for commands.",
        session.options().deck,
        session.options().model
    )?;

    loop {
        write!(out, "\n{}", PROMPT)?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                writeln!(out, "\n(type 'quit' to exit)")?;
                continue;
            }
        };

        let Some(line) = line else {
            writeln!(out)?;
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "Error: {}", message)?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Add(word) => interruptible(session.add(&word, out))
                .await
                .map(|added| added.map(drop)),
            Command::Delete(word) => {
                interruptible(delete(session, &word, &mut lines, out)).await
            }
        };

        match result {
            Some(Ok(())) => {}
            Some(Err(e)) => writeln!(out, "Error: {:#}", e)?,
            None => {
                warn!("Command interrupted");
                writeln!(out, "\nInterrupted")?;
            }
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

/// Delete with the confirmation taken from the next input line.
async fn delete<R, W>(
    session: &Session,
    word: &str,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(note_ids) = session.preview_delete(word, out).await? {
        let answer = lines.next_line().await?.unwrap_or_default();
        session.finish_delete(&note_ids, &answer, out).await?;
    }
    Ok(())
}

/// Run `task` unless Ctrl-C arrives first, in which case it is dropped.
async fn interruptible<F: Future>(task: F) -> Option<F::Output> {
    tokio::select! {
        output = task => Some(output),
        _ = tokio::signal::ctrl_c() => None,
    }
}
