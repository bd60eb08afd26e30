//! Terminal view for the todo list.
//!
//! The view never touches state directly: it renders snapshots handed to it
//! and turns input lines into [`Command`]s, which become store actions.

use crate::TodoStore;
use crate::types::{TodoAction, TodoId, TodoState};
use anyhow::Context;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  add <text>      add a todo (text may be empty)
  remove <id>     remove a todo (alias: rm)
  list            show the list
  json            show the list as JSON
  help            show this message
  quit            exit (alias: exit)";

/// Input errors of the view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Blank input line
    #[error("empty input, type `help` for commands")]
    Empty,

    /// First word is not a known command
    #[error("unknown command `{0}`, type `help` for commands")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a todo with this text
    Add(String),
    /// Remove the todo with this id
    Remove(TodoId),
    /// Render the list
    List,
    /// Render the list as JSON
    Json,
    /// Print usage
    Help,
    /// Leave the input loop
    Quit,
}

impl Command {
    /// The store action for this command, if it mutates the list
    #[must_use]
    pub fn into_action(self) -> Option<TodoAction> {
        match self {
            Self::Add(text) => Some(TodoAction::Add { text }),
            Self::Remove(id) => Some(TodoAction::Remove { id }),
            Self::List | Self::Json | Self::Help | Self::Quit => None,
        }
    }
}

/// Parse one line of input
///
/// The text of `add` is everything after the first whitespace character,
/// kept verbatim.
///
/// # Errors
///
/// Returns a [`ViewError`] for blank lines, unknown commands, and `remove`
/// without an id.
pub fn parse_command(line: &str) -> Result<Command, ViewError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Err(ViewError::Empty);
    }

    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    match word.to_ascii_lowercase().as_str() {
        "add" => Ok(Command::Add(rest.to_string())),
        "remove" | "rm" => {
            let id = rest.trim();
            if id.is_empty() {
                Err(ViewError::MissingArgument("remove"))
            } else {
                Ok(Command::Remove(TodoId::new(id)))
            }
        },
        "list" | "ls" => Ok(Command::List),
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ViewError::UnknownCommand(other.to_string())),
    }
}

/// Render the list, one todo per line
#[must_use]
pub fn render(state: &TodoState) -> String {
    if state.is_empty() {
        return "Todos (0)\n  (no todos)".to_string();
    }

    let mut out = format!("Todos ({})", state.len());
    for todo in state {
        out.push_str("\n  ");
        out.push_str(todo.id.as_str());
        out.push_str("  ");
        out.push_str(&todo.text);
    }
    out
}

/// Render the list as pretty JSON
///
/// # Errors
///
/// Propagates `serde_json` serialization errors.
pub fn render_json(state: &TodoState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

/// Run an interactive session against `store`
///
/// Reads one command per line from `input` until `quit` or end of input.
/// Every change the store reports is rendered to `output` before the next
/// line is read, and once more before returning, so no change goes unshown.
/// Input errors are written to `output` and the session continues.
///
/// # Errors
///
/// Fails on I/O errors, on JSON serialization errors, and when the store
/// rejects an action.
pub async fn run<I, O>(store: &TodoStore, input: I, output: &mut O) -> anyhow::Result<()>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut changes = store.subscribe();

    write_line(output, &store.state(render).await).await?;
    write_line(output, "Type `help` for commands.").await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading input")? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(ViewError::Empty) => continue,
            Err(error) => {
                write_line(output, &error.to_string()).await?;
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => write_line(output, HELP).await?,
            Command::List => write_line(output, &store.state(render).await).await?,
            Command::Json => {
                let json = store.state(render_json).await?;
                write_line(output, &json).await?;
            },
            mutation => {
                if let Some(action) = mutation.into_action() {
                    store.send(action).await?;
                }
            },
        }

        render_changes(store, &mut changes, output).await?;
    }

    render_changes(store, &mut changes, output).await?;
    output.flush().await.context("flushing output")?;
    Ok(())
}

/// Render once if the change feed has anything pending
async fn render_changes<O>(
    store: &TodoStore,
    changes: &mut broadcast::Receiver<TodoAction>,
    output: &mut O,
) -> anyhow::Result<()>
where
    O: AsyncWrite + Unpin,
{
    let mut changed = false;
    loop {
        match changes.try_recv() {
            // Lagging still means the state moved on
            Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    if changed {
        write_line(output, &store.state(render).await).await?;
    }
    Ok(())
}

async fn write_line<O>(output: &mut O, text: &str) -> anyhow::Result<()>
where
    O: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await.context("writing output")?;
    output.write_all(b"\n").await.context("writing output")?;
    Ok(())
}
