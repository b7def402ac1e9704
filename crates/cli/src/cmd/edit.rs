//! Interactive edit session over stdin
//!
//! Each input line is one command:
//! - `title=TEXT` / `description=TEXT` edit a field (`\n` is a newline)
//! - `wait MS` pauses the script
//! - `flush` saves pending edits now
//! - `cancel` discards the buffer but keeps the selection
//! - `close` ends the session without saving pending edits
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::config::Config;
use crate::util;
use anyhow::{Context, Result};
use editor::{EditSession, Field, SkipReason, SyncEvent};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use store::{ActiveEntityStore, AuthContext};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
enum EditCommand {
    Set(Field, String),
    Wait(Duration),
    Flush,
    Cancel,
    Close,
}

fn parse_line(line: &str) -> Result<Option<EditCommand>> {
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    if let Some((name, value)) = trimmed.split_once('=') {
        let field: Field = name.parse()?;
        return Ok(Some(EditCommand::Set(field, util::unescape(value))));
    }

    let mut parts = trimmed.split_whitespace();
    let command = match (parts.next(), parts.next()) {
        (Some("wait"), Some(ms)) => {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("Invalid wait duration: {}", ms))?;
            EditCommand::Wait(Duration::from_millis(ms))
        }
        (Some("flush"), None) => EditCommand::Flush,
        (Some("cancel"), None) => EditCommand::Cancel,
        (Some("close"), None) => EditCommand::Close,
        _ => anyhow::bail!("Unrecognized edit command: {}", line.trim()),
    };
    Ok(Some(command))
}

async fn report_events(mut events: broadcast::Receiver<SyncEvent>) {
    loop {
        match events.recv().await {
            Ok(SyncEvent::Saved { id, updated_at }) => {
                println!(
                    "{} {} at {}",
                    "saved".green(),
                    id.to_string().cyan(),
                    updated_at.format("%H:%M:%S%.3f")
                );
            }
            Ok(SyncEvent::Failed { id, error }) => {
                println!("{} {}: {}", "save failed".red(), id, error);
            }
            Ok(SyncEvent::Skipped { reason }) => {
                let why = match reason {
                    SkipReason::NoActiveEntity => "nothing selected",
                    SkipReason::SelectionChanged => "selection changed",
                };
                println!("{}", format!("not saved: {}", why).dimmed());
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

pub async fn run(
    store_dir: &Path,
    id: &str,
    user: Option<String>,
    settle: bool,
    config: &Config,
) -> Result<()> {
    let sink = Arc::new(util::open_sink(store_dir)?);
    let entity = util::load_entity(&sink, id)?;

    let auth = user.map(AuthContext::for_user).unwrap_or_default();
    let store = Arc::new(ActiveEntityStore::new());
    let mut session = EditSession::new(store, Arc::clone(&sink), auth, &config.sync);
    let reporter = tokio::spawn(report_events(session.subscribe()));

    session.select(entity);
    eprintln!(
        "{} {} (saves after {:?} of quiet)",
        "editing".bold(),
        id.cyan(),
        session.debounce()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut closed = false;
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let Some(command) = parse_line(&line)? else {
            continue;
        };

        match command {
            EditCommand::Set(field, value) => session.set_field(field, value),
            EditCommand::Wait(duration) => tokio::time::sleep(duration).await,
            EditCommand::Flush => match session.flush().await {
                Ok(Some(_)) => {}
                Ok(None) => println!("{}", "nothing to save".dimmed()),
                // Already reported through the event stream
                Err(_) => {}
            },
            EditCommand::Cancel => session.cancel(),
            EditCommand::Close => {
                closed = true;
                break;
            }
        }
    }

    if settle && !closed {
        session.settle().await;
    }
    if session.has_unsaved_edits() {
        println!("{}", "discarding unsaved edits".yellow());
    }
    session.close();
    session.settle().await;

    drop(session);
    let _ = reporter.await;
    Ok(())
}
