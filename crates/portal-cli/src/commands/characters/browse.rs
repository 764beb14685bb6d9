//! Interactive browse command implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, warn};

use portal_view::{LOADING_MESSAGE, ListSnapshot, ListView, Phase, ViewConfig};

use crate::cli::ApiArgs;
use crate::{output, render};

const HELP: &str = "Type to search, Enter or :more for the next page, :open N for details, \
                    :clear, :refresh, :quit";

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Initial search text
    #[arg(long)]
    pub name: Option<String>,

    /// Quiet interval before search text is sent, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Search(String),
    More,
    Open(usize),
    Refresh,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(Input::More);
    }

    let Some(command) = line.trim().strip_prefix(':') else {
        return Ok(Input::Search(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("more"), None) => Ok(Input::More),
        (Some("clear"), None) => Ok(Input::Search(String::new())),
        (Some("refresh"), None) => Ok(Input::Refresh),
        (Some("help"), None) => Ok(Input::Help),
        (Some("quit" | "q"), None) => Ok(Input::Quit),
        (Some("open"), Some(row)) => match row.parse::<usize>() {
            Ok(row) if row > 0 => Ok(Input::Open(row)),
            _ => Err(format!("Invalid row number: {row}")),
        },
        (Some("open"), None) => Err("Usage: :open N".to_string()),
        _ => Err(format!("Unknown command: :{command}")),
    }
}

pub async fn run(args: BrowseArgs, api: &ApiArgs) -> Result<()> {
    let catalog = Arc::new(api.catalog()?);
    let config = ViewConfig::default()
        .with_debounce(Duration::from_millis(args.debounce_ms))
        .with_initial_query(args.name.unwrap_or_default());
    let view = ListView::mount(catalog, config);
    let renderer = tokio::spawn(render_updates(view.subscribe()));

    output::note(HELP);

    let mut quit = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                output::error(&message);
                continue;
            }
        };
        debug!(?input, "Browse input");

        match input {
            Input::Search(text) => view.set_query(text),
            Input::More => view.end_reached(),
            Input::Refresh => view.refresh(),
            Input::Help => output::note(HELP),
            Input::Open(row) => {
                // Rows refer to the list as it stands once earlier input lands.
                let snapshot = view
                    .settled()
                    .await
                    .context("List view stopped unexpectedly")?;
                match snapshot.items.get(row - 1) {
                    Some(character) => render::detail(character),
                    None => output::error(&format!("No character at row {row}")),
                }
            }
            Input::Quit => {
                quit = true;
                break;
            }
        }
    }

    // At end of input, let the last search or page finish first.
    if !quit && view.settled().await.is_none() {
        warn!("List view stopped before settling");
    }
    view.unmount().await;
    if let Err(e) = renderer.await {
        warn!(error = %e, "Renderer stopped abnormally");
    }
    Ok(())
}

/// Print snapshot changes as they arrive until the view goes away.
async fn render_updates(mut updates: watch::Receiver<ListSnapshot>) {
    let mut progress = Progress::default();
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        for line in progress.update(&snapshot) {
            line.print();
        }
    }
}

/// A line of browse output.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    /// Rows and placeholders, on stdout.
    Out(String),
    /// Progress hints, on stderr.
    Note(String),
    Error(String),
}

impl Line {
    fn print(&self) {
        match self {
            Line::Out(text) => println!("{text}"),
            Line::Note(text) => output::note(text),
            Line::Error(text) => output::error(text),
        }
    }
}

/// What has already been printed for the current listing.
#[derive(Debug, Default)]
struct Progress {
    generation: u64,
    rows: usize,
    /// The settled state of this listing has been printed.
    shown: bool,
}

impl Progress {
    /// Lines to print for `snapshot`, given what was printed before.
    fn update(&mut self, snapshot: &ListSnapshot) -> Vec<Line> {
        if snapshot.generation != self.generation {
            self.generation = snapshot.generation;
            self.rows = 0;
            self.shown = false;
        }

        match snapshot.phase {
            Phase::Idle => Vec::new(),
            Phase::LoadingInitial => vec![Line::Note(LOADING_MESSAGE.to_string())],
            Phase::LoadingMore => {
                self.shown = false;
                vec![Line::Note("Loading more...".to_string())]
            }
            // Search keystrokes republish a list that is already on screen.
            Phase::Ready if self.shown => Vec::new(),
            Phase::Ready => {
                self.shown = true;
                let mut lines = Vec::new();
                if let Some(error) = &snapshot.last_error {
                    lines.push(Line::Error(error.clone()));
                }
                if let Some(message) = snapshot.placeholder() {
                    lines.push(Line::Out(message.to_string()));
                    return lines;
                }

                let start = self.rows.min(snapshot.items.len());
                lines.extend(
                    snapshot.items[start..]
                        .iter()
                        .enumerate()
                        .map(|(offset, c)| Line::Out(render::row(start + offset + 1, c))),
                );
                self.rows = snapshot.items.len();
                lines.push(Line::Note(render::footer(snapshot)));
                lines
            }
        }
    }
}
