//! Character subcommand implementations.

mod browse;
mod list;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tokio::sync::watch;

use portal_view::ListSnapshot;

use crate::cli::ApiArgs;

#[derive(Args, Debug)]
pub struct CharactersCommand {
    #[command(subcommand)]
    pub command: CharactersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CharactersSubcommand {
    /// Print one or more pages of characters
    List(list::ListArgs),

    /// Search and page through characters interactively
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: CharactersCommand, api: &ApiArgs) -> Result<()> {
    match cmd.command {
        CharactersSubcommand::List(args) => list::run(args, api).await,
        CharactersSubcommand::Browse(args) => browse::run(args, api).await,
    }
}

/// Wait for the next published snapshot that is settled.
async fn next_ready(updates: &mut watch::Receiver<ListSnapshot>) -> Result<ListSnapshot> {
    loop {
        updates
            .changed()
            .await
            .context("List view stopped unexpectedly")?;
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.is_ready() {
            return Ok(snapshot);
        }
    }
}
