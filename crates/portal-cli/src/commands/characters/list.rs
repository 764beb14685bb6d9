//! List command implementation.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use portal_view::{ListView, ViewConfig};

use super::next_ready;
use crate::cli::ApiArgs;
use crate::{output, render};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list characters whose name contains this text
    #[arg(long)]
    pub name: Option<String>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Print one JSON object per character
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, api: &ApiArgs) -> Result<()> {
    let catalog = Arc::new(api.catalog()?);
    let config = ViewConfig::default().with_initial_query(args.name.unwrap_or_default());
    let view = ListView::mount(catalog, config);

    let mut snapshot = view
        .wait_until(|s| s.is_ready())
        .await
        .context("List view stopped unexpectedly")?;

    let mut pages = 1;
    while pages < args.pages && snapshot.has_more && snapshot.last_error.is_none() {
        let mut updates = view.subscribe();
        updates.mark_unchanged();
        view.end_reached();
        snapshot = next_ready(&mut updates).await?;
        pages += 1;
        debug!(pages, items = snapshot.items.len(), "Loaded page");
    }
    view.unmount().await;

    if let Some(error) = &snapshot.last_error {
        if snapshot.items.is_empty() {
            bail!("Failed to load characters: {error}");
        }
        output::error(&format!("Failed to load more characters: {error}"));
    }

    if args.json {
        for character in &snapshot.items {
            output::json(character)?;
        }
        return Ok(());
    }

    if let Some(message) = snapshot.placeholder() {
        println!("{message}");
        return Ok(());
    }

    render::rows(&snapshot.items, 1);
    output::note(&render::footer(&snapshot));

    Ok(())
}
