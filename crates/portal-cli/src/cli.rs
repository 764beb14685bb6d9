//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use portal_core::ApiUrl;
use portal_http::{CatalogConfig, HttpCatalog};

use crate::commands::characters::CharactersCommand;

/// Browse the Rick and Morty character catalog.
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version = env!("PORTAL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to reach the character API.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the character API
    #[arg(long, env = "PORTAL_API_URL", default_value = ApiUrl::DEFAULT, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "PORTAL_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,
}

impl ApiArgs {
    /// Build an HTTP catalog from these settings.
    pub fn catalog(&self) -> Result<HttpCatalog> {
        let api_url = ApiUrl::new(&self.api_url).context("Invalid API URL")?;
        let config = CatalogConfig::new(api_url).with_timeout(Duration::from_secs(self.timeout));
        HttpCatalog::new(config).context("Failed to create HTTP client")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Character catalog operations
    Characters(CharactersCommand),
}
