//! `crm`: command-line front end for the insurance CRM store.
//!
//! # Usage
//!
//! ```text
//! crm contact add --first Ann --last Lee --email ann@example.com
//! crm contact list --search lee
//! crm policy add --contact 1 --type Auto --number ABC-1 --carrier X \
//!   --premium 100 --start 2024-01-01 --renewal 2025-01-01
//! crm comm add 1 --type "Phone Call" "Discussed renewal options"
//! crm --config ~/.config/crm/config.json seed
//! ```

mod commands;
mod render;
mod seed;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use crm_config::{Formats, Settings};
use crm_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "crm", version, about = "Contacts, policies and communications for an insurance agency")]
struct Cli {
  /// Path to the JSON settings file; created with defaults if missing.
  #[arg(short, long, value_name = "FILE", default_value = "config.json")]
  config: PathBuf,

  /// Database file to use instead of `database.path` from the settings.
  #[arg(long, value_name = "FILE")]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
  let formats =
    Formats::from_settings(&settings).context("invalid display settings")?;

  let store_path = cli
    .database
    .unwrap_or_else(|| settings.database.path.clone());
  let store = SqliteStore::open(&store_path)
    .with_context(|| format!("failed to open store at {}", store_path.display()))?;

  commands::run(&store, &formats, cli.command)
}
