use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wp_purge_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "wp-purge")]
#[command(author, version, about = "Purge old posts and their featured media from WordPress sites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file (default: ~/.config/wp-purge/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete posts (and featured media) that fall in the retention window
    Run {
        /// Only process the named site (repeatable)
        #[arg(short = 's', long = "site")]
        sites: Vec<String>,
        /// List matching posts without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the date window the next run would sweep
    Window,
    /// List configured sites
    Sites,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::debug!("Loaded configuration with {} site(s)", config.sites.len());

    match cli.command {
        Some(Commands::Run { sites, dry_run }) => {
            commands::run::run(&config, &sites, dry_run).await
        }
        None => commands::run::run(&config, &[], false).await,
        Some(Commands::Window) => commands::window::run(&config),
        Some(Commands::Sites) => commands::sites::run(&config),
    }
}
