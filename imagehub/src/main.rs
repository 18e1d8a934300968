// Image Hub - local image gallery
// Entry point and command dispatch

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use imagehub::app::{resolve_data_dir, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagehub=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    tracing::debug!("Starting Image Hub");

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let state = AppState::setup(data_dir)
        .await
        .context("Failed to initialize Image Hub")?;

    match cli.command {
        Commands::Add { file, title, tags } => commands::add(&state, &file, title, tags).await,
        Commands::List { filter } => commands::list(&state, filter).await,
        Commands::Delete { id, yes } => commands::delete(&state, id, yes).await,
        Commands::Open { id } => commands::open(&state, id).await,
        Commands::Browse => commands::browse(&state).await,
    }
}
