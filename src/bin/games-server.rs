//! Demo server: the game requests over HTTP, backed by an in-memory store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use games_cqrs::{game_mediator, InMemoryStore, Settings};

#[derive(Debug, Parser)]
#[command(name = "games-server", about = "Serve the game catalog over HTTP")]
struct Args {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address, overrides the settings file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default().with_env(),
    };
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let mediator = Arc::new(game_mediator(InMemoryStore::named(&settings.store_name)));
    info!(store = %settings.store_name, bind = %settings.bind, "starting games-server");

    games_cqrs::mediator::serve(mediator, &settings.bind)
        .await
        .with_context(|| format!("serving on {}", settings.bind))
}
