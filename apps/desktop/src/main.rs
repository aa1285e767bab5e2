use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, HttpSearchBackend, SearchController, ViewState};
use tracing_subscriber::EnvFilter;

mod repl;

/// Search user stories through the hybrid analyze endpoint.
#[derive(Parser, Debug)]
#[command(name = "story-search")]
struct Args {
    /// Base URL of the search server (overrides config and environment)
    #[arg(long)]
    server_url: Option<String>,
    /// Config file to read instead of ./story_search.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run a single search and exit; omit for interactive mode
    #[arg(long, short)]
    query: Option<String>,
    /// Print the raw ranked results as JSON (single search only)
    #[arg(long, requires = "query")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let backend = HttpSearchBackend::new(&settings)
        .with_context(|| format!("cannot search against '{}'", settings.server_url))?;
    tracing::info!(endpoint = %backend.endpoint(), "story search client ready");

    let mut controller = SearchController::from_settings(&settings);
    match args.query {
        Some(query) => search_once(&mut controller, &backend, query, args.json).await,
        None => repl::run(&mut controller, &backend).await,
    }
}

async fn search_once(
    controller: &mut SearchController,
    backend: &HttpSearchBackend,
    query: String,
    json: bool,
) -> Result<()> {
    controller.set_query(query);
    if controller.submit(backend).await.is_none() {
        bail!("query must not be blank");
    }

    match controller.view() {
        ViewState::Error(message) => bail!("{message}"),
        ViewState::Loaded(results) if json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        _ => println!("{}", controller.presentation()),
    }
    Ok(())
}
