use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, SearchController};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::StorySearchApp;

#[derive(Parser, Debug)]
#[command(name = "story-search-gui")]
struct Args {
    /// Base URL of the search server (overrides config and environment)
    #[arg(long)]
    server_url: Option<String>,
    /// Config file to read instead of ./story_search.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let endpoint = settings
        .analyze_url()
        .with_context(|| format!("cannot search against '{}'", settings.server_url))?;
    tracing::info!(%endpoint, "starting story search GUI");

    let controller = SearchController::from_settings(&settings);
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Story Search")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Story Search",
        options,
        Box::new(|_cc| Ok(Box::new(StorySearchApp::new(cmd_tx, ui_rx, controller)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop GUI failed: {err}"))
}
