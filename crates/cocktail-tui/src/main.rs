mod action;
mod app;
mod component;
mod components;
mod favorites;
mod fetch;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use cocktail_proto::config::Config;
use cocktail_proto::lookup::CocktailDbClient;
use cocktail_proto::platform;
use cocktail_proto::recipe::RecipeId;

use crate::favorites::FavoritesStore;
use crate::widgets::loader::LoaderAsset;

/// Show a cocktail recipe from TheCocktailDB in the terminal.
#[derive(Debug, Parser)]
#[command(name = "cocktail", version)]
struct Cli {
    /// Recipe id to look up (defaults to `ui.default_recipe_id` from the config)
    id: Option<String>,

    /// Override the recipe API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("cocktail.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // stdout belongs to the TUI; print the log path so it can be tailed.
    eprintln!("cocktail log: {}", log_path.display());

    tracing::info!("cocktail starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config load failed: {:#}; using defaults", e);
        Config::default()
    });

    let raw_id = cli
        .id
        .unwrap_or_else(|| config.ui.default_recipe_id.clone());
    if raw_id.trim().is_empty() {
        anyhow::bail!("a recipe id is required");
    }
    let recipe_id = RecipeId::new(raw_id.trim());

    // ── Collaborators ────────────────────────────────────────────────────────
    let base_url = cli.base_url.unwrap_or_else(|| config.api.base_url.clone());
    let client = CocktailDbClient::new(base_url, &config.api.user_agent)
        .context("building HTTP client")?;
    let favorites = Arc::new(Mutex::new(FavoritesStore::load(&config.favorites.path)));
    let loader = LoaderAsset::load_or_default(config.ui.loader_asset.as_deref());

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        recipe_id,
        Arc::new(client),
        favorites,
        loader,
        config.ui.show_keys_bar,
    );
    app.run().await?;

    Ok(())
}
