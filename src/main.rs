// ============================================================================
// File: src/main.rs
// Entry point and CLI handling
// ============================================================================

mod config;
mod error;
mod http_client;
mod markdown;
mod models;
mod search_client;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::http_client::ReqwestClient;
use crate::markdown::MarkdownExporter;
use crate::models::{Cuisine, DietPreference, DisplayResult, SearchFilters};
use crate::search_client::SearchController;
use crate::session::{SearchSession, TerminalRenderer};

/// Command-line arguments for the recipe finder
#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Find a recipe by keyword, cuisine and diet", long_about = None)]
struct Args {
    /// Free-text search (e.g., "chicken", "biryani"). Omit all filters for a surprise.
    #[arg(short, long)]
    query: Option<String>,

    /// Restrict to one cuisine
    #[arg(short, long, value_enum)]
    cuisine: Option<Cuisine>,

    /// Diet preference
    #[arg(short, long, value_enum, default_value_t = DietPreference::Any)]
    diet: DietPreference,

    /// Optional JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the recipe card as markdown to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (request and response logging)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn filters(&self) -> SearchFilters {
        SearchFilters::new(self.query.as_deref(), self.cuisine, self.diet)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };
    config.validate()?;

    let client = ReqwestClient::new(config.timeout())?;
    let controller = SearchController::new(Arc::new(client), &config);
    let mut session = SearchSession::new(controller, TerminalRenderer::new());

    session.submit(&args.filters()).await;

    if let (Some(path), DisplayResult::Loaded(recipe)) = (&args.output, session.current()) {
        MarkdownExporter::new(recipe).export(path)?;
        println!(
            "\n{} Recipe exported to: {}",
            "✓".green().bold(),
            path.display().to_string().bright_cyan()
        );
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "recipe_finder=debug" } else { "recipe_finder=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
