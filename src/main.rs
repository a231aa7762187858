//! Avskrift CLI entry point.

use anyhow::Result;
use avskrift::config::Settings;
use avskrift::{logging, pipeline};
use clap::Parser;
use tracing::info;

/// Build a transcript + embedding dataset from configured YouTube channels.
#[derive(Parser)]
#[command(name = "avskrift", version, about)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(std::path::Path::new(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    logging::init(&settings, cli.verbose);

    let summary = pipeline::run(&settings).await?;
    info!(
        "Collected {} records across {} channels, {} embedding dimensions",
        summary.records, summary.channels, summary.dimension
    );

    Ok(())
}
