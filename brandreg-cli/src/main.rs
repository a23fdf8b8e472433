//! brandreg CLI - brand registration backend
//!
//! Entry point for the `brandreg` binary:
//! - `serve`: run the HTTP API
//! - `seed`: insert placeholder brands into an empty table

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "brandreg",
    author,
    version,
    about = "Brand registration backend: HTTP CRUD over a SQL store"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server (brands CRUD, health)
    Serve(commands::serve::ServeArgs),
    /// Insert placeholder brands (skipped when the table has rows)
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;
    for path in &loaded {
        info!("Loaded configuration from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Seed(args) => commands::seed::run_seed(args).await,
    }
}
