//! Seed command - insert placeholder brands

use anyhow::{Context, Result};
use clap::Parser;

use brandreg_server::db::seed::{seed, SeedOutcome};
use brandreg_server::{ConnectionManager, StoreConfig};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Delete all existing rows in brands before seeding
    #[arg(long)]
    pub reset: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let mut config = StoreConfig::from_env();
    if let Some(url) = args.database_url {
        config.url = Some(url);
    }

    let store = ConnectionManager::new(config);
    let outcome = seed(&store, args.reset).await;
    store.close().await;

    match outcome.context("Failed to seed brands")? {
        SeedOutcome::Skipped { existing } => {
            println!("Brands table already has {} rows. Skipping seeding.", existing);
        }
        SeedOutcome::Inserted { count, cleared } => {
            if cleared > 0 {
                println!("Removed {} existing brands.", cleared);
            }
            println!("Inserted {} placeholder brands.", count);
        }
    }

    Ok(())
}
