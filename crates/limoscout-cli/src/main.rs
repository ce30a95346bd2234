mod collect;
mod export;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::collect::CollectArgs;

#[derive(Debug, Parser)]
#[command(name = "limoscout")]
#[command(about = "Collect limousine and taxi listings from Google Places into CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a region, fetch details for every unique place and write a CSV
    Collect(CollectArgs),
    /// List the built-in regions and their query counts
    Regions,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = limoscout_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Collect(args) => collect::run_collect(&config, &args).await,
        Commands::Regions => collect::list_regions(),
    }
}
