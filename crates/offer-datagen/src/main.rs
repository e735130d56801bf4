//! CLI for generating the synthetic offer datasets.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Generate the four synthetic CSV datasets used by the offer pipeline.
#[derive(Parser, Debug)]
#[command(name = "offer-datagen", version, about)]
struct Args {
    /// Directory to write the CSV files to.
    #[arg(long, default_value = "data", env = "OFFERPILOT_DATA_DIR")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let args = Args::parse();

    info!("Generating synthetic data for all agents...");
    offer_datagen::generate_all(&args.output_dir)?;
    info!("Data generation complete.");

    Ok(())
}
