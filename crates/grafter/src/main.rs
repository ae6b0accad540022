//! Grafter CLI binary.

use anyhow::Result;
use grafter::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the grafter CLI.
///
/// Uses tokio's current_thread runtime: every pipeline run is strictly
/// sequential, the only suspension points are source fetches.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=grafter=debug cargo run -- run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grafter=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting grafter CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Grafter CLI completed successfully");
    Ok(())
}
