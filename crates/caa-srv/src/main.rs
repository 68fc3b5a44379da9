//! caa-checker - CAA issuance authorization service

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use caa_srv::ServerConfig;

/// Answers whether the configured issuer may issue for a domain, per the
/// domain's CAA records.
#[derive(Parser, Debug)]
#[command(name = "caa-checker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "CAA_CHECKER_CONFIG", default_value = "caa-checker.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from '{}'", cli.config.display()))?;

    caa_srv::server::run(&config).await?;
    Ok(())
}
