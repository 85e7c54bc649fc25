//! Pinger CLI
//!
//! Command-line entry point for the periodic endpoint notification service.

use std::path::PathBuf;

use clap::Parser;
use pinger::{load_config, Config, PingerBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pinger")]
#[command(about = "Periodically POSTs a notification to configured endpoints")]
#[command(version)]
struct Args {
    /// Path to a JSON configuration file with fallback endpoints
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    pinger::logging::init(args.log_level);

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    let file_config = match &args.config {
        Some(config_path) => {
            tracing::debug!("Loading configuration from {:?}", config_path);
            Some(load_config(config_path)?)
        }
        None => None,
    };
    let config = Config::resolve(Config::from_env(), file_config);

    // Register before the first tick so an early SIGINT is not lost.
    #[cfg(unix)]
    let shutdown = wait_for_interrupt(tokio::signal::unix::signal(
        tokio::signal::unix::SignalKind::interrupt(),
    )?);
    #[cfg(not(unix))]
    let shutdown = wait_for_interrupt();

    tracing::info!("Starting pinger service");

    PingerBuilder::new(config).build().run_until(shutdown).await?;

    Ok(())
}

#[cfg(unix)]
async fn wait_for_interrupt(mut interrupt: tokio::signal::unix::Signal) {
    interrupt.recv().await;
}

#[cfg(not(unix))]
async fn wait_for_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
    }
}
